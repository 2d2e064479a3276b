//! The njsx Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions. Errors are returned as `miette` reports so the
//! binary prints them with their diagnostic code and help.

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info};

use crate::cli::args::{Command, NjsxArgs};
use crate::config::{Config, Settings};
use crate::diagnostics::Result;
use crate::document::Document;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() -> miette::Result<()> {
    let args = NjsxArgs::parse();
    init_tracing(args.verbose);

    // Dispatch to the appropriate subcommand handler.
    match args.command {
        Command::Build {
            file,
            config,
            format,
        } => handle_build(&file, config.as_deref(), format)?,
        Command::Diff {
            left,
            right,
            config,
        } => handle_diff(&left, &right, config.as_deref())?,
        Command::Rules { preset } => {
            output::print_rules(&crate::config::Preset::from(preset).registry())?
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!("njsx={level}")))
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<Arc<Config>> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading settings");
            Ok(Settings::load(path)?.into_config())
        }
        None => Ok(Config::shared()),
    }
}

/// Handles the `build` subcommand.
fn handle_build(file: &Path, config: Option<&Path>, format: args::Format) -> Result<()> {
    let config = load_config(config)?;
    let element = Document::load(file)?.build(&config)?;
    info!(file = %file.display(), "built element");
    output::print_element(&element, format)
}

/// Handles the `diff` subcommand.
fn handle_diff(left: &Path, right: &Path, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let render = |path: &Path| -> Result<String> {
        let element = Document::load(path)?.build(&config)?;
        output::render_element(&element, args::Format::Json)
    };
    let differs = output::print_diff(&render(left)?, &render(right)?)?;
    if !differs {
        info!("documents build identical elements");
    }
    Ok(())
}
