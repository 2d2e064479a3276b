//! Defines the command-line arguments and subcommands for the njsx CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::Preset;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "njsx",
    version,
    about = "Build element trees from JSON or YAML tree documents."
)]
pub struct NjsxArgs {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a tree document and print the resulting element.
    Build {
        /// The path to the tree document (.json, .yaml or .yml).
        #[arg(required = true)]
        file: PathBuf,
        /// Settings file selecting the rule preset and policies.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Build two tree documents and show a line diff of the results.
    Diff {
        #[arg(required = true)]
        left: PathBuf,
        #[arg(required = true)]
        right: PathBuf,
        /// Settings file selecting the rule preset and policies.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the rules of a preset in resolution order.
    Rules {
        #[arg(short, long, value_enum, default_value_t = PresetArg::Dom)]
        preset: PresetArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    Dom,
    Native,
    None,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Dom => Preset::Dom,
            PresetArg::Native => Preset::Native,
            PresetArg::None => Preset::None,
        }
    }
}
