//! Handles all user-facing output for the CLI.
//!
//! Serialized elements go to stdout as plain text so they can be piped;
//! rule listings and diffs are colorized when stdout is a terminal.

use std::io::Write;

use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::cli::args::Format;
use crate::diagnostics::{NjsxError, Result};
use crate::element::Element;
use crate::err_msg;
use crate::rules::RuleRegistry;

fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Serializes an element in the requested format.
pub fn render_element(element: &Element, format: Format) -> Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(element)
            .map_err(|e| err_msg!(Document, "could not serialize element: {}", e)),
        Format::Yaml => serde_yaml::to_string(element)
            .map_err(|e| err_msg!(Document, "could not serialize element: {}", e)),
    }
}

pub fn print_element(element: &Element, format: Format) -> Result<()> {
    let text = render_element(element, format)?;
    println!("{}", text.trim_end());
    Ok(())
}

/// Prints the rules of a registry in resolution order.
pub fn print_rules(registry: &RuleRegistry) -> Result<()> {
    let mut stdout = StandardStream::stdout(color_choice());
    for (i, rule) in registry.iter().enumerate() {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
        write!(stdout, "{:>2}", i + 1).map_err(io_error)?;
        let _ = stdout.reset();
        writeln!(stdout, "  {}", rule.name()).map_err(io_error)?;
    }
    if registry.is_empty() {
        writeln!(stdout, "(no rules)").map_err(io_error)?;
    }
    Ok(())
}

/// Prints a line diff of two rendered elements. Returns whether they differ.
pub fn print_diff(left: &str, right: &str) -> Result<bool> {
    let mut stdout = StandardStream::stdout(color_choice());
    let changeset = Changeset::new(left, right, "\n");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(x) => {
                let _ = stdout.reset();
                writeln!(stdout, " {}", x.replace('\n', "\n ")).map_err(io_error)?;
            }
            Difference::Add(x) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                writeln!(stdout, "+{}", x.replace('\n', "\n+")).map_err(io_error)?;
            }
            Difference::Rem(x) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                writeln!(stdout, "-{}", x.replace('\n', "\n-")).map_err(io_error)?;
            }
        }
    }
    let _ = stdout.reset();
    Ok(changeset.distance != 0)
}

fn io_error(source: std::io::Error) -> NjsxError {
    NjsxError::Io {
        path: "<stdout>".to_string(),
        source,
    }
}
