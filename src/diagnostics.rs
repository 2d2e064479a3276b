//! # Diagnostics
//!
//! Every failure the builder can produce is an [`NjsxError`]. Errors are
//! `miette` diagnostics, so the CLI (or any host that owns a `miette::Report`)
//! gets a stable code and a help line for free.
//!
//! Errors are synchronous and abort the whole call that raised them: a
//! refinement that fails leaves the originating [`crate::Builder`] untouched
//! and produces no successor.
//!
//! Use `err_msg!` for message-only variants:
//!
//! ```rust
//! use njsx::{err_msg, NjsxError};
//! let err: NjsxError = err_msg!(InvalidComposition, "expected {} builders", 2);
//! assert!(err.to_string().contains("expected 2 builders"));
//! ```

use miette::Diagnostic;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = NjsxError> = std::result::Result<T, E>;

/// Unified error type for classification, refinement, composition and the
/// document/settings loaders used by the CLI.
#[derive(Debug, Error, Diagnostic)]
pub enum NjsxError {
    #[error("Unsupported argument of type {type_name}: {value}")]
    #[diagnostic(
        code(njsx::unsupported_argument),
        help("no ignore predicate, built-in shape or registered rule accepts this argument")
    )]
    UnsupportedArgument {
        value: String,
        type_name: &'static str,
    },

    #[error("Can't refine by `{selector}`: no handler for dynamic selector was provided")]
    #[diagnostic(
        code(njsx::missing_dynamic_handler),
        help("configure one with `ConfigBuilder::dynamic_selector_handler`")
    )]
    MissingDynamicHandler { selector: String },

    #[error("Invalid composition: {message}")]
    #[diagnostic(
        code(njsx::invalid_composition),
        help("composition needs at least one stage and every stage must be a builder")
    )]
    InvalidComposition { message: String },

    #[error("Refinement failed: {message}")]
    #[diagnostic(code(njsx::refinement))]
    Refinement { message: String },

    #[error("Invalid document: {message}")]
    #[diagnostic(code(njsx::document))]
    Document { message: String },

    #[error("Invalid settings: {message}")]
    #[diagnostic(code(njsx::settings))]
    Settings {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },

    #[error("Could not read {path}")]
    #[diagnostic(code(njsx::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl NjsxError {
    /// Builds an [`NjsxError::UnsupportedArgument`] from the offending value.
    pub fn unsupported(value: &crate::Value) -> Self {
        NjsxError::UnsupportedArgument {
            value: format!("{value:?}"),
            type_name: value.type_name(),
        }
    }

    /// Wraps a deserialization failure from one of the settings formats.
    pub fn settings<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        NjsxError::Settings {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Constructs an [`NjsxError`] variant that carries only a `message` field.
#[macro_export]
macro_rules! err_msg {
    // Message with format arguments
    ($variant:ident, $msg:expr, $($arg:expr),+ $(,)?) => {
        $crate::NjsxError::$variant {
            message: format!($msg, $($arg),+),
        }
    };
    // Message only
    ($variant:ident, $msg:expr) => {
        $crate::NjsxError::$variant {
            message: format!("{}", $msg),
        }
    };
}
