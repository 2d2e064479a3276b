//! # njsx
//!
//! Fluent builders for immutable `(type, props, children)` element trees.
//!
//! Arguments of any shape are classified, folded into an immutable build
//! state and, on [`Builder::build`], handed to an [`ElementFactory`].
//!
//! ```rust
//! use njsx::{args, njsx, props, Node};
//!
//! let card = njsx("div")
//!     .refine(args![".card.wide", props! { "id" => "main" }, njsx("h1").arg("Title").unwrap()])
//!     .unwrap()
//!     .refine(args!["body text", None::<&str>, false])
//!     .unwrap()
//!     .build();
//!
//! assert_eq!(card.class_name(), Some("card wide"));
//! assert_eq!(card.children().len(), 2);
//! assert_eq!(card.children()[1], Node::from("body text"));
//! ```

pub use crate::builder::{njsx, Builder, Invocation};
pub use crate::config::{BooleanPolicy, Config, ConfigBuilder, SelectorHandler, Settings};
pub use crate::diagnostics::{NjsxError, Result};
pub use crate::element::{Children, Element, ElementFactory, ElementType, Node, Props, TreeFactory};
pub use crate::rules::{Rule, RuleRegistry};
pub use crate::state::BuildState;
pub use crate::value::{Refinement, StyleId, Value};

pub mod accumulate;
pub mod builder;
pub mod classify;
pub mod cli;
pub mod compose;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod element;
pub mod rules;
pub mod state;
pub mod value;
