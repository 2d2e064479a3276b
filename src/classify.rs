//! # Argument classification
//!
//! Resolution order for one raw argument:
//!
//! 1. run the configured argument transformations, left to right;
//! 2. absorb `Null`, `Undefined` and (under [`BooleanPolicy::Ignore`]) booleans;
//! 3. expand lists so each item is classified on its own;
//! 4. materialize nested builders as children;
//! 5. first matching rule of the registry;
//! 6. functions not claimed by a rule become state refinements;
//! 7. anything else is an [`NjsxError::UnsupportedArgument`].

use tracing::trace;

use crate::builder::Builder;
use crate::config::{BooleanPolicy, Config};
use crate::diagnostics::{NjsxError, Result};
use crate::rules::Rule;
use crate::value::{Refinement, Value};

/// The handler selected for one effective argument, carrying what it needs.
#[derive(Debug)]
pub enum Classification<'c> {
    /// No-op: the state is left unchanged.
    Ignored(Value),
    /// A sequence whose items must be classified individually, in order.
    Expand(Vec<Value>),
    /// A nested builder to materialize and append as a child.
    Materialize(Builder),
    /// A registry rule together with the argument it accepted.
    Rule { rule: &'c Rule, argument: Value },
    /// A free-form state transform.
    Refine(Refinement),
}

/// Runs `raw` through every configured argument transformation.
pub fn transform_argument(raw: Value, config: &Config) -> Value {
    config
        .argument_transformations()
        .iter()
        .fold(raw, |arg, transformation| transformation(arg))
}

fn is_ignored(arg: &Value, policy: BooleanPolicy) -> bool {
    match arg {
        Value::Null | Value::Undefined => true,
        Value::Bool(_) => policy == BooleanPolicy::Ignore,
        _ => false,
    }
}

/// Classifies one raw argument against `config`.
pub fn classify(raw: Value, config: &Config) -> Result<Classification<'_>> {
    let arg = transform_argument(raw, config);

    if is_ignored(&arg, config.boolean_policy()) {
        trace!(kind = arg.type_name(), "ignoring argument");
        return Ok(Classification::Ignored(arg));
    }

    let arg = match arg {
        Value::List(items) => return Ok(Classification::Expand(items)),
        Value::Builder(builder) => return Ok(Classification::Materialize(builder)),
        other => other,
    };

    if let Some(rule) = config.rules().first_match(&arg) {
        trace!(rule = rule.name(), kind = arg.type_name(), "rule matched");
        return Ok(Classification::Rule {
            rule,
            argument: arg,
        });
    }

    match arg {
        Value::Function(refinement) => Ok(Classification::Refine(refinement)),
        other => Err(NjsxError::unsupported(&other)),
    }
}
