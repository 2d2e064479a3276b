//! # Classification rules
//!
//! A [`Rule`] pairs a predicate over a [`Value`] with a transform folding that
//! value into a [`BuildState`]. A [`RuleRegistry`] keeps rules in caller
//! order; resolution is first-match, never best-match.
//!
//! ## Presets
//!
//! - [`RuleRegistry::dom`]: class-name selectors, text, numbers, booleans,
//!   elements, stylesheet references and attribute maps.
//! - [`RuleRegistry::native`]: the mobile-widget ordering, with no class-name
//!   handling.

use std::fmt;
use std::sync::Arc;

use crate::accumulate::{merge_class_names, merge_style};
use crate::diagnostics::Result;
use crate::state::BuildState;
use crate::value::{number_to_string, Value};

pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
pub type Transform = Arc<dyn Fn(&Value, &BuildState) -> Result<BuildState> + Send + Sync>;

pub const IGNORE_NULL: &str = "ignore-null";
pub const IGNORE_UNDEFINED: &str = "ignore-undefined";
pub const IGNORE_BOOLEAN: &str = "ignore-boolean";
pub const BOOLEAN_AS_CHILD: &str = "boolean-as-child";
pub const STRING_AS_CLASS: &str = "string-as-class";
pub const STRING_AS_CHILD: &str = "string-as-child";
pub const NUMBER_AS_CHILD: &str = "number-as-child";
pub const ELEMENT_AS_CHILD: &str = "element-as-child";
pub const STYLE_AS_STYLE: &str = "style-as-style";
pub const HASH_AS_ATTRIBUTES: &str = "hash-as-attributes";

/// A named `(predicate, transform)` pair.
#[derive(Clone)]
pub struct Rule {
    name: String,
    applies_to: Predicate,
    apply: Transform,
}

impl Rule {
    pub fn new<P, T>(name: impl Into<String>, applies_to: P, apply: T) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
        T: Fn(&Value, &BuildState) -> Result<BuildState> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            applies_to: Arc::new(applies_to),
            apply: Arc::new(apply),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn applies_to(&self, arg: &Value) -> bool {
        (self.applies_to)(arg)
    }

    pub fn apply(&self, arg: &Value, state: &BuildState) -> Result<BuildState> {
        (self.apply)(arg, state)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.name).finish()
    }
}

// ============================================================================
// BUILT-IN RULES
// ============================================================================

pub fn ignore_null() -> Rule {
    Rule::new(IGNORE_NULL, |arg| matches!(arg, Value::Null), |_, state| {
        Ok(state.clone())
    })
}

pub fn ignore_undefined() -> Rule {
    Rule::new(
        IGNORE_UNDEFINED,
        |arg| matches!(arg, Value::Undefined),
        |_, state| Ok(state.clone()),
    )
}

pub fn ignore_boolean() -> Rule {
    Rule::new(IGNORE_BOOLEAN, |arg| matches!(arg, Value::Bool(_)), |_, state| {
        Ok(state.clone())
    })
}

pub fn boolean_as_child() -> Rule {
    Rule::new(
        BOOLEAN_AS_CHILD,
        |arg| matches!(arg, Value::Bool(_)),
        |arg, state| match arg {
            Value::Bool(b) => Ok(state.with_child(b.to_string())),
            _ => Ok(state.clone()),
        },
    )
}

/// `".bar.baz"` appends `bar` and `baz` to the `className` token list.
pub fn string_as_class() -> Rule {
    Rule::new(
        STRING_AS_CLASS,
        |arg| matches!(arg, Value::String(s) if s.trim().starts_with('.')),
        |arg, state| {
            let Some(selector) = arg.as_str() else {
                return Ok(state.clone());
            };
            let existing = state.prop("className").and_then(Value::as_str);
            let merged = merge_class_names(existing, selector);
            Ok(state.with_prop("className", Value::String(merged)))
        },
    )
}

pub fn string_as_child() -> Rule {
    Rule::new(
        STRING_AS_CHILD,
        |arg| matches!(arg, Value::String(_)),
        |arg, state| match arg {
            Value::String(s) => Ok(state.with_child(s.as_str())),
            _ => Ok(state.clone()),
        },
    )
}

/// Numbers are appended as their text rendering.
pub fn number_as_child() -> Rule {
    Rule::new(
        NUMBER_AS_CHILD,
        |arg| matches!(arg, Value::Number(_)),
        |arg, state| match arg {
            Value::Number(n) => Ok(state.with_child(number_to_string(*n))),
            _ => Ok(state.clone()),
        },
    )
}

pub fn element_as_child() -> Rule {
    Rule::new(
        ELEMENT_AS_CHILD,
        |arg| matches!(arg, Value::Element(_)),
        |arg, state| match arg {
            Value::Element(element) => Ok(state.with_child(element.clone())),
            _ => Ok(state.clone()),
        },
    )
}

/// A stylesheet reference goes through the same merge policy as a literal
/// `style` attribute.
pub fn style_as_style() -> Rule {
    Rule::new(
        STYLE_AS_STYLE,
        |arg| matches!(arg, Value::Style(_)),
        |arg, state| match merge_style(state.prop("style"), Some(arg)) {
            Some(style) => Ok(state.with_prop("style", style)),
            None => Ok(state.clone()),
        },
    )
}

/// Shallow-merges a map into props. The `style` key is merged, not replaced.
pub fn hash_as_attributes() -> Rule {
    Rule::new(
        HASH_AS_ATTRIBUTES,
        |arg| matches!(arg, Value::Map(_)),
        |arg, state| {
            let Value::Map(attrs) = arg else {
                return Ok(state.clone());
            };
            let style = merge_style(state.prop("style"), attrs.get("style"));
            let next = state.with_props(&attrs.without("style")).without_prop("style");
            Ok(match style {
                Some(style) => next.with_prop("style", style),
                None => next,
            })
        },
    )
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Ordered rule list, resolved first-match.
#[derive(Clone, Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Web-style preset.
    pub fn dom() -> Self {
        Self::with_rules([
            string_as_class(),
            string_as_child(),
            number_as_child(),
            boolean_as_child(),
            element_as_child(),
            style_as_style(),
            hash_as_attributes(),
            ignore_null(),
            ignore_undefined(),
        ])
    }

    /// Mobile-widget preset.
    pub fn native() -> Self {
        Self::with_rules([
            string_as_child(),
            number_as_child(),
            boolean_as_child(),
            element_as_child(),
            style_as_style(),
            hash_as_attributes(),
            ignore_null(),
            ignore_undefined(),
        ])
    }

    /// Appends a rule; it is tried after every rule already registered.
    pub fn register(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Inserts a rule at `index`, clamped to the end of the list.
    pub fn insert(&mut self, index: usize, rule: Rule) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
    }

    pub fn prepend(&mut self, rule: Rule) {
        self.insert(0, rule);
    }

    /// Removes the first rule registered under `name`.
    pub fn remove(&mut self, name: &str) -> Option<Rule> {
        let index = self.rules.iter().position(|rule| rule.name() == name)?;
        Some(self.rules.remove(index))
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The first rule whose predicate accepts `arg`, in registration order.
    pub fn first_match(&self, arg: &Value) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.applies_to(arg))
    }
}

impl FromIterator<Rule> for RuleRegistry {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::with_rules(iter)
    }
}
