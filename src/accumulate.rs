//! # State accumulation
//!
//! A deterministic left fold over the argument list. Lists are expanded
//! depth-first as they are met, so `[a, [b, c]]` folds exactly like
//! `a, b, c`, and arguments spread over chained calls fold in call order.

use tracing::debug;

use crate::classify::{classify, Classification};
use crate::config::Config;
use crate::diagnostics::Result;
use crate::element::Node;
use crate::state::BuildState;
use crate::value::Value;

/// Folds `args` into `initial`, returning the new state.
pub fn fold(initial: &BuildState, args: Vec<Value>, config: &Config) -> Result<BuildState> {
    debug!(count = args.len(), "folding arguments");
    args.into_iter()
        .try_fold(initial.clone(), |state, arg| apply_argument(state, arg, config))
}

/// Classifies one argument and applies its handler.
pub fn apply_argument(state: BuildState, arg: Value, config: &Config) -> Result<BuildState> {
    match classify(arg, config)? {
        Classification::Ignored(_) => Ok(state),
        Classification::Expand(items) => items
            .into_iter()
            .try_fold(state, |state, item| apply_argument(state, item, config)),
        Classification::Materialize(builder) => {
            Ok(state.with_child(Node::Element(builder.build())))
        }
        Classification::Rule { rule, argument } => rule.apply(&argument, &state),
        Classification::Refine(refinement) => refinement.apply(&state),
    }
}

fn is_defined(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_nullish())
}

/// Style merge policy.
///
/// - neither side defined: no style
/// - one side defined: that side
/// - existing is a list: incoming is appended
/// - otherwise: `[existing, incoming]`
pub fn merge_style(existing: Option<&Value>, incoming: Option<&Value>) -> Option<Value> {
    match (is_defined(existing), is_defined(incoming)) {
        (None, None) => None,
        (Some(existing), None) => Some(existing.clone()),
        (None, Some(incoming)) => Some(incoming.clone()),
        (Some(Value::List(items)), Some(incoming)) => {
            let mut items = items.clone();
            items.push(incoming.clone());
            Some(Value::List(items))
        }
        (Some(existing), Some(incoming)) => {
            Some(Value::List(vec![existing.clone(), incoming.clone()]))
        }
    }
}

/// Appends the `.`-separated tokens of `selector` to an existing
/// space-separated class list. Tokens are trimmed and empty ones dropped.
pub fn merge_class_names(existing: Option<&str>, selector: &str) -> String {
    existing
        .unwrap_or_default()
        .split(' ')
        .chain(selector.split('.'))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleRegistry;
    use crate::{args, props};

    #[test]
    fn style_merge_scenarios() {
        let five = Value::from(vec![5]);
        let one = Value::from(1);
        let map = props! { "bar" => "baz" };

        assert_eq!(merge_style(None, None), None);
        assert_eq!(merge_style(Some(&five), Some(&one)), Some(Value::from(vec![5, 1])));
        assert_eq!(merge_style(None, Some(&one)), Some(Value::from(1)));
        assert_eq!(merge_style(Some(&one), None), Some(Value::from(1)));
        assert_eq!(
            merge_style(Some(&map), Some(&one)),
            Some(Value::List(vec![map.clone(), one.clone()]))
        );
        assert_eq!(merge_style(Some(&Value::Null), Some(&one)), Some(Value::from(1)));
    }

    #[test]
    fn style_merge_does_not_touch_the_existing_list() {
        let existing = Value::from(vec![5]);
        let _ = merge_style(Some(&existing), Some(&Value::from(1)));
        assert_eq!(existing, Value::from(vec![5]));
    }

    #[test]
    fn class_names_are_trimmed_and_joined() {
        assert_eq!(merge_class_names(None, ".bar.baz"), "bar baz");
        assert_eq!(merge_class_names(Some("bar baz"), ".qux"), "bar baz qux");
        assert_eq!(merge_class_names(Some(""), " . bar .. "), "bar");
    }

    #[test]
    fn transformations_see_lists_before_expansion() {
        let config = Config::builder()
            .argument_transformation(|arg| match arg {
                Value::List(items) if items.len() == 2 => Value::map([
                    ("width", items[0].clone()),
                    ("height", items[1].clone()),
                ]),
                other => other,
            })
            .build_owned();
        let state = fold(&BuildState::new(), args![vec![10, 20]], &config).unwrap();

        assert_eq!(state.prop("width"), Some(&Value::from(10)));
        assert_eq!(state.prop("height"), Some(&Value::from(20)));
        assert!(state.children.is_empty());
    }

    #[test]
    fn fold_is_a_left_fold_over_expanded_lists() {
        let config = Config::builder().rules(RuleRegistry::dom()).build_owned();
        let args = args!["a", vec![Value::from("b"), Value::from(vec!["c"])], "d"];
        let state = fold(&BuildState::new(), args, &config).unwrap();

        let texts: Vec<_> = state.children.iter().filter_map(Node::as_text).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn fold_aborts_on_first_error() {
        let config = Config::builder().rules(RuleRegistry::new()).build_owned();
        let initial = BuildState::new();
        assert!(fold(&initial, args![Value::Null, "bar"], &config).is_err());
        assert_eq!(initial, BuildState::new());
    }

    #[test]
    fn refinements_replace_state_verbatim() {
        let config = Config::builder().build_owned();
        let replaced = BuildState::new().with_prop("className", Value::from("foo"));
        let expected = replaced.clone();
        let args = args!["dropped", Value::refinement(move |_| Ok(replaced.clone()))];

        let state = fold(&BuildState::new(), args, &config).unwrap();
        assert_eq!(state, expected);
    }
}
