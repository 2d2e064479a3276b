//! Behavioral properties of builders: idempotent materialization, order
//! preservation across chained calls, flattening, absorption of ignorable
//! arguments, style and class merging, nesting and post-build freezing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use njsx::rules::{self, RuleRegistry};
use njsx::{
    args, njsx, props, BooleanPolicy, Children, Config, Element, ElementType, Node, NjsxError,
    Props, StyleId, Value,
};

fn texts(element: &Element) -> Vec<&str> {
    element.children().iter().filter_map(Node::as_text).collect()
}

fn child_types(element: &Element) -> Vec<&str> {
    element
        .children()
        .iter()
        .filter_map(Node::as_element)
        .map(|e| e.element_type().name())
        .collect()
}

// ============================================================================
// CREATION
// ============================================================================

#[test]
fn creatable_from_a_type_name() {
    let element = njsx("div").build();
    assert_eq!(element, Element::new("div", Props::new(), Children::new()));
}

#[test]
fn creatable_from_a_component_type() {
    let element = njsx(ElementType::component("TodoList")).build();
    assert!(element.element_type().is_component());
    assert_eq!(element.element_type().name(), "TodoList");
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn zero_call_is_idempotent() {
    let builder = njsx("div")
        .refine(args![".a", "text", props! { "id" => "x" }, njsx("span")])
        .unwrap();
    assert_eq!(builder.build(), builder.build());
}

#[test]
fn chained_calls_preserve_order() {
    let inner = njsx("span");
    let one_call = njsx("div").refine(args!["a", 5, &inner]).unwrap().build();
    let chained = njsx("div")
        .arg("a")
        .unwrap()
        .arg(5)
        .unwrap()
        .arg(&inner)
        .unwrap()
        .build();
    assert_eq!(one_call, chained);
}

#[test]
fn arrays_flatten_into_argument_lists() {
    let flat = njsx("div").refine(args!["a", "b"]).unwrap().build();
    let nested = njsx("div").arg(vec!["a", "b"]).unwrap().build();
    let deep = njsx("div")
        .arg(Value::List(vec![Value::from(vec!["a"]), Value::from(vec![vec!["b"]])]))
        .unwrap()
        .build();
    assert_eq!(flat, nested);
    assert_eq!(flat, deep);
}

#[test]
fn ignorable_arguments_are_absorbed() {
    let plain = njsx("div").arg("x").unwrap().build();
    let padded = njsx("div")
        .refine(args!["x", Value::Null, Value::Undefined, false, vec![Value::Null]])
        .unwrap()
        .build();
    assert_eq!(plain, padded);
}

#[test]
fn booleans_render_when_policy_says_so() {
    let config = Config::builder().boolean_policy(BooleanPolicy::AsChild).build();
    let element = config.element("foo").arg(false).unwrap().build();
    assert_eq!(texts(&element), vec!["false"]);
}

#[test]
fn style_accumulates_across_calls() {
    let element = njsx("div")
        .arg(props! { "style" => vec![5] })
        .unwrap()
        .arg(props! { "style" => 1 })
        .unwrap()
        .build();
    assert_eq!(element.prop("style"), Some(&Value::from(vec![5, 1])));

    let single = njsx("div").arg(props! { "style" => 1 }).unwrap().build();
    assert_eq!(single.prop("style"), Some(&Value::from(1)));

    let mixed = njsx("div")
        .arg(props! { "style" => props! { "bar" => "baz" } })
        .unwrap()
        .arg(props! { "style" => 1 })
        .unwrap()
        .build();
    assert_eq!(
        mixed.prop("style"),
        Some(&Value::List(vec![props! { "bar" => "baz" }, Value::from(1)]))
    );
}

#[test]
fn no_style_key_unless_one_side_defines_it() {
    let element = njsx("div").arg(props! { "id" => "x" }).unwrap().build();
    assert!(element.prop("style").is_none());
}

#[test]
fn style_references_and_literals_merge_symmetrically() {
    let element = njsx("View")
        .arg(StyleId(1))
        .unwrap()
        .arg(props! { "style" => props! { "flex" => 1 } })
        .unwrap()
        .build();
    assert_eq!(
        element.prop("style"),
        Some(&Value::List(vec![Value::Style(StyleId(1)), props! { "flex" => 1 }]))
    );
}

#[test]
fn class_tokens_merge_across_calls() {
    let element = njsx("div")
        .arg(".bar.baz")
        .unwrap()
        .arg(".qux")
        .unwrap()
        .build();
    assert_eq!(element.class_name(), Some("bar baz qux"));
}

#[test]
fn nested_builders_materialize_in_order() {
    let first = njsx("span").arg("one").unwrap();
    let second = njsx("p");
    let element = njsx("div").refine(args![&first, &second]).unwrap().build();

    let expected: Children = vec![Node::Element(first.build()), Node::Element(second.build())]
        .into_iter()
        .collect();
    assert_eq!(element.children(), &expected);
}

#[test]
fn built_elements_are_appended_as_is() {
    let span = njsx("span").build();
    let p = njsx("p").build();
    let element = njsx("div").refine(args![span, p]).unwrap().build();
    assert_eq!(child_types(&element), vec!["span", "p"]);
}

#[test]
fn attributes_hash_refines_props() {
    let element = njsx("div").arg(props! { "className" => "none" }).unwrap().build();
    assert_eq!(element.class_name(), Some("none"));
}

#[test]
fn numbers_are_text_children() {
    let element = njsx("div").arg(5).unwrap().build();
    assert_eq!(texts(&element), vec!["5"]);
}

#[test]
fn functional_refinements_replace_state() {
    let element = njsx("div")
        .arg(Value::refinement(|state| {
            Ok(state.with_prop("className", Value::from("foo")))
        }))
        .unwrap()
        .build();
    assert_eq!(element.class_name(), Some("foo"));
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn unsupported_argument_without_rules() {
    let config = Config::builder().rules(RuleRegistry::new()).build();
    let err = config.element("foo").arg("bar").unwrap_err();
    assert!(matches!(err, NjsxError::UnsupportedArgument { type_name: "string", .. }));
}

#[test]
fn hash_only_registry_rejects_strings() {
    let config = Config::builder()
        .rules(RuleRegistry::with_rules([rules::hash_as_attributes()]))
        .build();
    let builder = config.element("foo");
    let element = builder.arg(props! { "bar" => "meh" }).unwrap().build();
    assert_eq!(element.prop("bar"), Some(&Value::from("meh")));
    assert!(builder.arg("bar").is_err());
}

#[test]
fn failed_refinement_leaves_builder_usable() {
    let builder = njsx("div").arg("kept").unwrap();
    let failing = Value::refinement(|_| Err(njsx::err_msg!(Refinement, "nope")));
    assert!(builder.refine(args!["more", failing]).is_err());
    assert_eq!(texts(&builder.build()), vec!["kept"]);
}

// ============================================================================
// DYNAMIC SELECTORS
// ============================================================================

#[test]
fn dynamic_selectors_append_handler_output() {
    let config = Config::builder()
        .dynamic_selector_handler(|name| {
            Ok(Value::from(njsx("span").arg(name).unwrap().build()))
        })
        .build();
    let element = config
        .element("div")
        .select_all(["foo", "bar", "baz"])
        .unwrap()
        .build();

    assert_eq!(child_types(&element), vec!["span", "span", "span"]);
    let inner: Vec<_> = element
        .children()
        .iter()
        .filter_map(Node::as_element)
        .flat_map(texts)
        .collect();
    assert_eq!(inner, vec!["foo", "bar", "baz"]);
}

#[test]
fn built_elements_never_reach_the_selector_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let config = Config::builder()
        .dynamic_selector_handler(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            panic!("selector handler called after build");
        })
        .build();

    let element = config.element("div").build();
    assert!(element.prop("key").is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_handler_names_the_selector() {
    let err = njsx("div").select("bar").unwrap_err();
    assert!(err.to_string().contains("`bar`"));
}

// ============================================================================
// ARGUMENT TRANSFORMATIONS
// ============================================================================

#[test]
fn transformations_rewrite_every_argument() {
    let config = Config::builder()
        .argument_transformation(|arg| match arg {
            Value::Number(n) => Value::String(format!("{}px", n)),
            other => other,
        })
        .build();
    let element = config
        .element("div")
        .refine(args![1, vec![2]])
        .unwrap()
        .build();
    assert_eq!(texts(&element), vec!["1px", "2px"]);
}

#[test]
fn transformations_rewrite_list_arguments_whole() {
    let config = Config::builder()
        .argument_transformation(|arg| match arg {
            Value::List(items) if items.len() == 2 => {
                Value::map([("width", items[0].clone()), ("height", items[1].clone())])
            }
            other => other,
        })
        .build();
    let element = config.element("div").refine(args![vec![10, 20]]).unwrap().build();

    assert_eq!(element.prop("width"), Some(&Value::from(10)));
    assert_eq!(element.prop("height"), Some(&Value::from(20)));
    assert!(element.children().is_empty());
}

#[test]
fn configs_do_not_interfere() {
    let native = Config::native();
    let dom = Config::dom();
    let a = native.element("Text").arg(".bar").unwrap().build();
    let b = dom.element("Text").arg(".bar").unwrap().build();
    assert_eq!(texts(&a), vec![".bar"]);
    assert_eq!(b.class_name(), Some("bar"));
}
