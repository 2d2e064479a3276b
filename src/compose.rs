//! # Composition
//!
//! Reusable builder-to-builder transforms.
//!
//! - [`compose`]: conventional right-to-left composition, `compose([f, g])(x) == f(g(x))`.
//! - [`pipe`]: left-to-right, `pipe([f, g])(x) == g(f(x))`.
//! - [`nest`]: the last builder is the innermost leaf; each preceding one
//!   wraps the previous result as its sole child.
//!
//! Every entry point validates all stages before applying any of them.

use std::sync::Arc;

use crate::builder::Builder;
use crate::diagnostics::{NjsxError, Result};
use crate::value::Value;

/// A single-argument builder transform.
pub type BuilderFn = Arc<dyn Fn(Builder) -> Result<Builder> + Send + Sync>;

/// Wraps a closure as a [`BuilderFn`].
pub fn transform<F>(f: F) -> BuilderFn
where
    F: Fn(Builder) -> Result<Builder> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Turns a builder into the transform "wrap the input as my child".
pub fn wrap(outer: Builder) -> BuilderFn {
    Arc::new(move |inner: Builder| outer.arg(inner))
}

fn collect_stages(stages: impl IntoIterator<Item = BuilderFn>) -> Result<Vec<BuilderFn>> {
    let stages: Vec<_> = stages.into_iter().collect();
    if stages.is_empty() {
        return Err(crate::err_msg!(
            InvalidComposition,
            "at least one transform is required"
        ));
    }
    Ok(stages)
}

/// Right-to-left composition: the last transform is applied first.
pub fn compose(stages: impl IntoIterator<Item = BuilderFn>) -> Result<BuilderFn> {
    let stages = collect_stages(stages)?;
    Ok(Arc::new(move |input: Builder| {
        stages.iter().rev().try_fold(input, |acc, stage| stage(acc))
    }))
}

/// Left-to-right composition: the first transform is applied first.
pub fn pipe(stages: impl IntoIterator<Item = BuilderFn>) -> Result<BuilderFn> {
    let stages = collect_stages(stages)?;
    Ok(Arc::new(move |input: Builder| {
        stages.iter().try_fold(input, |acc, stage| stage(acc))
    }))
}

/// Nests builders: `nest([a, b, c])` is `a(b(c))`.
///
/// Fails with [`NjsxError::InvalidComposition`] before building anything if
/// the list is empty or any part is not a builder.
///
/// ```rust
/// use njsx::{compose::nest, njsx, Value};
/// let tree = nest([Value::from(njsx("ul")), Value::from(njsx("li")), Value::from(njsx("a"))])
///     .unwrap()
///     .build();
/// let li = tree.children()[0].as_element().unwrap();
/// assert_eq!(li.element_type().name(), "li");
/// assert_eq!(li.children()[0].as_element().unwrap().element_type().name(), "a");
/// ```
pub fn nest(parts: impl IntoIterator<Item = Value>) -> Result<Builder> {
    let builders = parts
        .into_iter()
        .enumerate()
        .map(|(index, part)| match part {
            Value::Builder(builder) => Ok(builder),
            other => Err(crate::err_msg!(
                InvalidComposition,
                "stage {} is a {}, not a builder",
                index,
                other.type_name()
            )),
        })
        .collect::<Result<Vec<_>>>()?;

    let mut builders = builders.into_iter().rev();
    let innermost = builders.next().ok_or_else(|| {
        crate::err_msg!(InvalidComposition, "at least one builder is required")
    })?;
    builders.try_fold(innermost, |inner, outer| outer.arg(inner))
}

/// Nest-style composition as a reusable transform: the returned function
/// places its input as the innermost child of the given builders.
pub fn nest_around(parts: impl IntoIterator<Item = Value>) -> Result<BuilderFn> {
    let wrappers = parts
        .into_iter()
        .enumerate()
        .map(|(index, part)| match part {
            Value::Builder(builder) => Ok(wrap(builder)),
            other => Err(NjsxError::InvalidComposition {
                message: format!("stage {index} is a {}, not a builder", other.type_name()),
            }),
        })
        .collect::<Result<Vec<_>>>()?;
    compose(wrappers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{njsx, props};

    fn class(name: &'static str) -> BuilderFn {
        transform(move |b: Builder| b.arg(format!(".{name}")))
    }

    #[test]
    fn compose_applies_right_to_left() {
        let f = compose([class("outer"), class("inner")]).unwrap();
        let element = f(njsx("div")).unwrap().build();
        assert_eq!(element.class_name(), Some("inner outer"));
    }

    #[test]
    fn pipe_applies_left_to_right() {
        let f = pipe([class("first"), class("second")]).unwrap();
        let element = f(njsx("div")).unwrap().build();
        assert_eq!(element.class_name(), Some("first second"));
    }

    #[test]
    fn empty_composition_is_rejected() {
        assert!(matches!(
            compose(Vec::<BuilderFn>::new()),
            Err(NjsxError::InvalidComposition { .. })
        ));
        assert!(matches!(
            nest(Vec::<Value>::new()),
            Err(NjsxError::InvalidComposition { .. })
        ));
    }

    #[test]
    fn nest_rejects_non_builders_before_applying() {
        let err = nest([Value::from(njsx("div")), props! { "id" => "x" }]).unwrap_err();
        assert!(err.to_string().contains("stage 1 is a map"));
    }

    #[test]
    fn nest_single_builder_is_identity() {
        let leaf = njsx("span").arg("x").unwrap();
        assert_eq!(nest([Value::from(&leaf)]).unwrap(), leaf);
    }

    #[test]
    fn nest_around_wraps_input_innermost() {
        let layout =
            nest_around([Value::from(njsx("main")), Value::from(njsx("section"))]).unwrap();
        let page = layout(njsx("p").arg("hello").unwrap()).unwrap().build();

        let section = page.children()[0].as_element().unwrap();
        let p = section.children()[0].as_element().unwrap();
        assert_eq!(page.element_type().name(), "main");
        assert_eq!(section.element_type().name(), "section");
        assert_eq!(p.children()[0].as_text(), Some("hello"));
    }
}
