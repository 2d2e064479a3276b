//! # Builder arguments
//!
//! [`Value`] is the dynamic shape of everything a [`Builder`] can be called
//! with. The classifier inspects the variant, never the contents, to decide
//! which handler folds an argument into the build state.

use std::fmt;
use std::sync::Arc;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

use crate::builder::Builder;
use crate::diagnostics::Result;
use crate::element::{Element, Props};
use crate::state::BuildState;

/// Reference to a style registered with a host stylesheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StyleId(pub u64);

/// A free-form transform of the build state, passed as an argument.
///
/// The returned state is adopted verbatim. Two refinements are equal only if
/// they share the same allocation.
#[derive(Clone)]
pub struct Refinement(Arc<dyn Fn(&BuildState) -> Result<BuildState> + Send + Sync>);

impl Refinement {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&BuildState) -> Result<BuildState> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn apply(&self, state: &BuildState) -> Result<BuildState> {
        (self.0)(state)
    }
}

impl PartialEq for Refinement {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<refinement>")
    }
}

/// A single builder argument.
///
/// # Examples
///
/// ```rust
/// use njsx::Value;
/// assert_eq!(Value::from("bar").type_name(), "string");
/// assert_eq!(Value::from(None::<i32>), Value::Null);
/// assert!(Value::default().is_nullish());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    Null,
    #[default]
    Undefined,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(Props),
    Style(StyleId),
    Element(Element),
    Builder(Builder),
    Function(Refinement),
}

impl Value {
    /// Returns the type name of the value, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Style(_) => "style",
            Value::Element(_) => "element",
            Value::Builder(_) => "builder",
            Value::Function(_) => "function",
        }
    }

    /// True for `Null` and `Undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Props> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Builds a `Map` value from key/value pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Wraps a closure as a functional refinement argument.
    pub fn refinement<F>(f: F) -> Self
    where
        F: Fn(&BuildState) -> Result<BuildState> + Send + Sync + 'static,
    {
        Value::Function(Refinement::new(f))
    }
}

/// Renders a number the way it appears as text content: integral values
/// have no fractional part, and magnitudes of at least `1e21` or below
/// `1e-6` use exponent notation with an explicit sign (`1e+21`, `1e-7`).
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let text = format!("{n:e}");
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        }
    } else {
        n.to_string()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null | Value::Undefined => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            Value::Style(id) => {
                let mut out = serializer.serialize_map(Some(1))?;
                out.serialize_entry("$style", &id.0)?;
                out.end()
            }
            Value::Element(element) => element.serialize(serializer),
            Value::Builder(builder) => {
                let mut out = serializer.serialize_map(Some(1))?;
                out.serialize_entry("$builder", builder.element_type().name())?;
                out.end()
            }
            Value::Function(_) => serializer.serialize_str("<refinement>"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Props> for Value {
    fn from(map: Props) -> Self {
        Value::Map(map)
    }
}

impl From<StyleId> for Value {
    fn from(id: StyleId) -> Self {
        Value::Style(id)
    }
}

impl From<Element> for Value {
    fn from(element: Element) -> Self {
        Value::Element(element)
    }
}

impl From<Builder> for Value {
    fn from(builder: Builder) -> Self {
        Value::Builder(builder)
    }
}

impl From<&Builder> for Value {
    fn from(builder: &Builder) -> Self {
        Value::Builder(builder.clone())
    }
}

impl From<Refinement> for Value {
    fn from(refinement: Refinement) -> Self {
        Value::Function(refinement)
    }
}

/// Collects heterogeneous expressions into a `Vec<Value>` argument list.
///
/// ```rust
/// use njsx::{args, Value};
/// let list = args!["bar", 5, None::<&str>];
/// assert_eq!(list, vec![Value::from("bar"), Value::Number(5.0), Value::Null]);
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        vec![$($crate::Value::from($arg)),+]
    };
}

/// Builds a `Value::Map` of attributes.
///
/// ```rust
/// use njsx::{props, Value};
/// let attrs = props! { "className" => "none", "tabIndex" => 1 };
/// assert_eq!(attrs.as_map().map(|m| m.len()), Some(2));
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Value::Map($crate::Props::new())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Value::map([$(($key, $crate::Value::from($value))),+])
    };
}
