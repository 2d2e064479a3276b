//! # Elements and the element factory
//!
//! An [`Element`] is the finished `(type, props, children)` description a
//! builder materializes into. The crate never renders, diffs or lays out
//! elements; it only hands the three parts to an [`ElementFactory`] and gets
//! a value back.

use std::fmt;

use im::{OrdMap, Vector};
use serde::{Serialize, Serializer};

use crate::value::Value;

/// Attribute map of an element or build state. Keys are unique.
pub type Props = OrdMap<String, Value>;

/// Ordered child list of an element or build state.
pub type Children = Vector<Node>;

/// What kind of element a builder produces.
///
/// # Examples
///
/// ```rust
/// use njsx::ElementType;
/// let div = ElementType::from("div");
/// assert_eq!(div.name(), "div");
/// assert!(!div.is_component());
/// assert!(ElementType::component("TodoList").is_component());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    /// A host element addressed by tag name (`div`, `span`, `View`).
    Intrinsic(String),
    /// A user-defined component addressed by name.
    Component(String),
}

impl ElementType {
    pub fn intrinsic(tag: impl Into<String>) -> Self {
        ElementType::Intrinsic(tag.into())
    }

    pub fn component(name: impl Into<String>) -> Self {
        ElementType::Component(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            ElementType::Intrinsic(name) | ElementType::Component(name) => name,
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(self, ElementType::Component(_))
    }
}

impl From<&str> for ElementType {
    fn from(tag: &str) -> Self {
        ElementType::intrinsic(tag)
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        ElementType::Intrinsic(tag)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ElementType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// One entry of an element's child list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// A materialized element. Owned by the caller once produced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Element {
    #[serde(rename = "type")]
    ty: ElementType,
    props: Props,
    children: Children,
}

impl Element {
    pub fn new(ty: impl Into<ElementType>, props: Props, children: Children) -> Self {
        Self {
            ty: ty.into(),
            props,
            children,
        }
    }

    pub fn element_type(&self) -> &ElementType {
        &self.ty
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    /// Plain attribute lookup. This is data access only: it never reaches a
    /// dynamic selector handler, so a built element cannot be refined.
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    pub fn class_name(&self) -> Option<&str> {
        self.prop("className").and_then(Value::as_str)
    }

    pub fn into_parts(self) -> (ElementType, Props, Children) {
        (self.ty, self.props, self.children)
    }
}

/// The external collaborator that turns a build state into an element and
/// back again.
///
/// `construct` must accept an empty child list. `decompose` is only used by
/// re-deriving selector handlers that need the shape of an already built
/// element.
pub trait ElementFactory: Send + Sync {
    fn construct(&self, ty: &ElementType, props: Props, children: Children) -> Element;

    fn decompose(&self, element: &Element) -> (ElementType, Props, Children);
}

/// Factory producing plain [`Element`] trees with no host-side effects.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeFactory;

impl ElementFactory for TreeFactory {
    fn construct(&self, ty: &ElementType, props: Props, children: Children) -> Element {
        Element::new(ty.clone(), props, children)
    }

    fn decompose(&self, element: &Element) -> (ElementType, Props, Children) {
        element.clone().into_parts()
    }
}
