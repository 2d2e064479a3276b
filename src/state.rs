use crate::element::{Children, Node, Props};
use crate::value::Value;

// ============================================================================
// BUILD STATE: props + children threaded through argument folding
// ============================================================================

/// The accumulated `(props, children)` pair of a builder.
///
/// Every update returns a new state. Both containers are persistent
/// (copy-on-write), so states derived from one another never observe each
/// other's later changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildState {
    pub props: Props,
    pub children: Children,
}

impl BuildState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(props: Props, children: Children) -> Self {
        Self { props, children }
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn with_prop(&self, key: impl Into<String>, value: Value) -> Self {
        Self {
            props: self.props.update(key.into(), value),
            children: self.children.clone(),
        }
    }

    pub fn without_prop(&self, key: &str) -> Self {
        Self {
            props: self.props.without(key),
            children: self.children.clone(),
        }
    }

    /// Shallow merge; keys of `props` overwrite existing ones.
    pub fn with_props(&self, props: &Props) -> Self {
        Self {
            props: props.clone().union(self.props.clone()),
            children: self.children.clone(),
        }
    }

    pub fn with_child(&self, child: impl Into<Node>) -> Self {
        let mut children = self.children.clone();
        children.push_back(child.into());
        Self {
            props: self.props.clone(),
            children,
        }
    }

    pub fn into_parts(self) -> (Props, Children) {
        (self.props, self.children)
    }
}
