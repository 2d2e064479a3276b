//! # Builders
//!
//! A [`Builder`] binds an element type to a [`BuildState`] and the
//! [`Config`] it was created from. Refining returns a brand-new builder and
//! leaves the original untouched; building hands the state to the config's
//! element factory.
//!
//! ```rust
//! use njsx::{args, njsx};
//! let list = njsx("ul").refine(args![".todo"]).unwrap();
//! let item = njsx("li");
//! let element = list
//!     .refine(args![item.arg("milk").unwrap(), item.arg("eggs").unwrap()])
//!     .unwrap()
//!     .build();
//! assert_eq!(element.children().len(), 2);
//! assert_eq!(element.class_name(), Some("todo"));
//! ```
//!
//! Dynamic selectors replace property-access sugar: `builder.select("bar")`
//! asks the configured [`SelectorHandler`] what `bar` means. A built
//! [`Element`] has no `select`, so refinement ends at materialization.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::accumulate::fold;
use crate::config::{Config, SelectorHandler};
use crate::diagnostics::{NjsxError, Result};
use crate::element::{Element, ElementType};
use crate::state::BuildState;
use crate::value::Value;

/// Result of [`Builder::invoke`].
#[derive(Clone, Debug, PartialEq)]
pub enum Invocation {
    /// Called with arguments: a refined successor.
    Refined(Builder),
    /// Called with none: the materialized element.
    Built(Element),
}

impl Invocation {
    pub fn into_builder(self) -> Option<Builder> {
        match self {
            Invocation::Refined(builder) => Some(builder),
            Invocation::Built(_) => None,
        }
    }

    pub fn into_element(self) -> Option<Element> {
        match self {
            Invocation::Built(element) => Some(element),
            Invocation::Refined(_) => None,
        }
    }
}

/// Chainable, lazily materializing element description.
///
/// Equality is structural: two builders are equal when type and state are.
#[derive(Clone)]
pub struct Builder {
    ty: ElementType,
    state: BuildState,
    config: Arc<Config>,
}

impl Builder {
    pub fn new(ty: impl Into<ElementType>, config: Arc<Config>) -> Self {
        Self::with_state(ty, BuildState::new(), config)
    }

    pub fn with_state(ty: impl Into<ElementType>, state: BuildState, config: Arc<Config>) -> Self {
        Self {
            ty: ty.into(),
            state,
            config,
        }
    }

    pub fn element_type(&self) -> &ElementType {
        &self.ty
    }

    pub fn state(&self) -> &BuildState {
        &self.state
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Call-style entry point: no arguments builds, any arguments refine.
    pub fn invoke(&self, args: Vec<Value>) -> Result<Invocation> {
        if args.is_empty() {
            Ok(Invocation::Built(self.build()))
        } else {
            self.refine(args).map(Invocation::Refined)
        }
    }

    /// Folds `args` into a copy of this builder's state.
    pub fn refine(&self, args: Vec<Value>) -> Result<Builder> {
        let state = fold(&self.state, args, &self.config)?;
        Ok(Self::with_state(self.ty.clone(), state, Arc::clone(&self.config)))
    }

    /// Single-argument refinement.
    pub fn arg(&self, arg: impl Into<Value>) -> Result<Builder> {
        self.refine(vec![arg.into()])
    }

    /// Materializes through the config's element factory.
    pub fn build(&self) -> Element {
        debug!(element = %self.ty, children = self.state.children.len(), "materializing");
        self.config.factory().construct(
            &self.ty,
            self.state.props.clone(),
            self.state.children.clone(),
        )
    }

    /// Refines by a dynamic selector name.
    pub fn select(&self, name: &str) -> Result<Builder> {
        match self.config.selector_handler() {
            None => Err(NjsxError::MissingDynamicHandler {
                selector: name.to_string(),
            }),
            Some(SelectorHandler::Argument(handler)) => {
                debug!(selector = name, "refining by selector argument");
                self.arg(handler(name)?)
            }
            Some(SelectorHandler::Rederive(handler)) => {
                debug!(selector = name, "re-deriving by selector");
                let factory = self.config.factory();
                let (ty, props, children) = factory.decompose(&self.build());
                let state = handler(name, BuildState::from_parts(props, children))?;
                Ok(Self::with_state(ty, state, Arc::clone(&self.config)))
            }
        }
    }

    /// Applies [`Builder::select`] for each name in order.
    pub fn select_all<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<Builder> {
        names
            .into_iter()
            .try_fold(self.clone(), |builder, name| builder.select(name))
    }
}

impl PartialEq for Builder {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty && self.state == other.state
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("type", &self.ty)
            .field("state", &self.state)
            .finish()
    }
}

/// A builder for `ty` bound to the shared default config.
pub fn njsx(ty: impl Into<ElementType>) -> Builder {
    Builder::new(ty, Config::shared())
}
