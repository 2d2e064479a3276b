//! # Configuration
//!
//! A [`Config`] bundles the rule registry, the argument transformation
//! pipeline, the dynamic selector handler, the boolean policy and the element
//! factory. It is immutable once built and shared as `Arc<Config>`; every
//! builder captures the config it was created from, so two configs can be
//! used side by side without interfering.
//!
//! ## Usage Workflow
//! ```rust
//! use njsx::{args, Config};
//! let config = Config::dom();
//! let element = config.element("div").refine(args![".card", "hello"]).unwrap().build();
//! assert_eq!(element.class_name(), Some("card"));
//! ```
//!
//! File-based settings ([`Settings`]) select a preset and the policies; they
//! cannot carry closures, so transformations and handlers are programmatic.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::builder::Builder;
use crate::diagnostics::{NjsxError, Result};
use crate::element::{ElementFactory, ElementType, TreeFactory};
use crate::rules::{self, RuleRegistry};
use crate::state::BuildState;
use crate::value::Value;

pub type ArgumentTransformation = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// Maps an accessed selector name to a single refinement argument.
pub type ArgumentHandler = Arc<dyn Fn(&str) -> Result<Value> + Send + Sync>;

/// Re-derives a state from a selector name and the decomposed element.
pub type RederiveHandler = Arc<dyn Fn(&str, BuildState) -> Result<BuildState> + Send + Sync>;

/// How dynamic selectors (`builder.select("bar")`) turn into refinements.
#[derive(Clone)]
pub enum SelectorHandler {
    /// The handler's output is passed to the builder as a single argument.
    Argument(ArgumentHandler),
    /// The builder is materialized and decomposed through the factory; the
    /// handler receives that state and its result seeds the next builder.
    Rederive(RederiveHandler),
}

impl fmt::Debug for SelectorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorHandler::Argument(_) => f.write_str("SelectorHandler::Argument"),
            SelectorHandler::Rederive(_) => f.write_str("SelectorHandler::Rederive"),
        }
    }
}

/// What a boolean argument does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanPolicy {
    /// Booleans are no-ops, so `cond && child` style arguments can be passed.
    #[default]
    Ignore,
    /// Booleans reach the rule registry (`boolean-as-child` renders them).
    AsChild,
}

/// Builder configuration. See the module docs.
pub struct Config {
    rules: RuleRegistry,
    transformations: Vec<ArgumentTransformation>,
    selector: Option<SelectorHandler>,
    boolean_policy: BooleanPolicy,
    factory: Arc<dyn ElementFactory>,
}

static DEFAULT_CONFIG: Lazy<Arc<Config>> = Lazy::new(Config::dom);

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Web-style preset with no transformations or selector handler.
    pub fn dom() -> Arc<Config> {
        Config::builder().rules(RuleRegistry::dom()).build()
    }

    /// Mobile-widget preset with no transformations or selector handler.
    pub fn native() -> Arc<Config> {
        Config::builder().rules(RuleRegistry::native()).build()
    }

    /// Process-wide default, the [`Config::dom`] preset.
    pub fn shared() -> Arc<Config> {
        Arc::clone(&DEFAULT_CONFIG)
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn argument_transformations(&self) -> &[ArgumentTransformation] {
        &self.transformations
    }

    pub fn selector_handler(&self) -> Option<&SelectorHandler> {
        self.selector.as_ref()
    }

    pub fn boolean_policy(&self) -> BooleanPolicy {
        self.boolean_policy
    }

    pub fn factory(&self) -> &dyn ElementFactory {
        self.factory.as_ref()
    }

    /// A fresh builder for `ty` bound to this config.
    pub fn element(self: &Arc<Self>, ty: impl Into<ElementType>) -> Builder {
        Builder::new(ty, Arc::clone(self))
    }

    /// Derives a builder seeded from this config's settings.
    pub fn to_builder(&self) -> ConfigBuilder {
        ConfigBuilder {
            rules: self.rules.clone(),
            transformations: self.transformations.clone(),
            selector: self.selector.clone(),
            boolean_policy: self.boolean_policy,
            factory: Arc::clone(&self.factory),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rules", &self.rules.names())
            .field("transformations", &self.transformations.len())
            .field("selector", &self.selector)
            .field("boolean_policy", &self.boolean_policy)
            .finish()
    }
}

/// Step-by-step construction of a [`Config`]. Starts from the DOM preset.
pub struct ConfigBuilder {
    rules: RuleRegistry,
    transformations: Vec<ArgumentTransformation>,
    selector: Option<SelectorHandler>,
    boolean_policy: BooleanPolicy,
    factory: Arc<dyn ElementFactory>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            rules: RuleRegistry::dom(),
            transformations: Vec::new(),
            selector: None,
            boolean_policy: BooleanPolicy::default(),
            factory: Arc::new(TreeFactory),
        }
    }
}

impl ConfigBuilder {
    /// Replaces the whole rule registry.
    pub fn rules(mut self, rules: RuleRegistry) -> Self {
        self.rules = rules;
        self
    }

    /// Appends one rule after those already registered.
    pub fn rule(mut self, rule: rules::Rule) -> Self {
        self.rules.register(rule);
        self
    }

    pub fn argument_transformation<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.transformations.push(Arc::new(f));
        self
    }

    pub fn dynamic_selector_handler<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<Value> + Send + Sync + 'static,
    {
        self.selector = Some(SelectorHandler::Argument(Arc::new(f)));
        self
    }

    pub fn rederive_selector_handler<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, BuildState) -> Result<BuildState> + Send + Sync + 'static,
    {
        self.selector = Some(SelectorHandler::Rederive(Arc::new(f)));
        self
    }

    pub fn without_selector_handler(mut self) -> Self {
        self.selector = None;
        self
    }

    pub fn boolean_policy(mut self, policy: BooleanPolicy) -> Self {
        self.boolean_policy = policy;
        self
    }

    pub fn factory(mut self, factory: impl ElementFactory + 'static) -> Self {
        self.factory = Arc::new(factory);
        self
    }

    pub fn build_owned(self) -> Config {
        Config {
            rules: self.rules,
            transformations: self.transformations,
            selector: self.selector,
            boolean_policy: self.boolean_policy,
            factory: self.factory,
        }
    }

    pub fn build(self) -> Arc<Config> {
        Arc::new(self.build_owned())
    }
}

// ============================================================================
// FILE-BASED SETTINGS
// ============================================================================

/// Named rule preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Dom,
    Native,
    /// Empty registry: only built-in shapes (lists, builders, functions).
    None,
}

impl Preset {
    pub fn registry(self) -> RuleRegistry {
        match self {
            Preset::Dom => RuleRegistry::dom(),
            Preset::Native => RuleRegistry::native(),
            Preset::None => RuleRegistry::new(),
        }
    }
}

/// Serializable subset of [`Config`].
///
/// ```rust
/// use njsx::config::{BooleanPolicy, Preset, Settings};
/// let settings = Settings::from_yaml_str("preset: native\nboolean_policy: as_child\n").unwrap();
/// assert_eq!(settings.preset, Preset::Native);
/// assert_eq!(settings.boolean_policy, BooleanPolicy::AsChild);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub preset: Preset,
    pub boolean_policy: BooleanPolicy,
    /// Whether `".a.b"` strings are class selectors. Ignored for presets
    /// without the class rule.
    pub class_names: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            boolean_policy: BooleanPolicy::default(),
            class_names: true,
        }
    }
}

impl Settings {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yaml::from_str(source)
            .map_err(|e| NjsxError::settings("could not parse YAML settings", e))
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source)
            .map_err(|e| NjsxError::settings("could not parse JSON settings", e))
    }

    /// Loads settings from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| NjsxError::Io {
            path: path.display().to_string(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    pub fn config_builder(&self) -> ConfigBuilder {
        let mut registry = self.preset.registry();
        if !self.class_names {
            registry.remove(rules::STRING_AS_CLASS);
        }
        Config::builder()
            .rules(registry)
            .boolean_policy(self.boolean_policy)
    }

    pub fn into_config(self) -> Arc<Config> {
        self.config_builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_dom_preset() {
        let config = Settings::default().into_config();
        assert_eq!(config.rules().names(), RuleRegistry::dom().names());
        assert_eq!(config.boolean_policy(), BooleanPolicy::Ignore);
        assert!(config.selector_handler().is_none());
    }

    #[test]
    fn class_names_can_be_disabled() {
        let settings = Settings {
            class_names: false,
            ..Settings::default()
        };
        assert!(!settings.into_config().rules().has(rules::STRING_AS_CLASS));
    }

    #[test]
    fn json_settings_parse() {
        let settings = Settings::from_json_str(r#"{ "preset": "none" }"#).unwrap();
        assert_eq!(settings.preset, Preset::None);
        assert!(settings.into_config().rules().is_empty());
    }

    #[test]
    fn unknown_settings_keys_are_rejected() {
        let err = Settings::from_yaml_str("colour: blue\n").unwrap_err();
        assert!(matches!(err, NjsxError::Settings { .. }));
    }

    #[test]
    fn to_builder_preserves_everything_but_what_changes() {
        let base = Config::builder()
            .argument_transformation(|v| v)
            .dynamic_selector_handler(|name| Ok(Value::from(name)))
            .build();
        let derived = base.to_builder().boolean_policy(BooleanPolicy::AsChild).build();

        assert_eq!(derived.argument_transformations().len(), 1);
        assert!(derived.selector_handler().is_some());
        assert_eq!(derived.boolean_policy(), BooleanPolicy::AsChild);
        assert_eq!(base.boolean_policy(), BooleanPolicy::Ignore);
    }

    #[test]
    fn shared_config_is_a_single_instance() {
        assert!(Arc::ptr_eq(&Config::shared(), &Config::shared()));
    }
}
