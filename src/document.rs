//! # Tree documents
//!
//! A document describes one builder invocation as data, so trees can be
//! written in JSON or YAML:
//!
//! ```yaml
//! type: ul
//! args:
//!   - ".todo"
//!   - { $element: li, args: ["milk"] }
//!   - [{ $element: li, args: ["eggs"] }]
//! ```
//!
//! Argument mapping: `null` -> `Null`, booleans, numbers and strings map
//! directly, arrays become lists, `{ $element, args, component }` is a nested
//! builder, `{ $style: n }` is a stylesheet reference, `{ $undefined: true }`
//! is `Undefined`, and any other object is an attribute map. `calls` chains
//! further argument lists after `args`, one refinement per entry.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value as Json;

use crate::builder::Builder;
use crate::config::Config;
use crate::diagnostics::{NjsxError, Result};
use crate::element::{Element, ElementType, Props};
use crate::err_msg;
use crate::value::{StyleId, Value};

/// Root of a tree document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub component: bool,
    #[serde(default)]
    pub args: Vec<Json>,
    #[serde(default)]
    pub calls: Vec<Vec<Json>>,
}

impl Document {
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| err_msg!(Document, "{}", e))
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| err_msg!(Document, "{}", e))
    }

    /// Reads a `.json`, `.yaml` or `.yml` document.
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

    fn element_type(&self) -> ElementType {
        if self.component {
            ElementType::component(self.ty.as_str())
        } else {
            ElementType::intrinsic(self.ty.as_str())
        }
    }

    /// Replays the document's calls on a fresh builder bound to `config`.
    pub fn to_builder(&self, config: &Arc<Config>) -> Result<Builder> {
        let mut builder = config.element(self.element_type());
        for call in std::iter::once(&self.args).chain(&self.calls) {
            if call.is_empty() {
                continue;
            }
            let args = call
                .iter()
                .map(|arg| to_value(arg, config))
                .collect::<Result<Vec<_>>>()?;
            builder = builder.refine(args)?;
        }
        Ok(builder)
    }

    pub fn build(&self, config: &Arc<Config>) -> Result<Element> {
        Ok(self.to_builder(config)?.build())
    }
}

/// Converts one JSON argument into a builder argument.
pub fn to_value(json: &Json, config: &Arc<Config>) -> Result<Value> {
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => Value::Number(
            n.as_f64()
                .ok_or_else(|| err_msg!(Document, "number {} is out of range", n))?,
        ),
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => Value::List(
            items
                .iter()
                .map(|item| to_value(item, config))
                .collect::<Result<_>>()?,
        ),
        Json::Object(map) if map.contains_key("$element") => {
            let nested: Document = serde_json::from_value(rename_element_key(map))
                .map_err(|e| err_msg!(Document, "nested element: {}", e))?;
            Value::Builder(nested.to_builder(config)?)
        }
        Json::Object(map) if map.contains_key("$style") => {
            let id = map
                .get("$style")
                .and_then(Json::as_u64)
                .ok_or_else(|| err_msg!(Document, "`$style` must be a non-negative integer"))?;
            Value::Style(StyleId(id))
        }
        Json::Object(map) if map.get("$undefined") == Some(&Json::Bool(true)) => Value::Undefined,
        Json::Object(map) => {
            let mut props = Props::new();
            for (key, value) in map {
                props.insert(key.clone(), to_value(value, config)?);
            }
            Value::Map(props)
        }
    })
}

fn rename_element_key(map: &serde_json::Map<String, Json>) -> Json {
    let renamed = map
        .iter()
        .map(|(key, value)| {
            let key = if key == "$element" { "type" } else { key.as_str() };
            (key.to_string(), value.clone())
        })
        .collect();
    Json::Object(renamed)
}
