//! Data models for configuration documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::provider::CloudProvider;

/// A validated configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub provider: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpc_cidr: Option<String>,
    pub resources: Resources,
    /// Top-level keys this tool does not interpret.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Configuration {
    /// Create a configuration with an empty resource mapping.
    pub fn new(provider: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            region: region.into(),
            environment: None,
            vpc_cidr: None,
            resources: Resources::default(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_environment(mut self, env: impl Into<String>) -> Self {
        self.environment = Some(env.into());
        self
    }

    pub fn with_vpc_cidr(mut self, cidr: impl Into<String>) -> Self {
        self.vpc_cidr = Some(cidr.into());
        self
    }

    pub fn with_resource(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.resources.insert(key, value);
        self
    }

    /// The typed provider, if the provider string is supported.
    pub fn cloud(&self) -> Option<CloudProvider> {
        self.provider.parse().ok()
    }
}

/// The `resources` mapping: toggles (booleans) and sizing parameters
/// (strings or numbers), keyed by resource name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resources(BTreeMap<String, Value>);

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Read a toggle, falling back to `default` when the key is absent.
    ///
    /// Present values are coerced by truthiness: `null`, `false`, `0`, `""`
    /// and empty collections are off, everything else is on.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        match self.0.get(key) {
            None => default,
            Some(value) => is_truthy(value),
        }
    }

    /// Read a sizing parameter verbatim, falling back to `default`.
    pub fn value_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.0.get(key).cloned().unwrap_or_else(|| default.into())
    }
}

impl FromIterator<(String, Value)> for Resources {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
