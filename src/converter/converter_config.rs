use serde::Deserialize;
use serde_json::Value;

use crate::schema::DEFAULT_NAME_PREFIX;

/// Converter configuration.
///
/// - `default_name_prefix` is prepended to the position of unnamed outputs.
/// - `force_lowercase` lowercases every field name, nested ones included.
/// - `record_namespace` replaces the catalog namespace in the rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub default_name_prefix: String,
    pub force_lowercase: bool,
    pub record_namespace: Option<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            default_name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            force_lowercase: false,
            record_namespace: None,
        }
    }
}

impl ConverterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            default_name_prefix: prefix.to_string(),
            ..Self::default()
        }
    }

    pub fn lowercase() -> Self {
        Self {
            force_lowercase: true,
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.record_namespace = Some(namespace.to_string());
        self
    }

    pub fn from_json(json_value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(json_value)
    }
}
