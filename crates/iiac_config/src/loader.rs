//! Configuration document loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::models::Configuration;
use crate::provider::CloudProvider;

/// Keys every configuration document must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 3] = ["provider", "region", "resources"];

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from a file extension. Anything that is not
    /// `.yaml`/`.yml` is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Json,
        }
    }
}

/// Loader for configuration documents.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a configuration document from disk.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Configuration> {
        let path = path.as_ref();
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => ConfigError::Parse {
                path: path.to_path_buf(),
                message: "file is not valid UTF-8".to_string(),
            },
            _ => ConfigError::Io(e),
        })?;
        Self::parse(&content, ConfigFormat::from_path(path), path)
    }

    /// Parse and validate an in-memory configuration document.
    pub fn from_str(content: &str, format: ConfigFormat) -> ConfigResult<Configuration> {
        Self::parse(content, format, Path::new("<inline>"))
    }

    fn parse(content: &str, format: ConfigFormat, path: &Path) -> ConfigResult<Configuration> {
        let parse_error = |message: String| ConfigError::Parse {
            path: PathBuf::from(path),
            message,
        };

        let document: Value = match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        };

        let Value::Object(root) = document else {
            return Err(parse_error("document root must be a mapping".to_string()));
        };

        Self::validate(&root)?;

        serde_json::from_value(Value::Object(root)).map_err(|e| parse_error(e.to_string()))
    }

    /// Check required keys, their types and the provider.
    fn validate(root: &Map<String, Value>) -> ConfigResult<()> {
        for field in REQUIRED_FIELDS {
            if !root.contains_key(field) {
                return Err(ConfigError::MissingField(field.to_string()));
            }
        }

        let provider = expect_string(root, "provider")?;
        expect_string(root, "region")?;

        if !root["resources"].is_object() {
            return Err(ConfigError::InvalidField {
                field: "resources".to_string(),
                message: "expected a mapping".to_string(),
            });
        }

        provider
            .parse::<CloudProvider>()
            .map_err(ConfigError::UnsupportedProvider)?;

        Ok(())
    }
}

fn expect_string<'a>(root: &'a Map<String, Value>, field: &str) -> ConfigResult<&'a str> {
    root[field].as_str().ok_or_else(|| ConfigError::InvalidField {
        field: field.to_string(),
        message: "expected a string".to_string(),
    })
}
