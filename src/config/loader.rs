//! Structured configuration file loading.
//!
//! Files are YAML unless the extension is `.json`. A missing file loads as an
//! empty, non-present document; malformed content is a [`ConfigError::Parse`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use super::fs::FileSystem;
use super::{ConfigError, ConfigResult};

/// Immutable configuration document loaded from one path.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    path: PathBuf,
    present: bool,
    root: Map<String, Value>,
}

impl ConfigDocument {
    /// Document for a file that does not exist.
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            present: false,
            root: Map::new(),
        }
    }

    /// Document built from an already-parsed mapping.
    pub fn from_map(path: impl Into<PathBuf>, root: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            present: true,
            root,
        }
    }

    /// Path the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file existed. An existing empty file is present.
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Whether the document holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Look up a value by dotted key, e.g. `fondu.auth_token`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        parts.try_fold(self.root.get(first)?, |current, part| current.get(part))
    }

    /// Look up a string scalar by dotted key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

/// Loads [`ConfigDocument`]s through a [`FileSystem`].
#[derive(Clone)]
pub struct ConfigFileLoader {
    fs: Arc<dyn FileSystem>,
}

impl ConfigFileLoader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and parse the file at `path`.
    pub async fn load(&self, path: &Path) -> ConfigResult<ConfigDocument> {
        let content = self
            .fs
            .read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        match content {
            Some(content) => parse_document(path, &content),
            None => Ok(ConfigDocument::missing(path)),
        }
    }
}

impl std::fmt::Debug for ConfigFileLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigFileLoader").finish_non_exhaustive()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse_document(path: &Path, content: &str) -> ConfigResult<ConfigDocument> {
    if content.trim().is_empty() {
        return Ok(ConfigDocument::from_map(path, Map::new()));
    }

    let parsed: Result<Value, String> = if is_json(path) {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml_bw::from_str(content).map_err(|e| e.to_string())
    };

    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match parsed.map_err(parse_error)? {
        Value::Object(root) => Ok(ConfigDocument::from_map(path, root)),
        Value::Null => Ok(ConfigDocument::from_map(path, Map::new())),
        other => Err(parse_error(format!(
            "expected a mapping at the top level, found {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
