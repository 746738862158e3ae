//! File-backed parameter source.
//!
//! A snapshot is a YAML or JSON document captured from a device connection:
//!
//! ```yaml
//! parameters:
//!   - name: driverName
//!     label: Driver Name
//!     value: HandyTech
//!   - name: boundCommandKeycodeName
//!     label: Bound Command Keycode Name
//!     hidable: true
//!     subparams:
//!       1: HOME
//!       2: BACK
//! ```

use crate::registry::{Parameter, ParameterSource};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate parameter: {0}")]
    DuplicateParameter(String),
    #[error("unsupported snapshot format: {} (expected .yaml, .yml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// A parameter value as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            // Debug keeps the fractional part, so 1.0 stays "1.0".
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// One parameter entry of a snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SnapshotParameter {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub hidable: bool,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_subparams")]
    pub subparams: BTreeMap<i64, Value>,
}

/// A subparam key as written: a bare integer, or a string holding one.
#[derive(Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
enum SubparamKey {
    Index(i64),
    Text(String),
}

fn deserialize_subparams<'de, D>(deserializer: D) -> Result<BTreeMap<i64, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<SubparamKey, Value>::deserialize(deserializer)?;
    let mut subparams = BTreeMap::new();
    for (key, value) in raw {
        let index = match key {
            SubparamKey::Index(index) => index,
            SubparamKey::Text(text) => text.trim().parse::<i64>().map_err(|_| {
                serde::de::Error::custom(format!("subparam key is not an integer: {}", text))
            })?,
        };
        if subparams.insert(index, value).is_some() {
            return Err(serde::de::Error::custom(format!(
                "duplicate subparam key: {}",
                index
            )));
        }
    }
    Ok(subparams)
}

impl SnapshotParameter {
    pub fn new(name: &str, label: &str, hidable: bool) -> Self {
        SnapshotParameter {
            name: name.to_string(),
            label: Some(label.to_string()),
            hidable,
            value: None,
            subparams: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_subparam(mut self, index: i64, value: impl Into<Value>) -> Self {
        self.subparams.insert(index, value.into());
        self
    }
}

impl Parameter for SnapshotParameter {
    fn name(&self) -> &str {
        &self.name
    }

    /// Falls back to the name when the snapshot has no label.
    fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    fn is_hidable(&self) -> bool {
        self.hidable
    }

    fn value(&self) -> Option<String> {
        self.value.as_ref().map(ToString::to_string)
    }

    fn value_at(&self, subparam: i64) -> Option<String> {
        self.subparams.get(&subparam).map(ToString::to_string)
    }
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    parameters: Vec<SnapshotParameter>,
}

/// An immutable set of parameters with unique names.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    parameters: Vec<SnapshotParameter>,
}

impl Snapshot {
    pub fn from_parameters(parameters: Vec<SnapshotParameter>) -> Result<Self, SnapshotError> {
        let mut seen = HashSet::new();
        for p in &parameters {
            if !seen.insert(p.name.as_str()) {
                return Err(SnapshotError::DuplicateParameter(p.name.clone()));
            }
        }
        Ok(Snapshot { parameters })
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, SnapshotError> {
        let file: SnapshotFile = serde_yaml::from_str(content)?;
        Self::from_parameters(file.parameters)
    }

    pub fn from_json_str(content: &str) -> Result<Self, SnapshotError> {
        let file: SnapshotFile = serde_json::from_str(content)?;
        Self::from_parameters(file.parameters)
    }

    /// Load a snapshot, picking the parser from the file extension.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, SnapshotError> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(SnapshotError::UnsupportedFormat(path.to_path_buf())),
        };
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = parse(&content)?;
        debug!(path = %path.display(), count = snapshot.len(), "loaded snapshot");
        Ok(snapshot)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl ParameterSource for Snapshot {
    type Parameter = SnapshotParameter;
    type Error = Infallible;

    fn parameters(&self) -> Result<Vec<&SnapshotParameter>, Infallible> {
        Ok(self.parameters.iter().collect())
    }

    fn parameter(&self, name: &str) -> Result<Option<&SnapshotParameter>, Infallible> {
        Ok(self.parameters.iter().find(|p| p.name == name))
    }
}
