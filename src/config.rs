//! Configuration discovery and precedence.
//!
//! Settings come from command-line flags (or their environment variables),
//! then from the nearest `.brlparam.yaml` found by searching upward from the
//! working directory, then from built-in defaults.

use crate::command::OutputFormat;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE: &str = ".brlparam.yaml";
pub const DEFAULT_SNAPSHOT: &str = "parameters.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

/// Contents of a `.brlparam.yaml` file.
#[derive(Debug, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub snapshot: PathBuf,
    pub format: OutputFormat,
}

/// Find the nearest config file by searching upward from `start`.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(ClientConfig::default());
    }
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Combine flags, the discovered config file and defaults.
pub fn resolve_settings(
    cwd: &Path,
    snapshot_flag: Option<PathBuf>,
    format_flag: Option<OutputFormat>,
) -> Result<Settings, ConfigError> {
    let (config, base) = match find_config(cwd) {
        Some(path) => {
            debug!(path = %path.display(), "using config file");
            let config = load_config(&path)?;
            let base = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.to_path_buf());
            (config, base)
        }
        None => (ClientConfig::default(), cwd.to_path_buf()),
    };

    let snapshot = match snapshot_flag {
        Some(path) => cwd.join(path),
        None => base.join(config.snapshot.unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT))),
    };
    let format = format_flag.or(config.format).unwrap_or_default();

    Ok(Settings { snapshot, format })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_config() {
        let temp_dir = TempDir::new().unwrap();
        let cwd = temp_dir.path();

        let settings = resolve_settings(cwd, None, None).unwrap();
        assert_eq!(settings.snapshot, cwd.join(DEFAULT_SNAPSHOT));
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn test_config_found_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join(CONFIG_FILE),
            "snapshot: device/params.json\nformat: json\n",
        )
        .unwrap();
        let nested = root.join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let settings = resolve_settings(&nested, None, None).unwrap();
        assert_eq!(settings.snapshot, root.join("device/params.json"));
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_flags_override_config() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(CONFIG_FILE), "snapshot: other.yaml\nformat: json\n").unwrap();

        let settings = resolve_settings(
            root,
            Some(PathBuf::from("mine.yaml")),
            Some(OutputFormat::Text),
        )
        .unwrap();
        assert_eq!(settings.snapshot, root.join("mine.yaml"));
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn test_absolute_config_snapshot_kept() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let absolute = root.join("elsewhere").join("snap.yaml");
        fs::write(
            root.join(CONFIG_FILE),
            format!("snapshot: \"{}\"\n", absolute.display()),
        )
        .unwrap();

        let settings = resolve_settings(root, None, None).unwrap();
        assert_eq!(settings.snapshot, absolute);
    }

    #[test]
    fn test_empty_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(CONFIG_FILE), "").unwrap();

        let settings = resolve_settings(root, None, None).unwrap();
        assert_eq!(settings.snapshot, root.join(DEFAULT_SNAPSHOT));
    }

    #[test]
    fn test_malformed_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(CONFIG_FILE), "format: sideways\n").unwrap();

        let err = resolve_settings(root, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }
}
