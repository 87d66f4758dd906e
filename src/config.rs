use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{PocketError, Result};
use crate::store::DEFAULT_NAMESPACE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub data_dir: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            namespace: default_namespace(),
        }
    }
}

impl Config {
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.data_path().join("backups")
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_path().join(format!("{}.db", self.namespace))
    }
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// `~/.config/pocket/config.json`; `save_config` creates the parent.
fn config_path() -> PathBuf {
    home().join(".config").join("pocket").join("config.json")
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(home).join("pocket")
}

pub fn load_config() -> Config {
    let path = config_path();
    let Ok(content) = std::fs::read_to_string(&path) else {
        return Config::default();
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable config at {}: {e}", path.display());
        Config::default()
    })
}

pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| PocketError::Config(e.to_string()))?;
    std::fs::write(&path, format!("{json}\n"))?;
    Ok(())
}

/// Load the saved config, with `data_dir` overridden for this run when given.
/// A leading `~` or `~/` in the override is the home directory; any other
/// path is made absolute when it already exists.
pub fn resolve(data_dir: Option<&str>) -> Config {
    let mut config = load_config();
    if let Some(dir) = data_dir {
        let path = match dir.strip_prefix('~') {
            Some("") => home(),
            Some(rest) if rest.starts_with('/') => home().join(rest.trim_start_matches('/')),
            _ => std::fs::canonicalize(dir).unwrap_or_else(|_| PathBuf::from(dir)),
        };
        config.data_dir = path.to_string_lossy().into_owned();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            data_dir: "/tmp/pocket-test".to_string(),
            namespace: "household".to_string(),
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        let loaded: Config = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_namespace_uses_default() {
        let json = r#"{"data_dir": "/tmp/test"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.namespace, "pocket");
        assert_eq!(config.store_path(), PathBuf::from("/tmp/test/pocket.db"));
        assert_eq!(config.backups_dir(), PathBuf::from("/tmp/test/backups"));
    }

    #[test]
    fn test_default_has_data_dir() {
        let config = Config::default();
        assert!(!config.data_dir.is_empty());
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
    }

    #[test]
    fn test_resolve_keeps_unknown_paths() {
        assert_eq!(resolve(Some("/no/such/dir")).data_dir, "/no/such/dir");
    }

    #[test]
    fn test_resolve_expands_home() {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        assert_eq!(resolve(Some("~/ledger")).data_path(), home.join("ledger"));
        assert_eq!(resolve(Some("~")).data_path(), home);
    }

    #[test]
    fn test_resolve_leaves_tilde_user_paths() {
        assert_eq!(resolve(Some("~alice/books")).data_dir, "~alice/books");
    }

    #[test]
    fn test_resolve_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve(Some(dir.path().to_str().unwrap()));
        let expected = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(config.data_path(), expected);
    }
}
