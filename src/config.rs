use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Directories searched for the config file, in order.
const SEARCH_PATHS: &[&str] = &["/etc/noterfy", "/run/secrets", "."];

/// Application-level configuration. Every field has a default, so a
/// partial or missing config file is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port the API server listens on.
    pub port: u16,
    /// Per-IP request budget per second for the rate-limit middleware.
    pub rate_limit_per_second: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 50001,
            rate_limit_per_second: 25,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub file: FileStoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Directory holding the file store's data file.
    pub path: PathBuf,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load the configuration, searching the well-known directories
    /// for `config.yaml`. A missing file yields the defaults. The
    /// `NOTERFY_CONFIG` env var overrides the search with an explicit
    /// path.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var("NOTERFY_CONFIG") {
            return Self::load_from_file(Path::new(&path));
        }

        for dir in SEARCH_PATHS {
            let candidate = Path::new(dir).join(CONFIG_FILE_NAME);
            if candidate.exists() {
                return Self::load_from_file(&candidate);
            }
        }

        Ok(Self::default())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_no_file() {
        let config = Config::default();
        assert_eq!(config.server.port, 50001);
        assert_eq!(config.server.rate_limit_per_second, 25);
        assert_eq!(config.store.file.path, PathBuf::from("."));
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "server:\n  port: 9000").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.rate_limit_per_second, 25);
        assert_eq!(config.store.file.path, PathBuf::from("."));
    }

    #[test]
    fn full_file_overrides_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "server:\n  port: 8080\n  rate_limit_per_second: 5\nstore:\n  file:\n    path: /var/lib/noterfy\n",
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.rate_limit_per_second, 5);
        assert_eq!(config.store.file.path, PathBuf::from("/var/lib/noterfy"));
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_file(&dir.path().join("missing.yaml")).is_err());
    }
}
