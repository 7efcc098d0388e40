//! Settings file
//!
//! `settings.ron` under the platform config directory. Every field has a
//! default, so a missing file or a partial one is fine.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::FETCH_LIMIT;

/// Environment variable overriding `store_url`
pub const ENV_STORE_URL: &str = "TIL_STORE_URL";
/// Environment variable overriding `api_key`
pub const ENV_STORE_KEY: &str = "TIL_STORE_KEY";
/// Environment variable overriding `table`
pub const ENV_TABLE: &str = "TIL_TABLE";

/// Where facts are read from and written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backend {
    /// Hosted table over its REST API
    Rest,
    /// In-process table seeded with sample facts
    Memory,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("could not write {path}: {message}")]
    Write { path: PathBuf, message: String },
    #[error("{0} is required for the REST backend (set it in settings.ron or via {1})")]
    Missing(&'static str, &'static str),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("{0} is capped at {1}")]
    TooLarge(&'static str, usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: Backend,
    /// Project URL of the hosted store, e.g. `https://xyz.supabase.co`
    pub store_url: String,
    /// Public (anon) API key
    pub api_key: String,
    pub table: String,
    /// Row cap for list fetches, at most `FETCH_LIMIT`
    pub fetch_limit: usize,
    pub request_timeout_secs: u64,
    /// How long toasts stay on screen
    pub notice_secs: u64,
    /// Log file; defaults to `til.log` in the data directory
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: Backend::Rest,
            store_url: String::new(),
            api_key: String::new(),
            table: "facts".to_string(),
            fetch_limit: FETCH_LIMIT,
            request_timeout_secs: 30,
            notice_secs: 4,
            log_file: None,
        }
    }
}

impl Settings {
    /// Overlay values from the environment. `lookup` is `std::env::var` in the binary.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_STORE_URL).filter(|v| !v.is_empty()) {
            self.store_url = url;
        }
        if let Some(key) = lookup(ENV_STORE_KEY).filter(|v| !v.is_empty()) {
            self.api_key = key;
        }
        if let Some(table) = lookup(ENV_TABLE).filter(|v| !v.is_empty()) {
            self.table = table;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_limit == 0 {
            return Err(ConfigError::Zero("fetch_limit"));
        }
        if self.fetch_limit > FETCH_LIMIT {
            return Err(ConfigError::TooLarge("fetch_limit", FETCH_LIMIT));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Zero("request_timeout_secs"));
        }
        if self.backend == Backend::Rest {
            if self.store_url.trim().is_empty() {
                return Err(ConfigError::Missing("store_url", ENV_STORE_URL));
            }
            if self.api_key.trim().is_empty() {
                return Err(ConfigError::Missing("api_key", ENV_STORE_KEY));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn notice_lifetime(&self) -> Duration {
        Duration::from_secs(self.notice_secs)
    }

    /// Log file to write to
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| data_directory().join("til.log"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "todayilearned", "todayILearned")
}

/// Default settings file location
pub fn config_path() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        proj_dirs.config_dir().join("settings.ron")
    } else {
        // Fallback to current directory
        PathBuf::from("./settings.ron")
    }
}

/// Directory for the log file
pub fn data_directory() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".")
    }
}

/// Load settings from `path`; a missing file yields the defaults
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        log::info!("No settings at {:?}, using defaults", path);
        return Ok(Settings::default());
    }

    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: Settings = ron::from_str(&data).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    log::info!("Settings loaded from {:?}", path);
    Ok(settings)
}

/// Write settings to `path`, creating parent directories
pub fn save_settings(settings: &Settings, path: &Path) -> Result<(), ConfigError> {
    let write_err = |message: String| ConfigError::Write {
        path: path.to_path_buf(),
        message,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
    }
    let text = ron::ser::to_string_pretty(settings, ron::ser::PrettyConfig::default())
        .map_err(|e| write_err(e.to_string()))?;
    fs::write(path, text).map_err(|e| write_err(e.to_string()))?;

    log::info!("Settings saved to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("nope.ron")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.fetch_limit, 1000);
        assert_eq!(settings.table, "facts");
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, r#"(store_url: "https://abc.supabase.co", fetch_limit: 50)"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.store_url, "https://abc.supabase.co");
        assert_eq!(settings.fetch_limit, 50);
        assert_eq!(settings.backend, Backend::Rest);
        assert_eq!(settings.request_timeout_secs, 30);
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, "(fetch_limit: \"lots\")").unwrap();
        assert!(matches!(load_settings(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.ron");
        let settings = Settings {
            backend: Backend::Memory,
            notice_secs: 9,
            ..Settings::default()
        };
        save_settings(&settings, &path).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_STORE_URL, "https://env.supabase.co"),
            (ENV_STORE_KEY, "anon-key"),
            (ENV_TABLE, ""),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.apply_env(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(settings.store_url, "https://env.supabase.co");
        assert_eq!(settings.api_key, "anon-key");
        // Empty values don't clobber
        assert_eq!(settings.table, "facts");
    }

    #[test]
    fn test_validate() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Missing("store_url", _))
        ));

        settings.store_url = "https://abc.supabase.co".to_string();
        assert!(matches!(settings.validate(), Err(ConfigError::Missing("api_key", _))));

        settings.api_key = "key".to_string();
        assert!(settings.validate().is_ok());

        settings.fetch_limit = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::Zero("fetch_limit"))));
        settings.fetch_limit = 5000;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::TooLarge("fetch_limit", 1000))
        ));
        settings.fetch_limit = 50;
        assert!(settings.validate().is_ok());

        let memory = Settings {
            backend: Backend::Memory,
            ..Settings::default()
        };
        assert!(memory.validate().is_ok());
    }
}
