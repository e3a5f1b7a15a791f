//! Runtime configuration for hosts embedding the catalog core.
//!
//! # Responsibility
//! - Collect database location, busy timeout and logging settings.
//! - Resolve settings from `BOOKSHELF_*` environment variables.
//!
//! # Invariants
//! - Unset variables fall back to documented defaults; parsing never panics.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "BOOKSHELF_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "BOOKSHELF_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "BOOKSHELF_LOG_DIR";
pub const ENV_BUSY_TIMEOUT_MS: &str = "BOOKSHELF_BUSY_TIMEOUT_MS";

const DEFAULT_DB_FILE_NAME: &str = "bookshelf.sqlite3";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Settings needed to open the store and start logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files. Logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
    /// How long SQLite waits on a locked database before failing.
    pub busy_timeout_ms: u64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl LibraryConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(path) = non_blank(lookup(ENV_DB_PATH)) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = non_blank(lookup(ENV_LOG_LEVEL)) {
            config.log_level = level;
        }
        config.log_dir = non_blank(lookup(ENV_LOG_DIR)).map(PathBuf::from);
        if let Some(raw) = non_blank(lookup(ENV_BUSY_TIMEOUT_MS)) {
            config.busy_timeout_ms = raw
                .parse()
                .map_err(|err| format!("invalid {ENV_BUSY_TIMEOUT_MS} `{raw}`: {err}"))?;
        }

        Ok(config)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{LibraryConfig, ENV_BUSY_TIMEOUT_MS, ENV_DB_PATH, ENV_LOG_DIR};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = LibraryConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, LibraryConfig::default());
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = LibraryConfig::from_lookup(lookup_from(&[
            (ENV_DB_PATH, "/tmp/catalog.db"),
            (ENV_LOG_DIR, " /tmp/logs "),
            (ENV_BUSY_TIMEOUT_MS, "250"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/catalog.db"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(config.busy_timeout_ms, 250);
    }

    #[test]
    fn malformed_timeout_is_reported() {
        let err = LibraryConfig::from_lookup(lookup_from(&[(ENV_BUSY_TIMEOUT_MS, "soon")]))
            .unwrap_err();
        assert!(err.contains(ENV_BUSY_TIMEOUT_MS));
    }
}
