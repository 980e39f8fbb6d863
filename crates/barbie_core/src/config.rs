//! Process-level catalog configuration.
//!
//! # Responsibility
//! - Resolve the storage location and logging settings once at startup.
//!
//! # Invariants
//! - A `CatalogConfig` is immutable after construction and passed explicitly;
//!   there is no global storage path.

use crate::logging::default_log_level;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "barbie";
const DB_FILE_NAME: &str = "barbie_movies.db";
const LOG_DIR_NAME: &str = "logs";
const FALLBACK_DATA_DIR: &str = "data";

/// Resolved settings for one process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
}

impl CatalogConfig {
    /// Applies defaults for every setting the caller left unset.
    ///
    /// Defaults live under the platform data directory
    /// (`<data_dir>/barbie/`), or `./data/` when no such directory exists.
    pub fn resolve(
        db_path: Option<PathBuf>,
        log_dir: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Self {
        let data_root = default_data_root();
        Self {
            db_path: db_path.unwrap_or_else(|| data_root.join(DB_FILE_NAME)),
            log_dir: absolutize(log_dir.unwrap_or_else(|| data_root.join(LOG_DIR_NAME))),
            log_level: log_level.unwrap_or_else(|| default_log_level().to_string()),
        }
    }
}

fn default_data_root() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join(APP_DIR_NAME),
        None => PathBuf::from(FALLBACK_DATA_DIR),
    }
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::CatalogConfig;
    use std::path::PathBuf;

    #[test]
    fn explicit_values_win_over_defaults() {
        let config = CatalogConfig::resolve(
            Some(PathBuf::from("/tmp/catalog.db")),
            Some(PathBuf::from("/tmp/catalog-logs")),
            Some("warn".to_string()),
        );
        assert_eq!(config.db_path, PathBuf::from("/tmp/catalog.db"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/catalog-logs"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn defaults_use_catalog_file_name_and_absolute_log_dir() {
        let config = CatalogConfig::resolve(None, Some(PathBuf::from("logs")), None);
        assert!(config.db_path.ends_with("barbie_movies.db"));
        assert!(config.log_dir.is_absolute());
        assert!(!config.log_level.is_empty());
    }
}
