//! Application configuration management.
//!
//! Only the store and the command-line front end read configuration; the
//! capacity engine receives everything it needs as explicit parameters.

use std::path::PathBuf;

use serde::Deserialize;

/// Prefix for environment overrides, e.g. `PLANNER__DATA__DIR`.
const ENV_PREFIX: &str = "PLANNER";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Snapshot data location.
    #[serde(default)]
    pub data: DataConfig,
    /// CSV export settings.
    #[serde(default)]
    pub export: ExportConfig,
    /// Report memoization settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Change polling settings.
    #[serde(default)]
    pub watch: WatchConfig,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Where the budget and personnel documents live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding the document files.
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
    /// File name of the budgets collection.
    #[serde(default = "default_budgets_file")]
    pub budgets_file: String,
    /// File name of the personnel collection.
    #[serde(default = "default_personnel_file")]
    pub personnel_file: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_budgets_file() -> String {
    "budgets.json".to_string()
}

fn default_personnel_file() -> String {
    "personnel.json".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            budgets_file: default_budgets_file(),
            personnel_file: default_personnel_file(),
        }
    }
}

impl DataConfig {
    /// Full path of the budgets collection file.
    #[must_use]
    pub fn budgets_path(&self) -> PathBuf {
        self.dir.join(&self.budgets_file)
    }

    /// Full path of the personnel collection file.
    #[must_use]
    pub fn personnel_path(&self) -> PathBuf {
        self.dir.join(&self.personnel_file)
    }
}

/// CSV export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Default output path for `export`.
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("budgets_export.csv")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

/// Report cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of memoized reports.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live of a memoized report in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_max_capacity() -> u64 {
    16
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Change polling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Interval between checks of the document files.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    2000
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "planner=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `config/` files and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Loads configuration from `{dir}/default`, `{dir}/{RUN_MODE}` and
    /// `PLANNER__*` environment variables, later sources winning.
    ///
    /// Missing files are skipped; every setting has a default.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source is malformed.
    pub fn load_from(dir: &str) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_CONFIG_DIR: &str = "does-not-exist";

    #[test]
    fn test_defaults_without_sources() {
        let config = temp_env::with_vars_unset(
            [
                "PLANNER__DATA__DIR",
                "PLANNER__CACHE__MAX_CAPACITY",
                "PLANNER__LOG__FILTER",
            ],
            || AppConfig::load_from(NO_CONFIG_DIR).unwrap(),
        );

        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.data.budgets_path(), PathBuf::from("data/budgets.json"));
        assert_eq!(
            config.data.personnel_path(),
            PathBuf::from("data/personnel.json")
        );
        assert_eq!(config.export.csv_path, PathBuf::from("budgets_export.csv"));
        assert_eq!(config.cache.max_capacity, 16);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.watch.poll_interval_ms, 2000);
        assert_eq!(config.log.filter, "planner=info");
        assert!(!config.log.json);
    }

    #[test]
    fn test_environment_overrides() {
        let config = temp_env::with_vars(
            [
                ("PLANNER__DATA__DIR", Some("/srv/planner")),
                ("PLANNER__CACHE__MAX_CAPACITY", Some("4")),
                ("PLANNER__LOG__FILTER", Some("planner=debug")),
            ],
            || AppConfig::load_from(NO_CONFIG_DIR).unwrap(),
        );

        assert_eq!(config.data.dir, PathBuf::from("/srv/planner"));
        assert_eq!(
            config.data.budgets_path(),
            PathBuf::from("/srv/planner/budgets.json")
        );
        assert_eq!(config.cache.max_capacity, 4);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.log.filter, "planner=debug");
    }
}
