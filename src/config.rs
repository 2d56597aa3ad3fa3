use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Where configuration is read from unless told otherwise.
pub const DEFAULT_CONFIG_FILE: &str = "Elections.toml";
/// Prefix of the environment variables that override the config file.
pub const ENV_PREFIX: &str = "ELECTIONS_";
/// SQLite's name for a private, in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Application configuration, derived from `Elections.toml` and `ELECTIONS_*`
/// environment variables on top of built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    database: String,
    log_config: String,
    unique_student_ids: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: IN_MEMORY.to_string(),
            log_config: "log4rs.yaml".to_string(),
            unique_student_ids: true,
        }
    }
}

impl Config {
    /// The layered configuration sources: defaults, then the file at `path`
    /// (if it exists), then the environment.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load the configuration from the default sources.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    /// Path of the SQLite database file.
    /// Configured via `ELECTIONS_DATABASE`.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Path of the log4rs YAML configuration.
    /// Configured via `ELECTIONS_LOG_CONFIG`.
    pub fn log_config(&self) -> &Path {
        Path::new(&self.log_config)
    }

    /// Whether storage itself rejects a second student with the same student ID.
    /// Configured via `ELECTIONS_UNIQUE_STUDENT_IDS`.
    pub fn unique_student_ids(&self) -> bool {
        self.unique_student_ids
    }

    pub fn database_config(&self) -> DbConfig {
        DbConfig {
            path: self.database.clone(),
            unique_student_ids: self.unique_student_ids,
        }
    }
}

/// Configuration for the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub path: String,
    pub unique_student_ids: bool,
}

impl DbConfig {
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Config::default().database_config()
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = Config::load(DEFAULT_CONFIG_FILE)?;
            assert_eq!(config, Config::default());
            assert!(config.database_config().is_in_memory());
            assert_eq!(config.log_config(), Path::new("log4rs.yaml"));
            Ok(())
        });
    }

    #[test]
    fn file_then_environment() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                    database = "elections.db"
                    unique_student_ids = false
                "#,
            )?;
            let config = Config::load(DEFAULT_CONFIG_FILE)?;
            assert_eq!(config.database(), "elections.db");
            assert!(!config.unique_student_ids());

            jail.set_env("ELECTIONS_DATABASE", "override.db");
            let config = Config::load(DEFAULT_CONFIG_FILE)?;
            assert_eq!(
                config.database_config(),
                DbConfig {
                    path: "override.db".to_string(),
                    unique_student_ids: false,
                }
            );
            Ok(())
        });
    }

    #[test]
    fn malformed_file() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, "unique_student_ids = \"maybe\"")?;
            assert!(Config::load(DEFAULT_CONFIG_FILE).is_err());
            Ok(())
        });
    }
}
