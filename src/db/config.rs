//! Database configuration from environment variables and config file.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::DbError;

/// MongoDB connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// MongoDB connection string
    #[serde(default = "default_uri")]
    pub uri: String,
    /// Database name
    #[serde(default = "default_database")]
    pub database: String,
    /// Server selection timeout in seconds
    #[serde(default = "default_selection_timeout")]
    pub selection_timeout_sec: u64,
    /// Application name reported to the server
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "zoo".to_string()
}

fn default_selection_timeout() -> u64 {
    30
}

fn default_app_name() -> String {
    "zoo-api".to_string()
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            selection_timeout_sec: default_selection_timeout(),
            app_name: default_app_name(),
        }
    }
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    mongo: Option<MongoConfig>,
}

impl MongoConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `MONGO_URI` (optional, default: mongodb://localhost:27017)
    /// - `MONGO_DATABASE` (optional, default: zoo)
    /// - `MONGO_SELECTION_TIMEOUT` (optional, default: 30): seconds to wait
    ///   for a reachable server before giving up
    pub fn from_env() -> Result<Self, DbError> {
        let defaults = Self::default();
        let uri = env::var("MONGO_URI").unwrap_or(defaults.uri);
        let database = env::var("MONGO_DATABASE").unwrap_or(defaults.database);
        let selection_timeout_sec = match env::var("MONGO_SELECTION_TIMEOUT") {
            Ok(raw) => raw.parse().map_err(|_| {
                DbError::configuration("MONGO_SELECTION_TIMEOUT must be a number of seconds")
            })?,
            Err(_) => defaults.selection_timeout_sec,
        };

        let config = Self {
            uri,
            database,
            selection_timeout_sec,
            app_name: defaults.app_name,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file with a `[mongo]` section.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            DbError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let parsed: ConfigFile = toml::from_str(&content).map_err(|e| {
            DbError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        let config = parsed.mongo.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, preferring a `zoo.toml` file when one exists in a
    /// standard location and falling back to environment variables.
    pub fn load() -> Result<Self, DbError> {
        let search_paths = [PathBuf::from("zoo.toml"), PathBuf::from("../zoo.toml")];
        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Self::from_env()
    }

    fn validate(&self) -> Result<(), DbError> {
        if self.uri.is_empty() {
            return Err(DbError::configuration("Mongo URI must not be empty"));
        }
        if !self.uri.starts_with("mongodb://") && !self.uri.starts_with("mongodb+srv://") {
            return Err(DbError::configuration(format!(
                "Invalid Mongo URI scheme in '{}'",
                self.uri
            )));
        }
        if self.database.is_empty() {
            return Err(DbError::configuration("Database name must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MongoConfig::default();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "zoo");
        assert_eq!(config.selection_timeout_sec, 30);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[mongo]
uri = "mongodb://db.example.com:27017"
database = "zoo_production"
selection_timeout_sec = 5
"#;

        let parsed: ConfigFile = toml::from_str(toml).unwrap();
        let config = parsed.mongo.unwrap();
        assert_eq!(config.uri, "mongodb://db.example.com:27017");
        assert_eq!(config.database, "zoo_production");
        assert_eq!(config.selection_timeout_sec, 5);
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let toml = r#"
[mongo]
database = "zoo_test"
"#;

        let parsed: ConfigFile = toml::from_str(toml).unwrap();
        let config = parsed.mongo.unwrap();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "zoo_test");
    }

    #[test]
    fn test_rejects_invalid_scheme() {
        let config = MongoConfig {
            uri: "postgres://localhost".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_database() {
        let config = MongoConfig {
            database: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_accepts_srv_scheme() {
        let config = MongoConfig {
            uri: "mongodb+srv://cluster.example.net".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
