//! Connection configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local
//! development.

use mongodb::options::ClientOptions;
use std::env;
use std::time::Duration;

use crate::error::MagicError;

const DEFAULT_SERVER_SELECTION_TIMEOUT_SECS: u64 = 10;

/// Connection configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string (may name a default database)
    pub uri: String,
    /// Additional databases to load in multi-database mode
    pub databases: Vec<String>,
    /// Application name reported to the server
    pub app_name: Option<String>,
    /// How long the driver waits for a suitable server
    pub server_selection_timeout: Duration,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017/magic_mongo_test".to_string(),
            databases: Vec::new(),
            app_name: Some("magic-mongo".to_string()),
            server_selection_timeout: Duration::from_secs(DEFAULT_SERVER_SELECTION_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let timeout_secs = match env::var("MAGIC_MONGO_SERVER_SELECTION_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                ConfigError::Invalid("MAGIC_MONGO_SERVER_SELECTION_TIMEOUT_SECS", raw.clone())
            })?,
            Err(_) => DEFAULT_SERVER_SELECTION_TIMEOUT_SECS,
        };

        Ok(Self {
            uri: env::var("MONGODB_URI")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("MONGODB_URI"))?,
            databases: env::var("MAGIC_MONGO_DATABASES")
                .map(|v| parse_database_list(&v))
                .unwrap_or_default(),
            app_name: env::var("MAGIC_MONGO_APP_NAME")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            server_selection_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Parse the connection string and apply the configured driver options.
    pub async fn client_options(&self) -> Result<ClientOptions, MagicError> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(|e| MagicError::InvalidConnectionString(e.to_string()))?;

        if let Some(app_name) = &self.app_name {
            options.app_name = Some(app_name.clone());
        }
        options.server_selection_timeout = Some(self.server_selection_timeout);

        Ok(options)
    }
}

/// Split a comma separated list of database names, dropping blanks.
fn parse_database_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("MONGODB_URI", " mongodb://localhost:27017/app ");
        env::set_var("MAGIC_MONGO_DATABASES", "analytics, ,audit");
        env::set_var("MAGIC_MONGO_APP_NAME", "inventory");
        env::remove_var("MAGIC_MONGO_SERVER_SELECTION_TIMEOUT_SECS");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.uri, "mongodb://localhost:27017/app");
        assert_eq!(config.databases, vec!["analytics", "audit"]);
        assert_eq!(config.app_name.as_deref(), Some("inventory"));
        assert_eq!(config.server_selection_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_parse_database_list() {
        assert!(parse_database_list("").is_empty());
        assert_eq!(parse_database_list("a,b"), vec!["a", "b"]);
        assert_eq!(parse_database_list(" a ,, b "), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_client_options_applies_settings() {
        let config = Config {
            server_selection_timeout: Duration::from_secs(3),
            ..Config::default()
        };

        let options = config.client_options().await.unwrap();

        assert_eq!(options.app_name.as_deref(), Some("magic-mongo"));
        assert_eq!(options.default_database.as_deref(), Some("magic_mongo_test"));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn test_client_options_rejects_bad_uri() {
        let config = Config {
            uri: "not-a-mongo-uri".to_string(),
            ..Config::default()
        };

        let err = config.client_options().await.unwrap_err();
        assert!(matches!(err, MagicError::InvalidConnectionString(_)));
    }
}
