//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

const DEFAULT_POSTS_PATH: &str = "./posts";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    /// Directory of Markdown blog posts.
    pub posts_path: PathBuf,
    /// Public base URL of this API; the origin folder-creation requests target.
    pub public_api_host: String,
    /// Browser origin allowed by CORS.
    pub cors_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads only `POSTS_PATH`, for tools that never touch the database.
    /// Callers load `.env` themselves.
    pub fn posts_path_from_env() -> PathBuf {
        Self::posts_path_from_lookup(|key| std::env::var(key).ok())
    }

    pub fn posts_path_from_lookup<F>(lookup: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("POSTS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_POSTS_PATH))
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server and Database Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Content and Client Settings ---
        let posts_path = Self::posts_path_from_lookup(&lookup);

        let public_api_host =
            lookup("PUBLIC_API_HOST").unwrap_or_else(|| "http://localhost:3000".to_string());
        if !public_api_host.starts_with("http://") && !public_api_host.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "PUBLIC_API_HOST".to_string(),
                format!("'{}' must start with http:// or https://", public_api_host),
            ));
        }

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            posts_path,
            public_api_host: public_api_host.trim_end_matches('/').to_string(),
            cors_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/known")]).unwrap();
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.posts_path, PathBuf::from("./posts"));
        assert_eq!(config.public_api_host, "http://localhost:3000");
    }

    #[test]
    fn database_url_is_required() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(var) if var == "DATABASE_URL"));
    }

    #[test]
    fn public_api_host_loses_trailing_slash() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/known"),
            ("PUBLIC_API_HOST", "https://api.example.com/"),
        ])
        .unwrap();
        assert_eq!(config.public_api_host, "https://api.example.com");
    }

    #[test]
    fn posts_path_does_not_need_database_url() {
        assert_eq!(Config::posts_path_from_lookup(|_| None), PathBuf::from("./posts"));
        let custom = Config::posts_path_from_lookup(|key| (key == "POSTS_PATH").then(|| "/srv/posts".to_string()));
        assert_eq!(custom, PathBuf::from("/srv/posts"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let base = ("DATABASE_URL", "postgres://localhost/known");
        assert!(load(&[base, ("BIND_ADDRESS", "nowhere")]).is_err());
        assert!(load(&[base, ("RUST_LOG", "chatty")]).is_err());
        assert!(load(&[base, ("PUBLIC_API_HOST", "api.example.com")]).is_err());
    }
}
