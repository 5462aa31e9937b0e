//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first, if present.

use std::env;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_PROJECT_ID: &str = "local-dev";

/// Where records are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory; data is lost on restart.
    Memory,
    Firestore,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "firestore" => Ok(StorageBackend::Firestore),
            other => Err(ConfigError::Invalid {
                var: "DATABASE_BACKEND",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (used by the Firestore backend)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    pub storage_backend: StorageBackend,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build configuration from a variable lookup function.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = match var("DATABASE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => StorageBackend::Memory,
        };

        let gcp_project_id = match (var("GCP_PROJECT_ID"), storage_backend) {
            (Some(id), _) => id,
            (None, StorageBackend::Firestore) => return Err(ConfigError::Missing("GCP_PROJECT_ID")),
            (None, StorageBackend::Memory) => DEFAULT_PROJECT_ID.to_string(),
        };

        let port = match var("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            frontend_url: var("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            gcp_project_id,
            port,
            storage_backend,
        })
    }

    /// Config for tests: in-memory storage.
    pub fn test_default() -> Self {
        Self {
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            gcp_project_id: "test-project".to_string(),
            port: DEFAULT_PORT,
            storage_backend: StorageBackend::Memory,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
