//! Process configuration, read once at startup and passed into handlers.
//!
//! Every loader has a `from_lookup` variant taking a key lookup function so
//! callers other than `main` never read the process environment.

use std::str::FromStr;
use std::time::Duration;

use crate::contract::PRESIGN_TTL;
use crate::storage_keys::uploads_bucket_name;

pub const DEFAULT_API_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_PORT: u16 = 5055;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid port number, got '{value}'")]
    InvalidPort { key: &'static str, value: String },
    #[error("unknown deployment environment '{0}' (expected 'dev' or 'prod')")]
    UnknownEnvironment(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeploymentEnvironment {
    #[default]
    Dev,
    Prod,
}

impl DeploymentEnvironment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

impl FromStr for DeploymentEnvironment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            _ => Err(ConfigError::UnknownEnvironment(value.to_string())),
        }
    }
}

/// Settings of the OCR queue worker. Both values default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerConfig {
    pub table_name: String,
    pub bucket_name: String,
}

impl HandlerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            table_name: lookup("TABLE_NAME").unwrap_or_default(),
            bucket_name: lookup("BUCKET_NAME").unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub environment: DeploymentEnvironment,
    pub bucket_name: String,
    pub allowed_origin: String,
    pub presign_ttl: Duration,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match non_empty("API_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort {
                    key: "API_PORT",
                    value,
                })?,
            None => DEFAULT_API_PORT,
        };

        let environment = match non_empty("DEPLOY_ENV") {
            Some(value) => value.parse()?,
            None => DeploymentEnvironment::default(),
        };

        Ok(Self {
            host: non_empty("API_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            port,
            environment,
            bucket_name: non_empty("BUCKET_NAME")
                .unwrap_or_else(|| uploads_bucket_name(environment)),
            allowed_origin: non_empty("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            presign_ttl: PRESIGN_TTL,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
