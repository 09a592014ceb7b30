//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Credit limit assigned to new accounts when DEFAULT_CREDIT_LIMIT is unset
const DEFAULT_CREDIT_LIMIT: &str = "1000.00";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Credit limit assigned to newly created accounts
    pub default_credit_limit: Decimal,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingEnv("DATABASE_URL"))?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS"))?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let default_credit_limit = env::var("DEFAULT_CREDIT_LIMIT")
            .unwrap_or_else(|_| DEFAULT_CREDIT_LIMIT.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("DEFAULT_CREDIT_LIMIT"))?;
        if default_credit_limit < Decimal::ZERO {
            return Err(ConfigError::InvalidValue("DEFAULT_CREDIT_LIMIT"));
        }

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            default_credit_limit,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// The built-in default credit limit for new accounts
    pub fn builtin_default_credit_limit() -> Decimal {
        Decimal::from_str(DEFAULT_CREDIT_LIMIT).expect("Invalid DEFAULT_CREDIT_LIMIT constant")
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
