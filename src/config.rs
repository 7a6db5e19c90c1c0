//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use std::net::Ipv4Addr;
use thiserror::Error;
use tokio_postgres::config::Host;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0), // Bind to 0.0.0.0 for Docker
            port: 3000,
        }
    }
}

/// TLS mode for the database connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    Disable,
    Require,
}

impl SslMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "require" | "verify-ca" | "verify-full" => SslMode::Require,
            _ => SslMode::Disable,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_pool_size: usize,
    pub ssl_mode: SslMode,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "postgres".to_string(),
            max_pool_size: 10,
            ssl_mode: SslMode::Disable,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Empty means any origin is allowed
    pub allowed_origins: Vec<String>,
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first if present
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_defaults = ServerConfig::default();
        let server = ServerConfig {
            host: lookup("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(server_defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(server_defaults.port),
        };

        let max_pool_size = lookup("DB_MAX_CONNECTIONS")
            .and_then(|s| s.parse().ok())
            .filter(|size: &usize| *size > 0)
            .unwrap_or(10);

        // DATABASE_URL wins over the individual DB_* variables
        let database = if let Some(database_url) = lookup("DATABASE_URL") {
            Self::parse_database_url(&database_url, max_pool_size)?
        } else {
            let defaults = DatabaseConfig::default();
            DatabaseConfig {
                host: lookup("DB_HOST").unwrap_or(defaults.host),
                port: lookup("DB_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.port),
                user: lookup("DB_USER").unwrap_or(defaults.user),
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                database: lookup("DB_NAME").unwrap_or(defaults.database),
                max_pool_size,
                ssl_mode: lookup("DB_SSLMODE")
                    .map(|m| SslMode::parse(&m))
                    .unwrap_or(defaults.ssl_mode),
            }
        };

        let cors = CorsConfig {
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        };

        Ok(Self {
            server,
            database,
            cors,
        })
    }

    /// Parse a DATABASE_URL connection string (postgresql://...)
    ///
    /// `tokio_postgres::Config` does the parsing so percent-encoded
    /// credentials come out decoded.
    fn parse_database_url(url: &str, max_pool_size: usize) -> Result<DatabaseConfig, ConfigError> {
        if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
            return Err(ConfigError::InvalidValue(
                "Invalid DATABASE_URL format (expected postgresql://...)".to_string(),
            ));
        }

        let config = url
            .parse::<tokio_postgres::Config>()
            .map_err(|e| ConfigError::InvalidValue(format!("Failed to parse DATABASE_URL: {}", e)))?;

        let host = match config.get_hosts().first() {
            Some(Host::Tcp(host)) if !host.is_empty() => host.clone(),
            Some(Host::Tcp(_)) | None => {
                return Err(ConfigError::InvalidValue(
                    "Missing host in DATABASE_URL".to_string(),
                ))
            }
            Some(_) => {
                return Err(ConfigError::InvalidValue(
                    "Unix socket connections are not supported".to_string(),
                ))
            }
        };

        let database = config
            .get_dbname()
            .filter(|db| !db.is_empty())
            .ok_or_else(|| {
                ConfigError::InvalidValue("Missing database name in DATABASE_URL".to_string())
            })?
            .to_string();

        let ssl_mode = match config.get_ssl_mode() {
            tokio_postgres::config::SslMode::Require => SslMode::Require,
            _ => SslMode::Disable,
        };

        Ok(DatabaseConfig {
            host,
            port: config.get_ports().first().copied().unwrap_or(5432),
            user: config.get_user().unwrap_or_default().to_string(),
            password: config
                .get_password()
                .map(|p| String::from_utf8_lossy(p).into_owned())
                .unwrap_or_default(),
            database,
            max_pool_size,
            ssl_mode,
        })
    }
}
