//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_JWT_EXPIRY_HOURS, DEFAULT_MAX_UPLOAD_BYTES,
    DEFAULT_PHONE_LOGIN_DOMAIN, DEFAULT_PUBLIC_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_STORAGE_BUCKET, DEFAULT_STORAGE_ROOT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendMode,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub bootstrap: Option<BootstrapAdmin>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
    pub request_timeout_secs: u64,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Which collaborators back the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// PostgreSQL + Redis + filesystem object store
    Postgres,
    /// Everything in process memory (local demos)
    Memory,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// Login configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Candidates log in with their phone number, stored as `<phone>@<domain>`
    pub phone_login_domain: String,
}

/// Object storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub root: PathBuf,
    pub bucket: String,
    pub public_base_url: String,
    pub max_upload_bytes: usize,
}

/// Administrator created at startup when no admin exists yet
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let backend = backend_from_env()?;

        Ok(Self {
            server: ServerConfig::from_env()?,
            backend,
            database: DatabaseConfig::from_env(backend)?,
            redis: RedisConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            bootstrap: BootstrapAdmin::from_env()?,
        })
    }

    /// Configuration suitable for tests and in-memory runs
    pub fn for_memory(jwt_secret: &str) -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                rust_log: "info".to_string(),
                log_format: LogFormat::Pretty,
                request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            },
            backend: BackendMode::Memory,
            database: DatabaseConfig {
                url: String::new(),
                max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            },
            redis: RedisConfig {
                url: String::new(),
            },
            jwt: JwtConfig {
                secret: jwt_secret.to_string(),
                expiry_hours: DEFAULT_JWT_EXPIRY_HOURS,
            },
            auth: AuthConfig {
                phone_login_domain: DEFAULT_PHONE_LOGIN_DOMAIN.to_string(),
            },
            storage: StorageConfig {
                root: PathBuf::from(DEFAULT_STORAGE_ROOT),
                bucket: DEFAULT_STORAGE_BUCKET.to_string(),
                public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
            bootstrap: None,
        }
    }
}

fn backend_from_env() -> Result<BackendMode, ConfigError> {
    match env::var("STORE_BACKEND")
        .unwrap_or_else(|_| "postgres".to_string())
        .as_str()
    {
        "postgres" => Ok(BackendMode::Postgres),
        "memory" => Ok(BackendMode::Memory),
        _ => Err(ConfigError::InvalidValue("STORE_BACKEND".to_string())),
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                Ok("pretty") | Err(_) => LogFormat::Pretty,
                Ok(_) => return Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
            },
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()))?,
        })
    }
}

impl DatabaseConfig {
    fn from_env(backend: BackendMode) -> Result<Self, ConfigError> {
        let url = match (env::var("DATABASE_URL"), backend) {
            (Ok(url), _) => url,
            (Err(_), BackendMode::Memory) => String::new(),
            (Err(_), BackendMode::Postgres) => {
                return Err(ConfigError::Missing("DATABASE_URL".to_string()));
            }
        };

        Ok(Self {
            url,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl RedisConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| DEFAULT_JWT_EXPIRY_HOURS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_EXPIRY_HOURS".to_string()))?,
        })
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            phone_login_domain: env::var("PHONE_LOGIN_DOMAIN")
                .unwrap_or_else(|_| DEFAULT_PHONE_LOGIN_DOMAIN.to_string()),
        })
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            root: PathBuf::from(
                env::var("STORAGE_ROOT").unwrap_or_else(|_| DEFAULT_STORAGE_ROOT.to_string()),
            ),
            bucket: env::var("STORAGE_BUCKET").unwrap_or_else(|_| DEFAULT_STORAGE_BUCKET.to_string()),
            public_base_url: env::var("STORAGE_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MAX_UPLOAD_BYTES".to_string()))?,
        })
    }
}

impl BootstrapAdmin {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(email) = env::var("BOOTSTRAP_ADMIN_EMAIL") else {
            return Ok(None);
        };
        let password = env::var("BOOTSTRAP_ADMIN_PASSWORD")
            .map_err(|_| ConfigError::Missing("BOOTSTRAP_ADMIN_PASSWORD".to_string()))?;

        Ok(Some(Self {
            email,
            password,
            full_name: env::var("BOOTSTRAP_ADMIN_NAME").unwrap_or_else(|_| "Administrateur".to_string()),
        }))
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_config_defaults() {
        let config = Config::for_memory("secret");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.backend, BackendMode::Memory);
        assert_eq!(config.storage.bucket, "candidatures");
        assert_eq!(config.auth.phone_login_domain, "jee.bf");
        assert!(config.bootstrap.is_none());
    }
}
