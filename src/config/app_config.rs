use std::{env, str::FromStr, time::Duration};

use crate::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageBackend,
    pub database: DatabaseConfig,
    pub cors: Option<CorsConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Dev,
    Prod,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for reading, handling and answering one request.
    pub timeout: Duration,
    pub max_body_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Empty when the memory backend is selected.
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl FromStr for Environment {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(AppError::ConfigError(format!(
                "Invalid APP_ENV value: {}",
                other
            ))),
        }
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::ConfigError(format!(
                "Invalid STORAGE_BACKEND value: {}",
                other
            ))),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let environment: Environment = var_or("APP_ENV", "local").parse()?;
        let storage: StorageBackend = var_or("STORAGE_BACKEND", "postgres").parse()?;

        let database_url = match (storage, lookup("DATABASE_URL")) {
            (_, Some(url)) => url,
            (StorageBackend::Memory, None) => String::new(),
            (StorageBackend::Postgres, None) => {
                return Err(AppError::ConfigError("DATABASE_URL is not set".to_string()));
            }
        };

        let cors = lookup("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .map(|allowed_origins| CorsConfig { allowed_origins });

        Ok(Self {
            environment,
            server: ServerConfig {
                host: var_or("HOST", "0.0.0.0"),
                port: parse_var("PORT", &var_or("PORT", "8080"))?,
                timeout: parse_timeout(&var_or("HTTP_TIMEOUT_SECS", "4"))?,
                max_body_size: parse_var("MAX_BODY_SIZE", &var_or("MAX_BODY_SIZE", "1048576"))?,
            },
            storage,
            database: DatabaseConfig {
                url: database_url,
                max_connections: parse_var(
                    "DB_MAX_CONNECTIONS",
                    &var_or("DB_MAX_CONNECTIONS", "10"),
                )?,
            },
            cors,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::ConfigError(format!("Invalid {} value", key)))
}

/// A zero timeout would fail every request, so it is rejected.
fn parse_timeout(value: &str) -> Result<Duration> {
    match parse_var::<u64>("HTTP_TIMEOUT_SECS", value)? {
        0 => Err(AppError::ConfigError(
            "Invalid HTTP_TIMEOUT_SECS value".to_string(),
        )),
        secs => Ok(Duration::from_secs(secs)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config =
            AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/shop")]))
                .unwrap();

        assert_eq!(config.environment, Environment::Local);
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert_eq!(config.server.timeout, Duration::from_secs(4));
        assert_eq!(config.database.max_connections, 10);
        assert!(config.cors.is_none());
    }

    #[test]
    fn postgres_backend_requires_database_url() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(msg) if msg.contains("DATABASE_URL")));
    }

    #[test]
    fn memory_backend_needs_no_database() {
        let config = AppConfig::from_lookup(lookup(&[("STORAGE_BACKEND", "memory")])).unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.database.url.is_empty());
    }

    #[test]
    fn invalid_numbers_name_the_variable() {
        let err = AppConfig::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "memory"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();

        assert!(matches!(err, AppError::ConfigError(msg) if msg == "Invalid PORT value"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "memory"),
            ("HTTP_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();

        assert!(
            matches!(err, AppError::ConfigError(msg) if msg == "Invalid HTTP_TIMEOUT_SECS value")
        );
    }

    #[test]
    fn environment_and_cors_are_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "memory"),
            ("APP_ENV", "PROD"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ]))
        .unwrap();

        assert_eq!(config.environment, Environment::Prod);
        assert_eq!(
            config.cors.unwrap().allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn unknown_environment_is_rejected() {
        assert!("staging".parse::<Environment>().is_err());
    }
}
