use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("unsupported DB_ENGINE '{0}': only postgres is supported")]
    UnsupportedEngine(String),
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub dish_list_limit: i64,
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

impl DatabaseConfig {
    /// `DATABASE_URL` wins; otherwise the URL is assembled from the `DB_*` parts.
    pub fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let pool_size = parsed(lookup, "DB_POOL_SIZE", 20u32)?;
        if pool_size == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_POOL_SIZE",
                value: pool_size.to_string(),
            });
        }

        if let Some(url) = lookup("DATABASE_URL") {
            return Ok(Self { url, pool_size });
        }

        let engine = lookup("DB_ENGINE").unwrap_or_else(|| "postgres".to_string());
        let engine = match engine.to_lowercase().as_str() {
            "postgres" | "postgresql" => "postgres",
            _ => return Err(ConfigError::UnsupportedEngine(engine)),
        };
        let host = lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string());
        let port = parsed(lookup, "DB_PORT", 5432u16)?;
        let user = lookup("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?;
        let password = lookup("DB_PASSWORD").unwrap_or_default();
        let database = lookup("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?;

        Ok(Self {
            url: format!("{engine}://{user}:{password}@{host}:{port}/{database}"),
            pool_size,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database = DatabaseConfig::from_lookup(&lookup)?;
        let server = ServerConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT", 5001u16)?,
        };
        let dish_list_limit = parsed(&lookup, "DISH_LIST_LIMIT", 10i64)?;
        if dish_list_limit < 0 {
            return Err(ConfigError::Invalid {
                key: "DISH_LIST_LIMIT",
                value: dish_list_limit.to_string(),
            });
        }

        Ok(Self {
            database,
            server,
            dish_list_limit,
        })
    }
}
