pub mod server;
pub mod storage;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{0} has an invalid value: {1}")]
    Invalid(&'static str, String),
}

/// Source of configuration values. The process environment in production,
/// a plain map in tests.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(key))
    }

    fn parsed_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<T>()
                .map_err(|e| ConfigError::Invalid(key, e.to_string())),
            _ => Ok(default),
        }
    }
}

pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
impl ConfigSource for std::collections::HashMap<&str, &str> {
    fn get(&self, key: &str) -> Option<String> {
        std::collections::HashMap::get(self, key).map(|v| v.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: server::ServerConfig,
    pub database: server::DatabaseConfig,
    pub storage: storage::StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine; the environment may already be populated.
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Error loading .env file: {}", e);
            }
        }

        Self::from_source(&EnvSource)
    }

    pub fn from_source(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        Ok(Self {
            server: server::ServerConfig::from_source(source)?,
            database: server::DatabaseConfig::from_source(source)?,
            storage: storage::StorageConfig::from_source(source)?,
        })
    }
}
