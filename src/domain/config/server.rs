use super::{ConfigError, ConfigSource};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    const DEFAULT_PORT: u16 = 8080;
    const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

    pub fn from_source(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let host = source
            .get("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let cors_allowed_origins = source
            .get("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port: source.parsed_or("PORT", Self::DEFAULT_PORT)?,
            cors_allowed_origins,
            max_upload_bytes: source
                .parsed_or("MAX_UPLOAD_BYTES", Self::DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

    pub fn from_source(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        Ok(Self {
            url: source.required("DATABASE_URL")?,
            max_connections: source
                .parsed_or("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            acquire_timeout_secs: source
                .parsed_or("DB_ACQUIRE_TIMEOUT_SECS", Self::DEFAULT_ACQUIRE_TIMEOUT_SECS)?,
        })
    }
}
