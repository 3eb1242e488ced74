use std::path::PathBuf;

use super::{ConfigError, ConfigSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Local,
    Remote,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Local => "local",
            Provider::Remote => "remote",
        }
    }
}

/// Credentials and location of an S3-compatible bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteStorageSecrets {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub provider: Provider,
    pub uploads_dir: PathBuf,
    pub remote: Option<RemoteStorageSecrets>,
}

impl StorageConfig {
    const DEFAULT_UPLOADS_DIR: &'static str = "./uploads";
    const DEFAULT_REGION: &'static str = "us-east-1";

    pub fn from_source(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let provider = if is_truthy(source.get("CLOUD_STORAGE_ENABLED").as_deref()) {
            Provider::Remote
        } else {
            Provider::Local
        };

        let uploads_dir = source
            .get("UPLOADS_DIR")
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_UPLOADS_DIR.to_string())
            .into();

        let remote = match provider {
            Provider::Remote => Some(RemoteStorageSecrets {
                endpoint: source.required("STORAGE_ENDPOINT")?,
                region: source
                    .get("STORAGE_REGION")
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or_else(|| Self::DEFAULT_REGION.to_string()),
                access_key_id: source.required("STORAGE_ACCESS_KEY_ID")?,
                secret_access_key: source.required("STORAGE_SECRET_ACCESS_KEY")?,
                bucket_name: source.required("STORAGE_BUCKET")?,
            }),
            Provider::Local => None,
        };

        Ok(Self {
            provider,
            uploads_dir,
            remote,
        })
    }
}

fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
