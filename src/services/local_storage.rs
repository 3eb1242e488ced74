use std::path::PathBuf;

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, warn};

use crate::{
    application::services::StorageService,
    domain::models::file::FileData,
    services::error::{validate_key, StorageError},
};

/// Blobs as plain files under a single base directory.
pub struct LocalStorageService {
    base_dir: PathBuf,
}

impl LocalStorageService {
    /// Creates the base directory if it does not exist yet.
    pub async fn new(base_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).await?;
        debug!("Local storage rooted at {}", base_dir.display());
        Ok(Self { base_dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.base_dir.join(key))
    }
}

fn map_io_error(key: &str, error: std::io::Error) -> StorageError {
    match error.kind() {
        std::io::ErrorKind::NotFound => StorageError::NotFound(key.to_string()),
        std::io::ErrorKind::AlreadyExists => StorageError::AlreadyExists(key.to_string()),
        _ => StorageError::Io(error),
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn put(&self, key: &str, file_data: &FileData) -> Result<String, StorageError> {
        let path = self.path_for(key)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| map_io_error(key, e))?;

        let written = async {
            file.write_all(&file_data.content).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&path).await {
                warn!(
                    "Failed to remove partial write at {}: {}",
                    path.display(),
                    cleanup
                );
            }
            return Err(StorageError::Io(e));
        }

        debug!("Stored {} bytes at {}", file_data.size(), path.display());
        Ok(key.to_string())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(key)?;
        fs::read(&path).await.map_err(|e| map_io_error(key, e))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::remove_file(&path).await.map_err(|e| map_io_error(key, e))
    }

    fn provider(&self) -> &'static str {
        "local"
    }
}
