use async_trait::async_trait;

use crate::{domain::models::file::FileData, services::StorageError};

/// Key-addressed blob store. Keys are chosen by the caller so the same
/// identifier works against every backend.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Stores the bytes under `key`. Never overwrites: an existing key fails
    /// with `StorageError::AlreadyExists`.
    async fn put(&self, key: &str, file_data: &FileData) -> Result<String, StorageError>;
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
    fn provider(&self) -> &'static str;
}
