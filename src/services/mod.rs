mod error;
mod local_storage;
mod s3_storage;

pub use error::StorageError;
pub use local_storage::LocalStorageService;
pub use s3_storage::S3StorageService;

use std::sync::Arc;

use crate::{
    application::services::StorageService,
    domain::config::storage::{Provider, StorageConfig},
};

pub async fn create_storage_service(
    config: &StorageConfig,
) -> Result<Arc<dyn StorageService>, StorageError> {
    match config.provider {
        Provider::Local => {
            let service = LocalStorageService::new(&config.uploads_dir).await?;
            Ok(Arc::new(service))
        }
        Provider::Remote => {
            let secrets = config.remote.as_ref().ok_or_else(|| {
                StorageError::InvalidCredentials("Remote storage secrets not found".to_string())
            })?;

            let service = S3StorageService::new(secrets.clone())?;
            Ok(Arc::new(service))
        }
    }
}
