use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage provider error: {0}")]
    ProviderError(String),
}

// A record whose blob is gone is an inconsistency on our side, so even
// NotFound surfaces as a server error rather than a 404.
impl From<StorageError> for ApplicationError {
    fn from(error: StorageError) -> Self {
        ApplicationError::InternalError(format!("Storage error: {}", error))
    }
}

pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty()
        || key == "."
        || key == ".."
        || key.contains('/')
        || key.contains('\\')
        || key.contains('\0')
    {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
