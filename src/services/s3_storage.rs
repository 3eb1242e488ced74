use async_trait::async_trait;
use aws_sdk_s3::{
    config::{http::HttpResponse, BehaviorVersion, Credentials, Region},
    error::SdkError,
    primitives::ByteStream,
    Client,
};
use tracing::debug;

use crate::{
    application::services::StorageService,
    domain::{config::storage::RemoteStorageSecrets, models::file::FileData},
    services::error::{validate_key, StorageError},
};

const PRECONDITION_FAILED: u16 = 412;

/// Blobs in an S3-compatible bucket (AWS, MinIO, Supabase storage, R2).
pub struct S3StorageService {
    client: Client,
    bucket_name: String,
}

impl S3StorageService {
    pub fn new(secrets: RemoteStorageSecrets) -> Result<Self, StorageError> {
        if secrets.access_key_id.is_empty() || secrets.secret_access_key.is_empty() {
            return Err(StorageError::InvalidCredentials(
                "access key id and secret access key are required".to_string(),
            ));
        }

        let credentials = Credentials::new(
            secrets.access_key_id,
            secrets.secret_access_key,
            None,
            None,
            "file-catalog",
        );

        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(secrets.region))
            .endpoint_url(secrets.endpoint.trim_end_matches('/'))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(config),
            bucket_name: secrets.bucket_name,
        })
    }
}

fn status_of<E>(error: &SdkError<E, HttpResponse>) -> Option<u16> {
    error.raw_response().map(|response| response.status().as_u16())
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn put(&self, key: &str, file_data: &FileData) -> Result<String, StorageError> {
        validate_key(key)?;

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(&file_data.mime_type)
            .content_length(file_data.size() as i64)
            .if_none_match("*")
            .body(ByteStream::from(file_data.content.clone()))
            .send()
            .await
            .map_err(|e| match status_of(&e) {
                Some(PRECONDITION_FAILED) => StorageError::AlreadyExists(key.to_string()),
                _ => StorageError::ProviderError(format!("Upload failed: {}", e)),
            })?;

        debug!("Uploaded {} bytes to {}/{}", file_data.size(), self.bucket_name, key);
        Ok(key.to_string())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        validate_key(key)?;

        let output = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    StorageError::NotFound(key.to_string())
                } else {
                    StorageError::ProviderError(format!("Download failed: {}", e))
                }
            })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::ProviderError(format!("Download failed: {}", e)))?;

        Ok(bytes.into_bytes().to_vec())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;

        // S3 deletes are idempotent, so look the object up first to keep
        // NotFound consistent with the local backend.
        self.client
            .head_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_not_found()) {
                    StorageError::NotFound(key.to_string())
                } else {
                    StorageError::ProviderError(format!("Delete failed: {}", e))
                }
            })?;

        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::ProviderError(format!("Delete failed: {}", e)))?;

        Ok(())
    }

    fn provider(&self) -> &'static str {
        "remote"
    }
}
