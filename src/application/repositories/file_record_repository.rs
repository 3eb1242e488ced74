use async_trait::async_trait;

use crate::{
    application::{dto::file_record_dto::FileRecordDTO, error::ApplicationError},
    domain::models::file_record::{FileRecord, FileSummary},
};

#[async_trait]
pub trait FileRecordRepository: Send + Sync {
    async fn create(&self, record: FileRecordDTO) -> Result<FileRecord, ApplicationError>;
    async fn get_by_id(&self, id: i64) -> Result<FileRecord, ApplicationError>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<FileSummary>, ApplicationError>;
    /// Case-insensitive substring match over the text columns and roles,
    /// newest first. A blank query behaves like `list`.
    async fn search(&self, query: &str) -> Result<Vec<FileSummary>, ApplicationError>;
    async fn ping(&self) -> Result<(), ApplicationError>;
}
