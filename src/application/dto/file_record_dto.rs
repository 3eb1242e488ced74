use chrono::{DateTime, Utc};

use crate::domain::models::file_record::FileRecord;

/// Row shape shared by inserts and reads. `id` and `created_at` are assigned
/// by the store and are `None` before insertion.
#[derive(Debug, Clone, Default)]
pub struct FileRecordDTO {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub language: String,
    pub provider: String,
    pub roles: Vec<String>,
    pub filename: String,
    pub storage_key: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<FileRecordDTO> for FileRecord {
    fn from(value: FileRecordDTO) -> Self {
        FileRecord {
            id: value.id.unwrap_or(0),
            title: value.title,
            description: value.description,
            category: value.category,
            language: value.language,
            provider: value.provider,
            roles: value.roles,
            filename: value.filename,
            storage_key: value.storage_key,
            content_type: value.content_type,
            size_bytes: value.size_bytes,
            created_at: value.created_at.unwrap_or_else(Utc::now),
        }
    }
}
