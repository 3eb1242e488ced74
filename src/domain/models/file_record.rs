use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub id: i64,
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
    pub created_at: DateTime<Utc>,
}

/// Listing row. Carries everything except the storage locator.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub language: String,
    pub provider: String,
    pub roles: Vec<String>,
    pub filename: String,
    pub created_at: DateTime<Utc>,
}

impl From<FileRecord> for FileSummary {
    fn from(record: FileRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            category: record.category,
            language: record.language,
            provider: record.provider,
            roles: record.roles,
            filename: record.filename,
            created_at: record.created_at,
        }
    }
}
