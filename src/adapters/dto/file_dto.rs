use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::{
    application::{dto::file_record_dto::FileRecordDTO, error::ApplicationError},
    domain::models::{
        file::FileData,
        file_record::{FileRecord, FileSummary},
    },
};

pub const MISSING_FIELDS: &str = "Missing required fields";
pub const INVALID_FORMAT: &str = "Invalid request format";

#[derive(Debug, Serialize)]
pub struct FileResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub language: String,
    pub provider: String,
    pub roles: Vec<String>,
    pub filename: String,
    #[serde(rename = "storageKey")]
    pub storage_key: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(rename = "sizeBytes")]
    pub size_bytes: u64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<FileRecord> for FileResponse {
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
            storage_key: record.storage_key,
            content_type: record.content_type,
            size_bytes: record.size_bytes,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileSummaryResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub language: String,
    pub provider: String,
    pub roles: Vec<String>,
    pub filename: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<FileSummary> for FileSummaryResponse {
    fn from(summary: FileSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title,
            description: summary.description,
            category: summary.category,
            language: summary.language,
            provider: summary.provider,
            roles: summary.roles,
            filename: summary.filename,
            created_at: summary.created_at,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Uploaded file part as received from the client.
#[derive(Debug, Default)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

/// Raw multipart fields collected before validation.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    pub provider: Option<String>,
    pub roles: Option<String>,
    pub file: Option<UploadedFile>,
}

fn required(value: Option<String>, field: &str) -> Result<String, ApplicationError> {
    value.filter(|v| !v.trim().is_empty()).ok_or_else(|| {
        warn!("Missing required '{}' field in upload", field);
        ApplicationError::BadRequest(MISSING_FIELDS.to_string())
    })
}

fn parse_roles(raw: Option<String>) -> Result<Vec<String>, ApplicationError> {
    let raw = required(raw, "roles")?;

    let roles: Vec<String> = serde_json::from_str(&raw).map_err(|e| {
        warn!("Invalid roles field: {}", e);
        ApplicationError::BadRequest(INVALID_FORMAT.to_string())
    })?;

    let roles: Vec<String> = roles
        .into_iter()
        .filter(|r| !r.trim().is_empty())
        .collect();

    if roles.is_empty() {
        warn!("Empty 'roles' field in upload");
        return Err(ApplicationError::BadRequest(MISSING_FIELDS.to_string()));
    }

    Ok(roles)
}

impl UploadForm {
    /// Validates the form and splits it into the bytes to store and the
    /// metadata row to insert. The storage key is left empty for the caller.
    pub fn into_parts(self) -> Result<(FileData, FileRecordDTO), ApplicationError> {
        let title = required(self.title, "title")?;
        let category = required(self.category, "category")?;
        let language = required(self.language, "language")?;
        let provider = required(self.provider, "provider")?;
        let roles = parse_roles(self.roles)?;

        let file = self.file.ok_or_else(|| {
            warn!("Missing required 'file' field in upload");
            ApplicationError::BadRequest(MISSING_FIELDS.to_string())
        })?;
        let filename = required(file.filename, "file name")?;

        let file_data = FileData::new(file.content, filename, file.content_type);

        let record = FileRecordDTO {
            title,
            description: self.description.filter(|d| !d.trim().is_empty()),
            category,
            language,
            provider,
            roles,
            filename: file_data.filename.clone(),
            content_type: file_data.mime_type.clone(),
            size_bytes: file_data.size(),
            ..Default::default()
        };

        Ok((file_data, record))
    }
}
