use sqlx::{postgres::PgRow, FromRow, Row};

use crate::application::dto::file_record_dto::FileRecordDTO;

impl FromRow<'_, PgRow> for FileRecordDTO {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let file_size: i64 = row.try_get("file_size")?;

        Ok(FileRecordDTO {
            id: Some(row.try_get("id")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            language: row.try_get("language")?,
            provider: row.try_get("provider")?,
            roles: row.try_get("roles")?,
            filename: row.try_get("filename")?,
            storage_key: row.try_get("file_path")?,
            content_type: row.try_get("file_type")?,
            size_bytes: file_size.max(0) as u64,
            created_at: Some(row.try_get("created_at")?),
        })
    }
}

impl FileRecordDTO {
    pub fn sanitize(&mut self) {
        self.size_bytes = std::cmp::min(self.size_bytes, i64::MAX as u64);
        self.description = self
            .description
            .take()
            .filter(|d| !d.trim().is_empty());
        self.roles.retain(|r| !r.trim().is_empty());
    }
}
