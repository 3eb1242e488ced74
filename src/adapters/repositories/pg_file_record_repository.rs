use async_trait::async_trait;
use sqlx::query_as;
use tracing::{debug, info};

use crate::{
    application::{
        dto::file_record_dto::FileRecordDTO, error::ApplicationError,
        repositories::file_record_repository::FileRecordRepository,
    },
    domain::models::file_record::{FileRecord, FileSummary},
};

const CREATE_FILES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS files (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(200) NOT NULL,
        description TEXT,
        category VARCHAR(100) NOT NULL,
        language VARCHAR(10) NOT NULL,
        provider VARCHAR(100) NOT NULL,
        roles TEXT[] NOT NULL,
        filename VARCHAR(255) NOT NULL,
        file_path VARCHAR(255) NOT NULL UNIQUE,
        file_type VARCHAR(100) NOT NULL,
        file_size BIGINT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

const SELECT_COLUMNS: &str = "id, title, description, category, language, provider, roles, \
     filename, file_path, file_type, file_size, created_at";

pub struct PgFileRecordRepository {
    pool: sqlx::PgPool,
}

impl PgFileRecordRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    pub async fn initialize_schema(&self) -> Result<(), ApplicationError> {
        sqlx::query(CREATE_FILES_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        info!("Database schema initialized");
        Ok(())
    }
}

/// Wraps the query in `%...%` so it matches as a literal substring under
/// ILIKE. Backslash is the default escape character in Postgres.
pub(crate) fn search_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl FileRecordRepository for PgFileRecordRepository {
    async fn create(&self, record: FileRecordDTO) -> Result<FileRecord, ApplicationError> {
        let mut record = record;
        record.sanitize();

        let query = format!(
            r#"
            INSERT INTO files (
                title, description, category, language, provider, roles,
                filename, file_path, file_type, file_size
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {SELECT_COLUMNS}
            "#
        );

        let created: FileRecordDTO = query_as::<_, FileRecordDTO>(&query)
            .bind(&record.title)
            .bind(&record.description)
            .bind(&record.category)
            .bind(&record.language)
            .bind(&record.provider)
            .bind(&record.roles)
            .bind(&record.filename)
            .bind(&record.storage_key)
            .bind(&record.content_type)
            .bind(record.size_bytes as i64)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        debug!("Inserted file record {:?}", created.id);
        Ok(created.into())
    }

    async fn get_by_id(&self, id: i64) -> Result<FileRecord, ApplicationError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM files WHERE id = $1");

        let fetched: FileRecordDTO = query_as::<_, FileRecordDTO>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => ApplicationError::NotFound,
                _ => ApplicationError::DatabaseError(e.to_string()),
            })?;

        Ok(fetched.into())
    }

    async fn list(&self) -> Result<Vec<FileSummary>, ApplicationError> {
        let query =
            format!("SELECT {SELECT_COLUMNS} FROM files ORDER BY created_at DESC, id DESC");

        let rows: Vec<FileRecordDTO> = query_as::<_, FileRecordDTO>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|dto| FileRecord::from(dto).into())
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<FileSummary>, ApplicationError> {
        if query.trim().is_empty() {
            return self.list().await;
        }

        let sql = format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM files
            WHERE
                title ILIKE $1 OR
                description ILIKE $1 OR
                category ILIKE $1 OR
                language ILIKE $1 OR
                provider ILIKE $1 OR
                filename ILIKE $1 OR
                array_to_string(roles, ',') ILIKE $1
            ORDER BY created_at DESC, id DESC
            "#
        );

        let rows: Vec<FileRecordDTO> = query_as::<_, FileRecordDTO>(&sql)
            .bind(search_pattern(query))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|dto| FileRecord::from(dto).into())
            .collect())
    }

    async fn ping(&self) -> Result<(), ApplicationError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
