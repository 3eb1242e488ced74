use axum::{
    body::Body,
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, Path, Query, State,
    },
    http::{header, HeaderValue, StatusCode},
    response::Response,
    Json,
};
use tracing::{error, info, warn};

use crate::{
    adapters::{
        dto::file_dto::{
            FileResponse, FileSummaryResponse, SearchQuery, UploadForm, UploadedFile,
            INVALID_FORMAT,
        },
        state::AppState,
    },
    application::error::ApplicationError,
    domain::models::file_record::FileRecord,
};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Attachment,
    Inline,
}

fn parse_id(raw: &str) -> Result<i64, ApplicationError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            warn!("Unknown file id: {}", raw);
            Err(ApplicationError::NotFound)
        }
    }
}

fn multipart_error(e: MultipartError) -> ApplicationError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApplicationError::PayloadTooLarge;
    }
    warn!("Invalid multipart data: {}", e);
    ApplicationError::BadRequest(INVALID_FORMAT.to_string())
}

async fn read_text(field: Field<'_>) -> Result<String, ApplicationError> {
    field.text().await.map_err(multipart_error)
}

/// `Content-Disposition` value. The quoted `filename` is an ASCII fallback;
/// `filename*` carries the exact name for clients that understand RFC 5987.
fn content_disposition(disposition: Disposition, filename: &str) -> String {
    if disposition == Disposition::Inline || filename.is_empty() {
        return match disposition {
            Disposition::Inline => "inline".to_string(),
            Disposition::Attachment => "attachment".to_string(),
        };
    }

    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' => "\\\"".to_string(),
            '\\' => "\\\\".to_string(),
            c if c.is_ascii() && !c.is_ascii_control() => c.to_string(),
            _ => "_".to_string(),
        })
        .collect();

    if filename.is_ascii() && !filename.chars().any(|c| c.is_ascii_control()) {
        format!("attachment; filename=\"{}\"", fallback)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(filename)
        )
    }
}

pub struct FileController;

impl FileController {
    /// GET /files?q=<text>
    pub async fn list_files(
        State(app_state): State<AppState>,
        Query(params): Query<SearchQuery>,
    ) -> Result<Json<Vec<FileSummaryResponse>>, ApplicationError> {
        let query = params.q.unwrap_or_default();

        let files = if query.trim().is_empty() {
            app_state.file_record_repository.list().await?
        } else {
            app_state.file_record_repository.search(&query).await?
        };

        Ok(Json(
            files.into_iter().map(FileSummaryResponse::from).collect(),
        ))
    }

    /// POST /files
    ///
    /// Stores the blob first, then the row. If the row cannot be written the
    /// blob is deleted again so no orphan is left behind.
    pub async fn upload_file(
        State(app_state): State<AppState>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<(StatusCode, Json<FileResponse>), ApplicationError> {
        let mut multipart = multipart.map_err(|e| {
            warn!("Upload is not a multipart request: {}", e);
            ApplicationError::BadRequest(INVALID_FORMAT.to_string())
        })?;

        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "title" => form.title = Some(read_text(field).await?),
                "description" => form.description = Some(read_text(field).await?),
                "category" => form.category = Some(read_text(field).await?),
                "language" => form.language = Some(read_text(field).await?),
                "provider" => form.provider = Some(read_text(field).await?),
                "roles" => form.roles = Some(read_text(field).await?),
                "file" => {
                    let filename = field.file_name().map(|s| s.to_string());
                    let content_type = field.content_type().map(|s| s.to_string());
                    let content = field.bytes().await.map_err(multipart_error)?.to_vec();

                    form.file = Some(UploadedFile {
                        filename,
                        content_type,
                        content,
                    });
                }
                _ => {}
            }
        }

        let (file_data, mut record) = form.into_parts()?;

        let storage_key = file_data.generate_storage_key();
        record.storage_key = app_state
            .storage_service
            .put(&storage_key, &file_data)
            .await?;

        let created = match app_state.file_record_repository.create(record).await {
            Ok(created) => created,
            Err(e) => {
                if let Err(cleanup) = app_state.storage_service.delete(&storage_key).await {
                    error!(
                        "Failed to remove blob {} after metadata insert failed: {}",
                        storage_key, cleanup
                    );
                }
                return Err(e);
            }
        };

        info!(
            "Stored file {} ({} bytes) as {}",
            created.id, created.size_bytes, created.storage_key
        );

        Ok((StatusCode::CREATED, Json(FileResponse::from(created))))
    }

    /// GET /files/{id}
    pub async fn get_file(
        State(app_state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<Json<FileResponse>, ApplicationError> {
        let id = parse_id(&id)?;
        let record = app_state.file_record_repository.get_by_id(id).await?;
        Ok(Json(FileResponse::from(record)))
    }

    /// GET /files/{id}/download
    pub async fn download_file(
        State(app_state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<Response, ApplicationError> {
        Self::serve_file(app_state, &id, Disposition::Attachment).await
    }

    /// GET /files/{id}/view
    pub async fn view_file(
        State(app_state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<Response, ApplicationError> {
        Self::serve_file(app_state, &id, Disposition::Inline).await
    }

    async fn serve_file(
        app_state: AppState,
        raw_id: &str,
        disposition: Disposition,
    ) -> Result<Response, ApplicationError> {
        let id = parse_id(raw_id)?;
        let record: FileRecord = app_state.file_record_repository.get_by_id(id).await?;

        let file_bytes = app_state.storage_service.get(&record.storage_key).await?;

        let content_type = HeaderValue::from_str(&record.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(FALLBACK_CONTENT_TYPE));

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CONTENT_LENGTH, file_bytes.len())
            .header(
                header::CONTENT_DISPOSITION,
                content_disposition(disposition, &record.filename),
            )
            .body(Body::from(file_bytes))
            .map_err(|e| ApplicationError::InternalError(e.to_string()))
    }
}
