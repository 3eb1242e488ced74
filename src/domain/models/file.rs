use std::path::Path;

use uuid::Uuid;

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl FileData {
    pub fn new(content: Vec<u8>, filename: String, mime_type: Option<String>) -> Self {
        let mime_type = mime_type
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                mime_guess::from_path(&filename)
                    .first_raw()
                    .unwrap_or(DEFAULT_MIME_TYPE)
                    .to_string()
            });

        Self {
            content,
            filename,
            mime_type,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Fresh storage key for this upload. Independent of the client name,
    /// only the extension is carried over.
    pub fn generate_storage_key(&self) -> String {
        let id = Uuid::new_v4();
        match Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
        {
            Some(ext) => format!("{}.{}", id, ext),
            None => id.to_string(),
        }
    }
}
