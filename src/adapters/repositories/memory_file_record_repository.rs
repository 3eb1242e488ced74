use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    application::{
        dto::file_record_dto::FileRecordDTO, error::ApplicationError,
        repositories::file_record_repository::FileRecordRepository,
    },
    domain::models::file_record::{FileRecord, FileSummary},
};

/// Test double with the same ordering and matching rules as the Postgres
/// repository.
#[derive(Default)]
pub struct MemoryFileRecordRepository {
    records: Mutex<Vec<FileRecord>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryFileRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn check_reads(&self) -> Result<(), ApplicationError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ApplicationError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }

    fn newest_first(
        records: &[FileRecord],
        filter: impl Fn(&FileRecord) -> bool,
    ) -> Vec<FileSummary> {
        let mut matched: Vec<FileRecord> =
            records.iter().filter(|r| filter(*r)).cloned().collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        matched.into_iter().map(FileSummary::from).collect()
    }
}

fn matches_query(record: &FileRecord, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(&record.title)
        || record.description.as_deref().is_some_and(contains)
        || contains(&record.category)
        || contains(&record.language)
        || contains(&record.provider)
        || contains(&record.filename)
        || contains(&record.roles.join(","))
}

#[async_trait]
impl FileRecordRepository for MemoryFileRecordRepository {
    async fn create(&self, record: FileRecordDTO) -> Result<FileRecord, ApplicationError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ApplicationError::DatabaseError("insert rejected".to_string()));
        }

        let mut record = record;
        record.sanitize();

        let mut records = self.records.lock().unwrap();
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        record.id = Some(id);
        record.created_at = Some(Utc::now());

        let created: FileRecord = record.into();
        records.push(created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> Result<FileRecord, ApplicationError> {
        self.check_reads()?;
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(ApplicationError::NotFound)
    }

    async fn list(&self) -> Result<Vec<FileSummary>, ApplicationError> {
        self.check_reads()?;
        let records = self.records.lock().unwrap();
        Ok(Self::newest_first(&records, |_| true))
    }

    async fn search(&self, query: &str) -> Result<Vec<FileSummary>, ApplicationError> {
        if query.trim().is_empty() {
            return self.list().await;
        }
        self.check_reads()?;

        let needle = query.to_lowercase();
        let records = self.records.lock().unwrap();
        Ok(Self::newest_first(&records, |r| matches_query(r, &needle)))
    }

    async fn ping(&self) -> Result<(), ApplicationError> {
        self.check_reads()
    }
}
