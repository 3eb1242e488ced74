#[cfg(test)]
mod memory_file_record_repository;
mod pg_file_record_repository;

#[cfg(test)]
pub use memory_file_record_repository::MemoryFileRecordRepository;
pub use pg_file_record_repository::PgFileRecordRepository;
