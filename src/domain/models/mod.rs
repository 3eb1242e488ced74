pub mod file;
pub mod file_record;
