pub mod file_record_dto;
