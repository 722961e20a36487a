pub mod file_record_repository;

pub use file_record_repository::FileRecordRepository;
