pub mod file_record;
pub mod spool;
pub mod upload;
