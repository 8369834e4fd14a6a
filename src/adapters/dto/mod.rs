pub mod file_dto;
mod file_record_dto;
