mod memory_file_repository;
mod pg_file_repository;

pub use memory_file_repository::InMemoryFileRepository;
pub use pg_file_repository::PgFileRepository;
