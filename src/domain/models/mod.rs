pub mod file;
pub mod metadata;
