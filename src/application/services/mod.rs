mod blob_store;
mod file_service;

pub use blob_store::BlobStore;
pub use file_service::{FileDownload, FileService};
