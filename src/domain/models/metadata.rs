use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata describing one stored blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: i64,
    pub storage_name: String,
    pub original_name: String,
    pub size_bytes: u64,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    pub storage_path: String,
}
