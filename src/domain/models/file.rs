pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An upload as received from the boundary, before validation.
#[derive(Debug, Clone)]
pub struct FileData {
    pub content: Vec<u8>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub declared_size: u64,
}

impl FileData {
    pub fn new(content: Vec<u8>, filename: Option<String>, content_type: Option<String>) -> Self {
        let declared_size = content.len() as u64;
        Self {
            content,
            filename,
            content_type,
            declared_size,
        }
    }

    pub fn with_declared_size(mut self, declared_size: u64) -> Self {
        self.declared_size = declared_size;
        self
    }

    /// Client-declared MIME type, falling back to a generic binary type when absent or blank.
    pub fn content_type_or_default(&self) -> String {
        match self.content_type.as_deref().map(str::trim) {
            Some(ct) if !ct.is_empty() => ct.to_string(),
            _ => DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}
