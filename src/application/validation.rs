use thiserror::Error;

/// 100 MiB.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: [&str; 17] = [
    "txt", "jpg", "jpeg", "png", "gif", "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
    "json", "xml", "csv", "zip", "rar",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File cannot be empty")]
    EmptyFile,

    #[error("File name cannot be empty")]
    MissingName,

    #[error("File type '{0}' is not supported")]
    UnsupportedType(String),

    #[error("File size {size} exceeds the {max} byte limit")]
    TooLarge { size: u64, max: u64 },
}

/// Checks an upload in order: empty, name, type, size. The first failure wins.
pub fn validate_upload(
    content_len: usize,
    filename: Option<&str>,
    declared_size: u64,
) -> Result<(), ValidationError> {
    if content_len == 0 {
        return Err(ValidationError::EmptyFile);
    }

    let filename = match filename {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(ValidationError::MissingName),
    };

    let extension = extension_of(filename);
    if !is_supported_extension(extension) {
        return Err(ValidationError::UnsupportedType(extension.to_string()));
    }

    if declared_size > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge {
            size: declared_size,
            max: MAX_FILE_SIZE,
        });
    }

    Ok(())
}

/// Substring after the last `.`, or "" when the name has none.
pub fn extension_of(filename: &str) -> &str {
    filename
        .rfind('.')
        .map(|idx| &filename[idx + 1..])
        .unwrap_or("")
}

/// Same as [`extension_of`] but keeps the leading dot.
pub fn dotted_extension_of(filename: &str) -> &str {
    filename.rfind('.').map(|idx| &filename[idx..]).unwrap_or("")
}

pub fn is_supported_extension(extension: &str) -> bool {
    ALLOWED_EXTENSIONS
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_supported_file() {
        assert_eq!(validate_upload(10, Some("report.pdf"), 10), Ok(()));
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(
            validate_upload(0, Some("report.pdf"), 0),
            Err(ValidationError::EmptyFile)
        );
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(
            validate_upload(1, None, 1),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            validate_upload(1, Some("   "), 1),
            Err(ValidationError::MissingName)
        );
    }

    #[test]
    fn test_unsupported_type() {
        assert_eq!(
            validate_upload(1, Some("payload.exe"), 1),
            Err(ValidationError::UnsupportedType("exe".to_string()))
        );
        assert_eq!(
            validate_upload(1, Some("README"), 1),
            Err(ValidationError::UnsupportedType(String::new()))
        );
        assert_eq!(
            validate_upload(1, Some("archive.tar.gz"), 1),
            Err(ValidationError::UnsupportedType("gz".to_string()))
        );
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(validate_upload(1, Some("PHOTO.JPG"), 1), Ok(()));
        assert_eq!(validate_upload(1, Some("Sheet.XlSx"), 1), Ok(()));
    }

    #[test]
    fn test_size_boundary() {
        assert_eq!(
            validate_upload(1, Some("big.zip"), 104_857_600),
            Ok(())
        );
        assert_eq!(
            validate_upload(1, Some("big.zip"), 104_857_601),
            Err(ValidationError::TooLarge {
                size: 104_857_601,
                max: MAX_FILE_SIZE
            })
        );
    }

    #[test]
    fn test_check_order() {
        // Empty wins over a bad name and a bad type.
        assert_eq!(
            validate_upload(0, Some("payload.exe"), u64::MAX),
            Err(ValidationError::EmptyFile)
        );
        // Type is checked before size.
        assert_eq!(
            validate_upload(1, Some("payload.exe"), u64::MAX),
            Err(ValidationError::UnsupportedType("exe".to_string()))
        );
    }

    #[test]
    fn test_extension_helpers() {
        assert_eq!(extension_of("a.b.txt"), "txt");
        assert_eq!(extension_of("noext"), "");
        assert_eq!(extension_of("trailing."), "");
        assert_eq!(extension_of(".hidden"), "hidden");
        assert_eq!(dotted_extension_of("photo.JPG"), ".JPG");
        assert_eq!(dotted_extension_of("noext"), "");
    }
}
