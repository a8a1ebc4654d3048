use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::{Validate, ValidationError};

use crate::api::error;

const INVALID_FILENAME: &str = "invalid filename";

/// Stored blob and its content type, as needed to serve a download.
#[derive(Debug, Clone, FromRow)]
pub struct FileContent {
    pub content: Vec<u8>,
    pub mime_type: Option<String>,
}

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct FileSummary {
    pub filename: String,
    pub size: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub size: usize,
}

/// `{filename}` path segment of the download and delete routes.
#[derive(Debug, Deserialize, Validate)]
pub struct FilenamePath {
    #[validate(
        length(min = 1, max = 255, message = "invalid filename"),
        custom(function = "allowed_filename")
    )]
    pub filename: String,
}

fn allowed_filename(name: &str) -> Result<(), ValidationError> {
    // Path separators are already outside the allow-list; checked first so
    // traversal attempts get their own code in the logs.
    if name.contains(['/', '\\']) {
        let mut err = ValidationError::new("path_separator");
        err.message = Some(INVALID_FILENAME.into());
        return Err(err);
    }

    if !name.chars().all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | ' ')) {
        let mut err = ValidationError::new("filename_charset");
        err.message = Some(INVALID_FILENAME.into());
        return Err(err);
    }

    Ok(())
}

/// Returns the name unchanged when it passes the filename allow-list.
pub fn validate_filename(filename: String) -> Result<String, error::SystemError> {
    let path = FilenamePath { filename };
    if let Err(e) = path.validate() {
        log::debug!("Rejected filename {:?}: {}", path.filename, e);
        return Err(error::SystemError::bad_request(INVALID_FILENAME));
    }
    Ok(path.filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid(name: &str) -> bool {
        validate_filename(name.to_string()).is_ok()
    }

    #[test]
    fn test_accepts_allow_listed_names() {
        assert!(is_valid("hello.txt"));
        assert!(is_valid("my report-final_v2.PDF"));
        assert!(is_valid("archive.tar.gz"));
        assert!(is_valid("résumé.doc"));
        assert!(is_valid(".hidden"));
        assert!(is_valid(&"a".repeat(255)));
    }

    #[test]
    fn test_returns_name_unchanged() {
        let name = validate_filename("  spaced name .txt".to_string()).unwrap();
        assert_eq!(name, "  spaced name .txt");
    }

    #[test]
    fn test_rejects_path_separators() {
        assert!(!is_valid("a/b.txt"));
        assert!(!is_valid("..\\windows"));
        assert!(!is_valid("../etc/passwd"));
        assert!(!is_valid("/"));
    }

    #[test]
    fn test_rejects_characters_outside_allow_list() {
        assert!(!is_valid("..%2f"));
        assert!(!is_valid("semi;colon"));
        assert!(!is_valid("quote\".txt"));
        assert!(!is_valid("tab\tname"));
        assert!(!is_valid("new\nline"));
    }

    #[test]
    fn test_rejects_bad_lengths() {
        assert!(!is_valid(""));
        assert!(!is_valid(&"a".repeat(256)));
        assert!(!is_valid(&"a".repeat(300)));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 255 two-byte characters
        assert!(is_valid(&"é".repeat(255)));
    }

    #[test]
    fn test_rejection_is_bad_request() {
        let err = validate_filename("a/b".to_string()).unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(ref m) if m == "invalid filename"));
    }
}
