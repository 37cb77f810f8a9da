use crate::upload::DroppedFile;
use thiserror::Error;

/// At most one file per drop.
pub const MAX_FILES: usize = 1;
/// Required filename suffix, matched case-sensitively.
pub const ODM_SUFFIX: &str = ".odm";
/// Largest accepted file, in bytes.
pub const MAX_FILE_SIZE: u64 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Only 1 file may be uploaded")]
    TooManyFiles { count: usize },
    #[error("Only '.odm' files may be uploaded")]
    WrongExtension { name: String },
    #[error("File exceeds size limit")]
    FileTooLarge { size: u64 },
}

/// Checks a non-empty drop against the upload rules and returns the single
/// accepted file.
pub fn validate(files: &[DroppedFile]) -> Result<&DroppedFile, ValidationError> {
    if files.len() != MAX_FILES {
        return Err(ValidationError::TooManyFiles {
            count: files.len(),
        });
    }
    let file = &files[0];

    if !file.name.ends_with(ODM_SUFFIX) {
        return Err(ValidationError::WrongExtension {
            name: file.name.clone(),
        });
    }
    if file.len > MAX_FILE_SIZE {
        return Err(ValidationError::FileTooLarge { size: file.len });
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn file_of(name: &str, len: usize) -> DroppedFile {
        DroppedFile::from_bytes(name, Arc::from(vec![0u8; len].as_slice()))
    }

    #[test]
    fn two_files_are_rejected() {
        let files = vec![file_of("a.odm", 10), file_of("b.odm", 10)];
        assert_eq!(
            validate(&files).unwrap_err(),
            ValidationError::TooManyFiles { count: 2 }
        );
    }

    #[test]
    fn wrong_extension_is_rejected() {
        let files = vec![file_of("book.mp3", 10)];
        assert!(matches!(
            validate(&files),
            Err(ValidationError::WrongExtension { .. })
        ));
    }

    #[test]
    fn extension_check_runs_before_the_size_check() {
        let files = vec![file_of("book.mp3", 20_000)];
        assert!(matches!(
            validate(&files),
            Err(ValidationError::WrongExtension { .. })
        ));
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        let files = vec![file_of("BOOK.ODM", 10)];
        assert!(matches!(
            validate(&files),
            Err(ValidationError::WrongExtension { .. })
        ));
    }

    #[test]
    fn oversized_file_is_rejected() {
        let files = vec![file_of("book.odm", 10_000)];
        assert_eq!(
            validate(&files).unwrap_err(),
            ValidationError::FileTooLarge { size: 10_000 }
        );
    }

    #[test]
    fn file_at_the_size_limit_passes() {
        let files = vec![file_of("book.odm", 9999)];
        assert_eq!(validate(&files).unwrap().name, "book.odm");
    }

    #[test]
    fn messages_match_the_upload_page() {
        assert_eq!(
            ValidationError::TooManyFiles { count: 2 }.to_string(),
            "Only 1 file may be uploaded"
        );
        assert_eq!(
            ValidationError::WrongExtension {
                name: "x.mp3".into()
            }
            .to_string(),
            "Only '.odm' files may be uploaded"
        );
        assert_eq!(
            ValidationError::FileTooLarge { size: 10_000 }.to_string(),
            "File exceeds size limit"
        );
    }
}
