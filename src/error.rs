//! Error handling for the merge sort utility

use std::io;
use thiserror::Error;

/// Custom error type for sort runs
#[derive(Error, Debug)]
pub enum SortError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Permission denied: {file}")]
    PermissionDenied { file: String },

    #[error("No such file or directory: {file}")]
    FileNotFound { file: String },

    #[error("Is a directory: {file}")]
    IsDirectory { file: String },

    #[error("Input is not valid UTF-8: {file}")]
    InvalidUtf8 { file: String },

    #[error("Invalid threshold list: {message}")]
    InvalidThresholds { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },
}

impl SortError {
    /// Returns the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SortError::PermissionDenied { .. }
            | SortError::FileNotFound { .. }
            | SortError::IsDirectory { .. }
            | SortError::InvalidUtf8 { .. }
            | SortError::Io(_) => crate::SORT_FAILURE,

            _ => crate::EXIT_FAILURE,
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(file: &str) -> Self {
        SortError::PermissionDenied {
            file: file.to_string(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(file: &str) -> Self {
        SortError::FileNotFound {
            file: file.to_string(),
        }
    }

    /// Create an is directory error
    pub fn is_directory(file: &str) -> Self {
        SortError::IsDirectory {
            file: file.to_string(),
        }
    }

    pub fn invalid_utf8(file: &str) -> Self {
        SortError::InvalidUtf8 {
            file: file.to_string(),
        }
    }

    /// Create an invalid threshold list error
    pub fn invalid_thresholds(message: &str) -> Self {
        SortError::InvalidThresholds {
            message: message.to_string(),
        }
    }

    /// Create a parse error
    pub fn parse_error(message: &str) -> Self {
        SortError::ParseError {
            message: message.to_string(),
        }
    }
}

/// Result type for sort runs
pub type SortResult<T> = Result<T, SortError>;

/// Context trait for adding context to errors
pub trait SortContext<T> {
    fn with_context<F>(self, f: F) -> SortResult<T>
    where
        F: FnOnce() -> String;

    fn with_file_context(self, filename: &str) -> SortResult<T>;
}

impl<T> SortContext<T> for Result<T, io::Error> {
    fn with_context<F>(self, f: F) -> SortResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|io_err| {
            SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", f(), io_err),
            ))
        })
    }

    fn with_file_context(self, filename: &str) -> SortResult<T> {
        self.map_err(|io_err| match io_err.kind() {
            io::ErrorKind::PermissionDenied => SortError::permission_denied(filename),
            io::ErrorKind::NotFound => SortError::file_not_found(filename),
            _ => SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", filename, io_err),
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_maps_not_found() {
        let result: Result<(), io::Error> = Err(io::Error::from(io::ErrorKind::NotFound));
        let err = result
            .with_file_context("words.txt")
            .expect_err("expected a mapped error");

        assert!(matches!(err, SortError::FileNotFound { ref file } if file == "words.txt"));
        assert_eq!(err.exit_code(), crate::SORT_FAILURE);
    }

    #[test]
    fn test_file_context_maps_permission_denied() {
        let result: Result<(), io::Error> =
            Err(io::Error::from(io::ErrorKind::PermissionDenied));
        let err = result
            .with_file_context("secret.txt")
            .expect_err("expected a mapped error");

        assert_eq!(err.to_string(), "Permission denied: secret.txt");
    }

    #[test]
    fn test_with_context_prefixes_message() {
        let result: Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        let err = result
            .with_context(|| "writing output".to_string())
            .expect_err("expected a wrapped error");

        assert_eq!(err.to_string(), "I/O error: writing output: disk on fire");
    }

    #[test]
    fn test_config_errors_use_generic_exit_code() {
        assert_eq!(
            SortError::invalid_thresholds("not ascending").exit_code(),
            crate::EXIT_FAILURE
        );
        assert_eq!(SortError::parse_error("bad").exit_code(), crate::EXIT_FAILURE);
    }
}
