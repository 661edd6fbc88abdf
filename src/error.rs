//! Error types for syllabus-tree
//!
//! Every failure is reported to the caller. Nothing is retried and
//! nothing is swallowed: a half-built module tree is worse than a
//! visible abort, so each error names the stage and the path involved.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for syllabus-tree operations
#[derive(Error, Debug)]
pub enum SyllabusError {
    /// The source document is missing, unreadable or structurally invalid
    #[error("Failed to read document '{path}': {message}")]
    DocumentRead {
        /// Source document
        path: PathBuf,
        /// What went wrong while reading it
        message: String,
    },

    /// Directory or file creation failed
    #[error("Filesystem error at '{path}': {source}")]
    Filesystem {
        /// Path being created or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A non-directory entity occupies a path that must be a directory
    #[error("Path exists and is not a directory: {0}")]
    PathCollision(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Stage of a run in which an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    /// Opening or parsing the source document
    Read,
    /// Creating directories or writing files
    Write,
    /// Validating options before any work starts
    Config,
}

impl ErrorStage {
    /// Short label for user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Config => "config",
        }
    }
}

impl SyllabusError {
    /// Create a document read error with path context
    pub fn document(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::DocumentRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a filesystem error with path context
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Which stage of the run failed
    pub fn stage(&self) -> ErrorStage {
        match self {
            Self::DocumentRead { .. } => ErrorStage::Read,
            Self::Filesystem { .. } | Self::PathCollision(_) => ErrorStage::Write,
            Self::ConfigError(_) => ErrorStage::Config,
        }
    }

    /// Check if the source document could not be read
    pub fn is_document_error(&self) -> bool {
        self.stage() == ErrorStage::Read
    }

    /// Check if a directory or file could not be created
    pub fn is_filesystem_error(&self) -> bool {
        self.stage() == ErrorStage::Write
    }

    /// Check if this error is a permission issue
    pub fn is_permission_error(&self) -> bool {
        match self {
            Self::Filesystem { source, .. } => {
                source.kind() == std::io::ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::DocumentRead { path, .. }
            | Self::Filesystem { path, .. }
            | Self::PathCollision(path) => Some(path),
            Self::ConfigError(_) => None,
        }
    }
}

/// Result type alias for syllabus-tree operations
pub type Result<T> = std::result::Result<T, SyllabusError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Turn an I/O error into a filesystem error at `path`
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| SyllabusError::filesystem(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filesystem_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SyllabusError::filesystem("/test/path", io_err);
        assert_eq!(err.path().unwrap(), &PathBuf::from("/test/path"));
        assert!(err.is_filesystem_error());
        assert!(err.is_permission_error());
        assert_eq!(err.stage(), ErrorStage::Write);
    }

    #[test]
    fn test_error_stages() {
        let read = SyllabusError::document("syllabus.docx", "not a zip archive");
        assert!(read.is_document_error());
        assert!(!read.is_filesystem_error());
        assert_eq!(read.stage().label(), "read");

        let collision = SyllabusError::PathCollision(PathBuf::from("OSProj"));
        assert!(collision.is_filesystem_error());
        assert!(!collision.is_permission_error());

        let config = SyllabusError::config("empty heading prefix");
        assert_eq!(config.stage(), ErrorStage::Config);
        assert!(config.path().is_none());
    }

    #[test]
    fn test_with_path_maps_io_error() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        ));
        let err = result.with_path("/data/README.md").unwrap_err();
        assert!(err.to_string().contains("/data/README.md"));
        assert!(err.to_string().contains("disk full"));
    }
}
