//! Error types for the Godot download and install pipeline.
//!
//! Every failure the pipeline can hit maps onto one [`GodotError`] variant.
//! None of them are retried: each is returned to the immediate caller with
//! the offending path or URL attached.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = GodotError> = std::result::Result<T, E>;

/// Consolidated error type for Godot setup operations.
#[derive(Debug, Error)]
pub enum GodotError {
    /// Invalid configuration, e.g. a malformed repository URL.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of what was invalid.
        message: String,
    },

    /// Network error during download.
    #[error("download error: {message}")]
    Network {
        /// Description of the download error.
        message: String,
        /// The underlying error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Error creating, reading or writing files and directories.
    #[error("I/O error: {message}")]
    Filesystem {
        /// Description of the I/O operation that failed.
        message: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An archive entry resolved to a path outside the extraction directory.
    #[error("illegal file path in archive: {}", path.display())]
    PathTraversal {
        /// The resolved destination of the rejected entry.
        path: PathBuf,
    },

    /// The archive could not be opened or one of its entries could not be read.
    #[error("archive error: {message}")]
    ArchiveFormat {
        /// Description of the archive error.
        message: String,
        /// The underlying zip error.
        #[source]
        source: Option<zip::result::ZipError>,
    },

    /// No extracted file looked like the Godot binary for the target OS.
    #[error("Godot binary not found in {}", archive.display())]
    BinaryNotFound {
        /// The archive that was searched.
        archive: PathBuf,
    },
}

impl GodotError {
    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `Network` error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new `Network` error with a source error.
    #[must_use]
    pub fn network_with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Creates a new `Filesystem` error from an I/O error with context.
    #[must_use]
    pub fn filesystem(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Filesystem {
            message: message.into(),
            source,
        }
    }

    /// Creates a new `PathTraversal` error.
    #[must_use]
    pub fn path_traversal(path: impl Into<PathBuf>) -> Self {
        Self::PathTraversal { path: path.into() }
    }

    /// Creates a new `ArchiveFormat` error.
    #[must_use]
    pub fn archive_format(message: impl Into<String>, source: zip::result::ZipError) -> Self {
        Self::ArchiveFormat {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a new `BinaryNotFound` error.
    #[must_use]
    pub fn binary_not_found(archive: impl Into<PathBuf>) -> Self {
        Self::BinaryNotFound {
            archive: archive.into(),
        }
    }
}

/// Extraction failure that keeps track of the files written before it.
///
/// Extraction stops at the first failing entry; the files already extracted
/// stay on disk and are handed back so the caller can clean them up.
#[derive(Debug, Error)]
#[error("extraction stopped after {} file(s)", extracted.len())]
pub struct ExtractError {
    /// Files successfully extracted before the failure, in archive order.
    pub extracted: Vec<PathBuf>,
    /// The failure that stopped extraction.
    #[source]
    pub error: GodotError,
}

impl ExtractError {
    pub(crate) fn new(extracted: Vec<PathBuf>, error: GodotError) -> Self {
        Self { extracted, error }
    }
}

impl From<ExtractError> for GodotError {
    fn from(e: ExtractError) -> Self {
        e.error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_displays_message() {
        let err = GodotError::configuration("relative URL without a base");
        assert_eq!(
            err.to_string(),
            "configuration error: relative URL without a base"
        );
    }

    #[test]
    fn network_displays_message() {
        let err = GodotError::network("HTTP error 404 Not Found");
        assert_eq!(err.to_string(), "download error: HTTP error 404 Not Found");
    }

    #[test]
    fn filesystem_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = GodotError::filesystem("failed to create /bin/godot", io);
        assert_eq!(err.to_string(), "I/O error: failed to create /bin/godot");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn path_traversal_displays_path() {
        let err = GodotError::path_traversal("/tmp/evil");
        assert_eq!(err.to_string(), "illegal file path in archive: /tmp/evil");
    }

    #[test]
    fn binary_not_found_displays_archive() {
        let err = GodotError::binary_not_found("/tmp/godot.zip");
        assert_eq!(err.to_string(), "Godot binary not found in /tmp/godot.zip");
    }

    #[test]
    fn extract_error_converts_into_inner_error() {
        let err = ExtractError::new(
            vec![PathBuf::from("/tmp/a")],
            GodotError::path_traversal("/evil"),
        );
        assert_eq!(err.to_string(), "extraction stopped after 1 file(s)");
        let inner: GodotError = err.into();
        assert!(matches!(inner, GodotError::PathTraversal { .. }));
    }
}
