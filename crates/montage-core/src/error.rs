//! Error types for Montage.
//!
//! Only resource and I/O operations (loading a project document, resolving a
//! media source, exporting) fail with a [`MontageError`]. Structural edits on
//! the timeline signal failure with an absent result instead.

use thiserror::Error;

/// Closed set of failure kinds for resource and I/O operations.
///
/// Two values of the same kind compare equal; `ExportFailed` additionally
/// compares its reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MontageError {
    #[error("invalid configuration")]
    InvalidConfiguration,

    #[error("invalid or missing media asset")]
    InvalidAsset,

    #[error("unsupported format")]
    UnsupportedFormat,

    #[error("insufficient permissions")]
    InsufficientPermissions,

    #[error("invalid time range")]
    InvalidTimeRange,

    #[error("operation cancelled")]
    Cancelled,

    #[error("export failed: {0}")]
    ExportFailed(String),
}

impl From<std::io::Error> for MontageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::InvalidAsset,
            std::io::ErrorKind::PermissionDenied => Self::InsufficientPermissions,
            _ => Self::InvalidConfiguration,
        }
    }
}

/// Result type alias for Montage resource operations.
pub type Result<T> = std::result::Result<T, MontageError>;
