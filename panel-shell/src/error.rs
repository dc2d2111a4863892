use std::io;

use thiserror::Error;

/// Errors raised by a [`crate::store::PreferenceStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference store I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("preference store JSON failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("preference store unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Reasons why the hosted document cannot be touched by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentAccessError {
    #[error("hosted document belongs to another origin")]
    CrossOrigin,

    #[error("no hosted document is loaded")]
    NotLoaded,
}
