use thiserror::Error;

/// Errors emitted while reading or writing the panel configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// Filesystem operation failed.
    #[error("config IO failed")]
    Io(#[from] std::io::Error),
    /// JSON serialization or deserialization failed.
    #[error("config JSON failed")]
    Json(#[from] serde_json::Error),
    /// The shell location is not a valid URL.
    #[error("invalid shell location: {0}")]
    Location(#[from] url::ParseError),
}

/// Errors emitted while reading a page for the content frame.
#[derive(Debug, Error)]
pub(crate) enum PageError {
    #[error("page IO failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("page {url} is not a local file")]
    NotLocal { url: String },
}
