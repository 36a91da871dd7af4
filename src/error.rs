use thiserror::Error;

/// Unified error type for manifest-sync operations
#[derive(Error, Debug)]
pub enum ManifestSyncError {
    #[error("Commit query failed: {0}")]
    Query(String),

    #[error("Malformed query output: {0}")]
    Output(String),

    #[error("Substitution failed: {0}")]
    Substitution(String),

    #[error("Backup cleanup failed: {0}")]
    Cleanup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in manifest-sync
pub type Result<T> = std::result::Result<T, ManifestSyncError>;

impl ManifestSyncError {
    /// Create a query error with context
    pub fn query(msg: impl Into<String>) -> Self {
        ManifestSyncError::Query(msg.into())
    }

    /// Create a malformed-output error with context
    pub fn output(msg: impl Into<String>) -> Self {
        ManifestSyncError::Output(msg.into())
    }

    /// Create a substitution error with context
    pub fn substitution(msg: impl Into<String>) -> Self {
        ManifestSyncError::Substitution(msg.into())
    }

    /// Create a cleanup error with context
    pub fn cleanup(msg: impl Into<String>) -> Self {
        ManifestSyncError::Cleanup(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ManifestSyncError::Config(msg.into())
    }
}
