//! Error handling for droidflash.
//!
//! Provides centralized error types using thiserror. Environment errors
//! (missing device, missing tool, failed transfer) are reported to the
//! operator and abort the current operation only; they are never fatal
//! to the process. Datastore errors get their own type so callers can
//! log-and-continue without unwinding.

use thiserror::Error;

/// Main error type for droidflash operations.
#[derive(Error, Debug)]
pub enum DroidflashError {
    /// IO errors (file operations, directory listing, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Device communication errors (adb/fastboot unreachable or unusable)
    #[error("Device error: {0}")]
    Device(String),

    /// Firmware package download errors
    #[error("Download error: {0}")]
    Download(String),

    /// Archive extraction errors
    #[error("Extraction error: {0}")]
    Extract(String),

    /// External command invocation errors (tool missing, spawn failure)
    #[error("System error: {0}")]
    System(String),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for droidflash operations.
pub type Result<T> = std::result::Result<T, DroidflashError>;

// Convenient error constructors
impl DroidflashError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a device communication error
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }

    /// Create a download error
    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }

    /// Create an extraction error
    pub fn extract(msg: impl Into<String>) -> Self {
        Self::Extract(msg.into())
    }

    /// Create a system error
    pub fn system(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

/// Datastore errors are kept separate from [`DroidflashError`]: only a
/// connection failure at startup is fatal, everything else is recoverable
/// and must never fail the operation that triggered the write.
#[derive(Error, Debug)]
pub enum DbError {
    /// Failed to establish the connection (fatal at startup, exit code 1)
    #[error("database connection failed: {0}")]
    Connection(String),

    /// A query or write failed after connecting (warn and continue)
    #[error("database operation failed: {0}")]
    Recoverable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DroidflashError::config("missing downloads directory");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing downloads directory"
        );

        let err = DroidflashError::device("no fastboot device");
        assert_eq!(err.to_string(), "Device error: no fastboot device");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DroidflashError = io_err.into();
        assert!(matches!(err, DroidflashError::Io(_)));
    }

    #[test]
    fn test_db_error_display() {
        let err = DbError::Connection("refused".to_string());
        assert_eq!(err.to_string(), "database connection failed: refused");

        let err = DbError::Recoverable("insert failed".to_string());
        assert!(matches!(err, DbError::Recoverable(_)));
    }
}
