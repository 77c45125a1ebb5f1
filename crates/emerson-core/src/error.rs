//! Error types for the page behaviors

use thiserror::Error;

/// Main error type for page behavior operations
///
/// Missing page elements are never errors: they disable a single routine and
/// show up in the [`InstallReport`](crate::controller::InstallReport).
#[derive(Error, Debug)]
pub enum BehaviorError {
    /// The host has no clipboard capability (insecure context, old browser)
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// The clipboard write was rejected (permission denied, document not focused)
    #[error("Clipboard write rejected: {0}")]
    ClipboardRejected(String),

    /// A host (DOM) call failed
    #[error("Host error: {0}")]
    Host(String),

    /// Configuration value out of range or malformed
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Page fixture could not be interpreted
    #[error("Invalid page fixture: {0}")]
    Fixture(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using BehaviorError
pub type BehaviorResult<T> = Result<T, BehaviorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BehaviorError::ClipboardRejected("NotAllowedError".to_string());
        assert_eq!(format!("{}", err), "Clipboard write rejected: NotAllowedError");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BehaviorError = io_err.into();
        assert!(matches!(err, BehaviorError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BehaviorError = json_err.into();
        assert!(matches!(err, BehaviorError::Json(_)));
    }
}
