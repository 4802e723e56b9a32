//! Error types for pass-tui.
//!
//! This module defines the centralized error type [`PassTuiError`] and a type alias
//! [`Result`] for convenient error handling throughout the application. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for pass-tui operations.
///
/// This enum consolidates every error condition that can occur while talking to
/// the vault, loading configuration, or driving the terminal. The
/// [`PassTuiError::Operation`] variant wraps a lower-level error with the
/// user-facing action that failed, which is how the application state reports
/// vault failures through its error callback.
///
/// # Examples
///
/// ```
/// use pass_tui::domain::PassTuiError;
///
/// fn lookup(service: &str) -> Result<(), PassTuiError> {
///     Err(PassTuiError::NotFound(service.to_string()))
/// }
///
/// let err = PassTuiError::operation("failed to get credential", lookup("github").unwrap_err());
/// assert_eq!(err.to_string(), "failed to get credential: credential not found: github");
/// ```
#[derive(Debug, Error)]
pub enum PassTuiError {
    /// No credential is stored under the requested service name.
    #[error("credential not found: {0}")]
    NotFound(String),

    /// A credential with the same service name already exists.
    #[error("credential already exists: {0}")]
    AlreadyExists(String),

    /// A credential failed validation before reaching the vault.
    ///
    /// The string describes the offending field (empty service, empty password).
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the vault file fails for reasons
    /// other than plain I/O, such as malformed JSON.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// The system clipboard could not be reached or written.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Terminal setup or drawing failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// A lower-level error annotated with the action that failed.
    #[error("{context}: {source}")]
    Operation {
        /// Short description of the failed action, e.g. "failed to add credential".
        context: &'static str,
        /// The underlying cause.
        #[source]
        source: Box<PassTuiError>,
    },
}

impl PassTuiError {
    /// Wraps `source` with a description of the action that failed.
    #[must_use]
    pub fn operation(context: &'static str, source: Self) -> Self {
        Self::Operation {
            context,
            source: Box::new(source),
        }
    }

    /// Returns the innermost error, skipping any [`PassTuiError::Operation`] wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// A specialized `Result` type for pass-tui operations.
///
/// This is a type alias for `std::result::Result<T, PassTuiError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, PassTuiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_prefixes_context() {
        let err = PassTuiError::operation(
            "failed to delete credential",
            PassTuiError::NotFound("aws".into()),
        );
        assert_eq!(
            err.to_string(),
            "failed to delete credential: credential not found: aws"
        );
        assert!(matches!(err.root_cause(), PassTuiError::NotFound(s) if s == "aws"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PassTuiError = io.into();
        assert!(matches!(err, PassTuiError::Io(_)));
    }
}
