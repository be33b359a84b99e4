//! Common error type definitions.

use strum::{AsRefStr, Display, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of errors raised by secondary file systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Path is malformed or escapes the root.
    InvalidPath,
    /// File or parent directory does not exist.
    NotFound,
    /// File exists and overwrite was not requested.
    AlreadyExists,
    /// Caller lacks permission for the operation.
    PermissionDenied,
    /// Underlying I/O failure.
    Io,
    /// Operation is not supported by the backend.
    Unsupported,
    /// Configuration is invalid.
    Configuration,
    /// Backend-specific failure.
    Backend,
}

/// A structured error type for secondary file system operations.
#[derive(Debug, Error)]
#[error("{kind}{}", .message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional error message.
    pub message: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a new invalid path error.
    pub fn invalid_path() -> Self {
        Self::new(ErrorKind::InvalidPath)
    }

    /// Creates a new not found error.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    /// Creates a new already exists error.
    pub fn already_exists() -> Self {
        Self::new(ErrorKind::AlreadyExists)
    }

    /// Creates a new permission denied error.
    pub fn permission_denied() -> Self {
        Self::new(ErrorKind::PermissionDenied)
    }

    /// Creates a new I/O error.
    pub fn io() -> Self {
        Self::new(ErrorKind::Io)
    }

    /// Creates a new unsupported operation error.
    pub fn unsupported() -> Self {
        Self::new(ErrorKind::Unsupported)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new backend error.
    pub fn backend() -> Self {
        Self::new(ErrorKind::Backend)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind as IoKind;

        let kind = match err.kind() {
            IoKind::NotFound => ErrorKind::NotFound,
            IoKind::AlreadyExists => ErrorKind::AlreadyExists,
            IoKind::PermissionDenied => ErrorKind::PermissionDenied,
            IoKind::Unsupported => ErrorKind::Unsupported,
            _ => ErrorKind::Io,
        };

        Self::new(kind).with_message(err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = Error::not_found().with_message("/a/b.txt");
        assert_eq!(err.to_string(), "not_found: /a/b.txt");
        assert_eq!(Error::backend().to_string(), "backend");
    }

    #[test]
    fn io_errors_keep_their_classification() {
        let err: Error = std::io::Error::from(std::io::ErrorKind::AlreadyExists).into();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert!(std::error::Error::source(&err).is_some());

        let err: Error = std::io::Error::other("disk on fire").into();
        assert_eq!(err.kind_str(), "io");
    }
}
