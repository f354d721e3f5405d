//! Application error types with rich context

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Fallback text shown when a failure carries no server message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Backend/HTTP Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Request failed: {message}")]
    Request { message: String },

    #[error("Server returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Unexpected response: {message}")]
    Decode { message: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    // ─────────────────────────────────────────────────────────────
    // Client-side Validation Errors
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Validation(ValidationErrors),

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Request { .. }
                | Error::Http { .. }
                | Error::Decode { .. }
                | Error::NotFound { .. }
                | Error::Validation(_)
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Terminal { .. } | Error::Config { .. })
    }

    /// Whether the user has to sign in again before retrying.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }

    /// Text suitable for a toast or an inline form error.
    ///
    /// Server-provided messages are passed through; everything else
    /// collapses to a short generic sentence.
    pub fn user_message(&self) -> String {
        match self {
            Error::Http { message, .. } if !message.trim().is_empty() => message.clone(),
            Error::Http { status, .. } => format!("Request failed ({status})"),
            Error::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            Error::Request { .. } => "Could not reach the server.".to_string(),
            Error::NotFound { what } => format!("{what} no longer exists."),
            Error::Validation(errors) => errors.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
