//! Unified error types for mobscan.
//!
//! The normalizer and classifier are total and never produce these errors.
//! Only the network-facing lifecycle steps, configuration loading and file
//! IO can fail.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for mobscan operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MobscanError {
    /// Nothing selected to act on (no file, no identity)
    #[error("{0}")]
    Input(InputErrorKind),

    /// Network or service failure on upload, trigger, poll or fetch
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: TransportErrorKind,
    },

    /// Report text that is not JSON at all
    #[error("Malformed report: {0}")]
    MalformedReport(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Locally handled input problems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputErrorKind {
    #[error("Choose an APK first.")]
    NoFileSelected,

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("No hash selected")]
    NoIdentitySelected,
}

/// Specific transport error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransportErrorKind {
    #[error("{0}")]
    Network(String),

    /// Non-success status; carries the best-effort server detail
    #[error("service returned {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("response carried no scan identity")]
    MissingIdentity,

    #[error("endpoint not configured: {0}")]
    EndpointUnavailable(String),

    #[error("{0}")]
    Timeout(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for mobscan operations
pub type Result<T> = std::result::Result<T, MobscanError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl MobscanError {
    /// Create an input error
    pub const fn input(kind: InputErrorKind) -> Self {
        Self::Input(kind)
    }

    /// Create a transport error with context
    pub fn transport(context: impl Into<String>, source: TransportErrorKind) -> Self {
        Self::Transport {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error should move a scan session into its error state.
    ///
    /// Input errors are surfaced inline and leave the session untouched.
    #[must_use]
    pub const fn is_fatal_for_session(&self) -> bool {
        !matches!(self, Self::Input(_))
    }

    /// The server-provided detail, if the service sent one.
    #[must_use]
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            Self::Transport {
                source: TransportErrorKind::Status { detail, .. },
                ..
            } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for MobscanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for MobscanError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedReport(err.to_string())
    }
}

impl From<InputErrorKind> for MobscanError {
    fn from(kind: InputErrorKind) -> Self {
        Self::Input(kind)
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to any existing context, so a failure
/// deep inside the client reads as `"fetching report: POST /api/v1/report_json: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<MobscanError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
///
/// Input errors are user-facing sentences and keep their text.
fn add_context_to_error(err: MobscanError, new_ctx: &str) -> MobscanError {
    match err {
        MobscanError::Transport {
            context: existing,
            source,
        } => MobscanError::Transport {
            context: chain_context(new_ctx, &existing),
            source,
        },
        MobscanError::MalformedReport(msg) => {
            MobscanError::MalformedReport(chain_context(new_ctx, &msg))
        }
        MobscanError::Io {
            path,
            message,
            source,
        } => MobscanError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        MobscanError::Config(msg) => MobscanError::Config(chain_context(new_ctx, &msg)),
        MobscanError::Validation(msg) => MobscanError::Validation(chain_context(new_ctx, &msg)),
        input @ MobscanError::Input(_) => input,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
