use serde::Serialize;
use thiserror::Error;

use crate::validation::Violations;

/// Stable tag carried by every error the core produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    SizeExceeded,
    Network,
    InvalidCredentials,
    InvalidState,
    OperationInProgress,
    ValidationRejected,
    PayloadTooLarge,
    UploadFailed,
    Storage,
    Picker,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::SizeExceeded => "size_exceeded",
            ErrorKind::Network => "network",
            ErrorKind::InvalidCredentials => "invalid_credentials",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::OperationInProgress => "operation_in_progress",
            ErrorKind::ValidationRejected => "validation_rejected",
            ErrorKind::PayloadTooLarge => "payload_too_large",
            ErrorKind::UploadFailed => "upload_failed",
            ErrorKind::Storage => "storage",
            ErrorKind::Picker => "picker",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures reported by the credential gateway
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Invalid e-mail or password")]
    InvalidCredentials,

    /// The bearer token was rejected (expired or revoked)
    #[error("Session token was rejected by the server")]
    Unauthorized,

    #[error("Server rejected the request: {0}")]
    ValidationRejected(String),

    #[error("Payload exceeds the server upload limit")]
    PayloadTooLarge,

    #[error("Network error: {0}")]
    Network(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::InvalidCredentials | GatewayError::Unauthorized => {
                ErrorKind::InvalidCredentials
            }
            GatewayError::ValidationRejected(_) => ErrorKind::ValidationRejected,
            GatewayError::PayloadTooLarge => ErrorKind::PayloadTooLarge,
            GatewayError::Network(_) => ErrorKind::Network,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Network(err.to_string())
    }
}

/// Token storage failures
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored session is corrupt: {0}")]
    Corrupt(String),

    #[error("Token storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Storage
    }
}

/// Errors raised by session store operations
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Session ended before {operation} completed; result discarded")]
    Preempted { operation: &'static str },

    #[error("Cannot {operation}: the session belongs to a different user")]
    NotOwner { operation: &'static str },

    #[error("Another session operation is in progress")]
    OperationInProgress,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Token storage error: {0}")]
    Storage(#[from] StorageError),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::InvalidState { .. }
            | SessionError::Preempted { .. }
            | SessionError::NotOwner { .. } => ErrorKind::InvalidState,
            SessionError::OperationInProgress => ErrorKind::OperationInProgress,
            SessionError::Gateway(err) => err.kind(),
            SessionError::Storage(err) => err.kind(),
        }
    }
}

/// Errors raised by the avatar upload pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Image is {size_bytes} bytes, the limit is {limit} bytes")]
    SizeExceeded { size_bytes: u64, limit: u64 },

    #[error("Avatar upload failed: {0}")]
    UploadFailed(#[source] GatewayError),

    #[error("Image picker error: {0}")]
    Picker(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::SizeExceeded { .. } => ErrorKind::SizeExceeded,
            PipelineError::UploadFailed(_) => ErrorKind::UploadFailed,
            PipelineError::Picker(_) => ErrorKind::Picker,
            PipelineError::Session(err) => err.kind(),
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Picker(err.to_string())
    }
}

/// A form failed local validation; no network call was made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationFailed(pub Violations);

impl ValidationFailed {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }

    pub fn violations(&self) -> &Violations {
        &self.0
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
pub type StorageResult<T> = Result<T, StorageError>;
pub type SessionResult<T> = Result<T, SessionError>;
pub type PipelineResult<T> = Result<T, PipelineError>;
