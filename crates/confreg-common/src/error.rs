//! Error types and error codes for confreg
//!
//! This module defines:
//! - `RegistryError`: the error taxonomy of the storage/indexing core
//! - `BackendError`: storage I/O failures raised by a key-value backend
//! - `ErrorCode`: structured error codes the calling layer maps to responses

use serde::{Deserialize, Serialize};

/// Failure of the underlying key-value store
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("encoding error: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for BackendError {
    fn from(value: serde_json::Error) -> Self {
        BackendError::Encoding(value.to_string())
    }
}

/// Errors returned by the config and group stores
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("caused: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("malformed key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },

    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl From<serde_json::Error> for RegistryError {
    fn from(value: serde_json::Error) -> Self {
        RegistryError::Backend(value.into())
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    /// `NotFound` for an entity identified by name and version
    pub fn not_found(kind: &str, name: &str, version: &str) -> Self {
        RegistryError::NotFound(format!("{} '{}/{}'", kind, name, version))
    }

    /// `Conflict` for an entity identified by name and version
    pub fn conflict(kind: &str, name: &str, version: &str) -> Self {
        RegistryError::Conflict(format!("{} '{}/{}'", kind, name, version))
    }

    pub fn malformed_key(key: &str, reason: impl Into<String>) -> Self {
        RegistryError::MalformedKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, RegistryError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, RegistryError::Conflict(_))
    }

    /// Structured error code for API responses
    pub fn error_code(&self) -> ErrorCode<'static> {
        match self {
            RegistryError::Validation(_) => PARAMETER_VALIDATE_ERROR,
            RegistryError::NotFound(_) => RESOURCE_NOT_FOUND,
            RegistryError::Conflict(_) => RESOURCE_CONFLICT,
            RegistryError::MalformedKey { .. } | RegistryError::Backend(_) => DATA_ACCESS_ERROR,
        }
    }

    /// HTTP status the calling layer should answer with
    pub fn http_status(&self) -> u16 {
        match self {
            RegistryError::Validation(_) => 400,
            RegistryError::NotFound(_) => 404,
            RegistryError::Conflict(_) => 409,
            RegistryError::MalformedKey { .. } => 500,
            RegistryError::Backend(BackendError::Network(_)) => 503,
            RegistryError::Backend(_) => 500,
        }
    }
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

pub const DATA_ACCESS_ERROR: ErrorCode<'static> = ErrorCode {
    code: 10002,
    message: "data access error",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 20004,
    message: "resource not found",
};

pub const RESOURCE_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: 20005,
    message: "resource conflict",
};
