//! Error types for the facade layer
//!
//! Lookups never fail; they return `Option`. Errors are reserved for
//! rejected mutations (method append, tag set) and for assembling a
//! program from checker output.

use crate::ObjectId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsterError {
    /// Method-set errors
    #[error("not a method: {name}")]
    NotMethod { name: String },

    #[error("receiver does not match method {method}: want {want}, got {got}")]
    ReceiverMismatch {
        method: String,
        want: String,
        got: String,
    },

    /// Struct tag errors
    #[error("tag key is not set")]
    TagKeyNotSet,

    #[error("bad syntax for struct tag key")]
    TagKeySyntax,

    #[error("bad syntax for struct tag pair")]
    TagSyntax,

    #[error("bad syntax for struct tag value")]
    TagValueSyntax,

    /// Index errors
    #[error("object {id:?} is not defined in package '{package}'")]
    UnknownObject { id: ObjectId, package: String },

    #[error("package '{path}' not found. Was it part of the checker output?")]
    PackageNotFound { path: String },

    #[error("package '{path}' was supplied more than once")]
    DuplicatePackage { path: String },

    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },
}

impl AsterError {
    /// Get a stable status code for this error type.
    pub fn status_code(&self) -> &'static str {
        match self {
            Self::NotMethod { .. } => "NOT_METHOD",
            Self::ReceiverMismatch { .. } => "RECEIVER_MISMATCH",
            Self::TagKeyNotSet => "TAG_KEY_NOT_SET",
            Self::TagKeySyntax => "TAG_KEY_SYNTAX",
            Self::TagSyntax => "TAG_SYNTAX",
            Self::TagValueSyntax => "TAG_VALUE_SYNTAX",
            Self::UnknownObject { .. } => "UNKNOWN_OBJECT",
            Self::PackageNotFound { .. } => "PACKAGE_NOT_FOUND",
            Self::DuplicatePackage { .. } => "DUPLICATE_PACKAGE",
            Self::ConfigError { .. } => "CONFIG_ERROR",
        }
    }
}

/// Result type alias for facade operations
pub type AsterResult<T> = Result<T, AsterError>;
