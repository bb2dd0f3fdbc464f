//! Error types for novadb
//!
//! This module defines the various error types that can occur
//! during database operations.

use thiserror::Error;
use crate::core::codec::CodecKind;
use crate::core::path::PathError;

/// Errors that can occur during database operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Type mismatch at '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Database limit exceeded ({limit} keys)")]
    LimitExceeded { limit: usize },

    #[error("The {format} codec requires the '{package}' crate (enable the '{feature}' feature)")]
    MissingDependency {
        format: CodecKind,
        package: &'static str,
        feature: &'static str,
    },

    #[error("{format} codec error: {message}")]
    Codec { format: CodecKind, message: String },

    #[error("Not constructible: {0}")]
    NotConstructible(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path error: {0}")]
    Path(#[from] PathError),
}

impl StoreError {
    /// Build a codec error from any displayable failure
    pub fn codec<E: std::fmt::Display>(format: CodecKind, err: E) -> Self {
        StoreError::Codec { format, message: err.to_string() }
    }
}

/// Result type for database operations
pub type Result<T> = std::result::Result<T, StoreError>;
