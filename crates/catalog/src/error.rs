// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for Catalog operations
//!
//! This module defines the error types used throughout the catalog layer.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for Catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during Catalog operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogError {
    /// Failed to connect to the database
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    /// Query execution timed out
    #[error("Query timed out after {0}s")]
    QueryTimeout(u64),

    /// Requested database does not exist
    #[error("Database '{0}' does not exist")]
    DatabaseNotExist(String),

    /// Requested table was not found
    #[error("Table '{0}' not found in database '{1}'")]
    TableNotFound(String, String),

    /// Schema data could not be interpreted
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),

    /// Catalog data (fixture JSON or server metadata) could not be decoded
    #[error("Malformed catalog data: {0}")]
    SerializationError(String),

    /// Invalid catalog configuration
    #[error("Invalid catalog configuration: {0}")]
    ConfigurationError(String),

    /// Permission denied for requested operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Operation not supported by this catalog
    #[error("Not supported: {0}")]
    NotSupported(String),
}

impl CatalogError {
    /// Whether the error comes from the connection rather than the request
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            CatalogError::ConnectionFailed(_)
                | CatalogError::QueryTimeout(_)
                | CatalogError::PermissionDenied(_)
        )
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SerializationError(err.to_string())
    }
}
