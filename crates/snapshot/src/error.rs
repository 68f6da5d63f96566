// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for snapshot building
//!
//! Every variant that concerns a single table names it, so a failed run can
//! report which table stopped the snapshot.

use catalog_snapshot_catalog::CatalogError;
use catalog_snapshot_schema::{ColumnKind, TypeError};
use thiserror::Error;

/// Result type alias for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

fn location(database: &str, table: &Option<String>) -> String {
    match table {
        Some(table) => format!("table '{}.{}'", database, table),
        None => format!("database '{}'", database),
    }
}

/// Errors that abort a snapshot
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SnapshotError {
    /// No database name was given
    #[error("Database name cannot be empty")]
    EmptyDatabaseName,

    /// Listing tables or reading a definition failed
    #[error("Catalog unreachable while reading {}", location(.database, .table))]
    CatalogUnreachable {
        database: String,
        table: Option<String>,
        #[source]
        source: CatalogError,
    },

    /// A listed table has no definition
    #[error("Table '{database}.{table}' was listed but could not be resolved")]
    TableNotFound { database: String, table: String },

    /// A column is not a physical column
    #[error("Column '{column}' of table '{table}' is a {kind} column; only physical columns are supported")]
    UnsupportedColumnKind {
        table: String,
        column: String,
        kind: ColumnKind,
    },

    /// A physical column's type has no logical counterpart
    #[error("Column '{column}' of table '{table}' has an unsupported type")]
    UnsupportedDataType {
        table: String,
        column: String,
        #[source]
        source: TypeError,
    },

    /// A primary key was required but the table declares none
    #[error("Table '{table}' declares no primary key")]
    MissingPrimaryKey { table: String },
}

impl SnapshotError {
    /// Table the error concerns, if any
    pub fn table(&self) -> Option<&str> {
        match self {
            SnapshotError::EmptyDatabaseName => None,
            SnapshotError::CatalogUnreachable { table, .. } => table.as_deref(),
            SnapshotError::TableNotFound { table, .. }
            | SnapshotError::UnsupportedColumnKind { table, .. }
            | SnapshotError::UnsupportedDataType { table, .. }
            | SnapshotError::MissingPrimaryKey { table } => Some(table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_unreachable_display() {
        let err = SnapshotError::CatalogUnreachable {
            database: "test".to_string(),
            table: None,
            source: CatalogError::ConnectionFailed("refused".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Catalog unreachable while reading database 'test'"
        );
        assert_eq!(err.table(), None);

        let err = SnapshotError::CatalogUnreachable {
            database: "test".to_string(),
            table: Some("users".to_string()),
            source: CatalogError::QueryTimeout(5),
        };
        assert!(err.to_string().contains("table 'test.users'"));
        assert_eq!(err.table(), Some("users"));
    }

    #[test]
    fn test_cause_reported_once_in_chain() {
        use std::error::Error;

        let err = SnapshotError::CatalogUnreachable {
            database: "test".to_string(),
            table: Some("orders".to_string()),
            source: CatalogError::QueryTimeout(5),
        };
        assert!(!err.to_string().contains("timed out"));
        let cause = err.source().map(|s| s.to_string());
        assert_eq!(cause.as_deref(), Some("Query timed out after 5s"));

        let err = SnapshotError::UnsupportedDataType {
            table: "regions".to_string(),
            column: "shape".to_string(),
            source: TypeError::UnsupportedType("geometry".to_string()),
        };
        assert!(!err.to_string().contains("geometry"));
        assert!(err.source().is_some_and(|s| s.to_string().contains("geometry")));
    }

    #[test]
    fn test_unsupported_column_kind_display() {
        let err = SnapshotError::UnsupportedColumnKind {
            table: "orders".to_string(),
            column: "total".to_string(),
            kind: ColumnKind::Computed,
        };
        assert!(err.to_string().contains("computed column"));
        assert_eq!(err.table(), Some("orders"));
    }

    #[test]
    fn test_missing_primary_key_display() {
        let err = SnapshotError::MissingPrimaryKey {
            table: "view_x".to_string(),
        };
        assert_eq!(err.to_string(), "Table 'view_x' declares no primary key");
    }
}
