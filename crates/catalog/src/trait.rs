// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog trait for database schema abstraction
//!
//! This module defines the async Catalog trait used for querying database schema information.

use crate::error::CatalogResult;
use catalog_snapshot_schema::{CatalogTable, ObjectPath};

/// Catalog trait for database schema abstraction
///
/// A catalog maps the databases and tables of a metadata store into
/// [`CatalogTable`] definitions. All operations are read-only.
///
/// # Examples
///
/// ```rust,ignore
/// use catalog_snapshot_catalog::{Catalog, CatalogResult};
///
/// async fn column_counts(catalog: &impl Catalog, db: &str) -> CatalogResult<Vec<(String, usize)>> {
///     let mut counts = Vec::new();
///     for table in catalog.list_tables(db).await? {
///         let path = ObjectPath::new(db, &table);
///         if let Some(def) = catalog.get_table(&path).await? {
///             counts.push((table, def.schema.columns.len()));
///         }
///     }
///     Ok(counts)
/// }
/// ```
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Name this catalog is registered under
    fn name(&self) -> &str;

    /// Database used when a caller does not name one
    fn default_database(&self) -> &str;

    /// List all databases visible to this catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ConnectionFailed` if database connection fails.
    /// Returns `CatalogError::QueryTimeout` if the query exceeds timeout.
    async fn list_databases(&self) -> CatalogResult<Vec<String>>;

    /// Check whether a database exists
    async fn database_exists(&self, database: &str) -> CatalogResult<bool> {
        Ok(self
            .list_databases()
            .await?
            .iter()
            .any(|db| db == database))
    }

    /// List the tables and views of a database, ordered by name
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DatabaseNotExist` if the database is unknown.
    /// Returns `CatalogError::ConnectionFailed` if database connection fails.
    async fn list_tables(&self, database: &str) -> CatalogResult<Vec<String>>;

    /// Check whether a table or view exists
    async fn table_exists(&self, path: &ObjectPath) -> CatalogResult<bool> {
        Ok(self.get_table(path).await?.is_some())
    }

    /// Get the definition of a table
    ///
    /// Returns `Ok(None)` when the path does not name an existing table.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PermissionDenied` if access is denied.
    /// Returns `CatalogError::QueryFailed` if the definition cannot be read.
    async fn get_table(&self, path: &ObjectPath) -> CatalogResult<Option<CatalogTable>>;
}
