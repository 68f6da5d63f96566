// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock catalog implementation for testing
//!
//! Wraps a [`StaticCatalog`] with fault injection (failing or vanishing
//! tables, an unreachable server) and records every call it receives.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use catalog_snapshot_catalog::{
    Catalog, CatalogError, CatalogResult, CatalogTable, ObjectPath, StaticCatalog,
};

use crate::fixtures::SchemaFixtures;

/// Counts of catalog calls observed by a [`MockCatalog`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallStats {
    pub list_databases: usize,
    pub list_tables: usize,
    pub get_table: usize,
}

#[derive(Debug, Default)]
struct CallLog {
    list_databases: AtomicUsize,
    list_tables: AtomicUsize,
    get_table: AtomicUsize,
    requested: Mutex<Vec<String>>,
}

/// In-memory mock catalog for testing
///
/// Clones share their call log.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    inner: StaticCatalog,
    list_failure: Option<CatalogError>,
    table_failures: HashMap<String, CatalogError>,
    vanished: HashSet<String>,
    calls: Arc<CallLog>,
}

impl MockCatalog {
    /// Wrap a static catalog
    pub fn new(inner: StaticCatalog) -> Self {
        Self {
            inner,
            list_failure: None,
            table_failures: HashMap::new(),
            vanished: HashSet::new(),
            calls: Arc::new(CallLog::default()),
        }
    }

    /// Snapshot of the call counters
    pub fn calls(&self) -> CallStats {
        CallStats {
            list_databases: self.calls.list_databases.load(Ordering::SeqCst),
            list_tables: self.calls.list_tables.load(Ordering::SeqCst),
            get_table: self.calls.get_table.load(Ordering::SeqCst),
        }
    }

    /// Tables passed to `get_table`, in call order
    pub fn requested_tables(&self) -> Vec<String> {
        self.calls
            .requested
            .lock()
            .map(|requested| requested.clone())
            .unwrap_or_default()
    }

    /// The wrapped catalog
    pub fn inner(&self) -> &StaticCatalog {
        &self.inner
    }
}

#[async_trait::async_trait]
impl Catalog for MockCatalog {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn default_database(&self) -> &str {
        self.inner.default_database()
    }

    async fn list_databases(&self) -> CatalogResult<Vec<String>> {
        self.calls.list_databases.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.list_failure {
            return Err(err.clone());
        }
        self.inner.list_databases().await
    }

    async fn list_tables(&self, database: &str) -> CatalogResult<Vec<String>> {
        self.calls.list_tables.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.list_failure {
            return Err(err.clone());
        }
        self.inner.list_tables(database).await
    }

    async fn get_table(&self, path: &ObjectPath) -> CatalogResult<Option<CatalogTable>> {
        self.calls.get_table.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.calls.requested.lock() {
            requested.push(path.object.clone());
        }

        if let Some(err) = self.table_failures.get(&path.object) {
            return Err(err.clone());
        }
        if self.vanished.contains(&path.object) {
            return Ok(None);
        }
        self.inner.get_table(path).await
    }
}

/// Builder for creating mock catalogs with a fluent API
pub struct MockCatalogBuilder {
    inner: StaticCatalog,
    list_failure: Option<CatalogError>,
    table_failures: HashMap<String, CatalogError>,
    vanished: HashSet<String>,
}

impl Default for MockCatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalogBuilder {
    /// Create a builder over an empty `test` database
    pub fn new() -> Self {
        Self::from_catalog(StaticCatalog::new("mock_catalog", "test"))
    }

    /// Create a builder over an existing static catalog
    pub fn from_catalog(inner: StaticCatalog) -> Self {
        Self {
            inner,
            list_failure: None,
            table_failures: HashMap::new(),
            vanished: HashSet::new(),
        }
    }

    /// Use the standard `users`/`orders` schema in database `test`
    pub fn with_standard_schema(mut self) -> Self {
        self.inner = SchemaFixtures::shop_catalog();
        self
    }

    /// Add a table to the catalog
    pub fn with_table(
        mut self,
        database: impl Into<String>,
        table: impl Into<String>,
        definition: CatalogTable,
    ) -> Self {
        self.inner.insert_table(database, table, definition);
        self
    }

    /// Make every listing call fail with `error`
    pub fn failing_listing(mut self, error: CatalogError) -> Self {
        self.list_failure = Some(error);
        self
    }

    /// Make `get_table` fail with `error` for the named table
    pub fn failing_table(mut self, table: impl Into<String>, error: CatalogError) -> Self {
        self.table_failures.insert(table.into(), error);
        self
    }

    /// Keep the named table listed but make `get_table` report it absent
    pub fn vanishing_table(mut self, table: impl Into<String>) -> Self {
        self.vanished.insert(table.into());
        self
    }

    /// Build the mock catalog
    pub fn build(self) -> MockCatalog {
        MockCatalog {
            inner: self.inner,
            list_failure: self.list_failure,
            table_failures: self.table_failures,
            vanished: self.vanished,
            calls: Arc::new(CallLog::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_catalog_list_tables() {
        let catalog = MockCatalogBuilder::new().with_standard_schema().build();

        let tables = catalog.list_tables("test").await.unwrap();
        assert_eq!(tables, vec!["users", "orders"]);
        assert_eq!(catalog.calls().list_tables, 1);
    }

    #[tokio::test]
    async fn test_mock_catalog_records_requests() {
        let catalog = MockCatalogBuilder::new().with_standard_schema().build();
        let shared = catalog.clone();

        catalog.get_table(&ObjectPath::new("test", "orders")).await.unwrap();
        catalog.get_table(&ObjectPath::new("test", "users")).await.unwrap();

        assert_eq!(shared.calls().get_table, 2);
        assert_eq!(shared.requested_tables(), vec!["orders", "users"]);
    }

    #[tokio::test]
    async fn test_mock_catalog_failing_table() {
        let catalog = MockCatalogBuilder::new()
            .with_standard_schema()
            .failing_table("orders", CatalogError::QueryTimeout(5))
            .build();

        let result = catalog.get_table(&ObjectPath::new("test", "orders")).await;
        assert_eq!(result, Err(CatalogError::QueryTimeout(5)));
        assert!(
            catalog
                .get_table(&ObjectPath::new("test", "users"))
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_mock_catalog_vanishing_table() {
        let catalog = MockCatalogBuilder::new()
            .with_standard_schema()
            .vanishing_table("users")
            .build();

        assert!(catalog.list_tables("test").await.unwrap().contains(&"users".to_string()));
        let table = catalog.get_table(&ObjectPath::new("test", "users")).await.unwrap();
        assert!(table.is_none());
    }

    #[tokio::test]
    async fn test_mock_catalog_failing_listing() {
        let catalog = MockCatalogBuilder::new()
            .failing_listing(CatalogError::ConnectionFailed("refused".to_string()))
            .build();

        assert!(catalog.list_tables("test").await.is_err());
        assert!(catalog.list_databases().await.is_err());
    }
}
