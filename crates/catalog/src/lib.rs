// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog Snapshot - Catalog Layer
//!
//! This crate provides the catalog abstraction the snapshot builder reads from.
//! It defines the `Catalog` trait and two implementations:
//!
//! - **Live MySQL Catalog**: reads `information_schema` over a `sqlx` pool
//!   (feature `mysql`, enabled by default)
//! - **Static Catalog**: in-memory definitions, built in code or loaded from JSON
//!
//! ## Architecture
//!
//! The catalog layer is responsible for:
//! - Listing the databases and tables of a metadata store
//! - Resolving a qualified table path into a [`CatalogTable`]
//! - Mapping source column types into a declared [`DataType`]
//!
//! Catalogs are read-only. A catalog handle is owned by its creator and only
//! borrowed by consumers.
//!
//! ## Usage
//!
//! ```rust
//! use catalog_snapshot_catalog::{Catalog, CatalogError, ObjectPath};
//!
//! async fn print_tables(catalog: &impl Catalog, database: &str) -> Result<(), CatalogError> {
//!     for table in catalog.list_tables(database).await? {
//!         let path = ObjectPath::new(database, &table);
//!         if let Some(definition) = catalog.get_table(&path).await? {
//!             println!("{}: {} columns", path, definition.schema.columns.len());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
#[cfg(feature = "mysql")]
pub mod live_mysql;
pub mod mysql_types;
pub mod r#static;
pub mod r#trait;

// Re-exports
pub use error::{CatalogError, CatalogResult};
#[cfg(feature = "mysql")]
pub use live_mysql::{MySqlCatalog, MySqlCatalogConfig};
pub use mysql_types::parse_mysql_type;
pub use r#static::StaticCatalog;
pub use r#trait::Catalog;

pub use catalog_snapshot_schema::{
    CatalogTable, Column, ColumnKind, DataType, ObjectPath, PrimaryKey, Schema, TableKind,
};
