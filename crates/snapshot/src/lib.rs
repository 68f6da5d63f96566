// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog Snapshot
//!
//! Builds an ordered mapping from table name to row type for one database of
//! a [`Catalog`](catalog_snapshot_catalog::Catalog).
//!
//! For every table the catalog lists, the builder:
//! 1. fetches the table definition by its `database.table` path
//! 2. derives a logical type for each physical column, in schema order
//! 3. labels the resulting [`RowType`] with the qualified table name
//! 4. records the primary key columns (empty when none is declared)
//!
//! ## Usage
//!
//! ```rust
//! use catalog_snapshot::build_snapshot;
//! use catalog_snapshot_catalog::{CatalogTable, Column, DataType, Schema, StaticCatalog};
//!
//! # tokio_test::block_on(async {
//! let catalog = StaticCatalog::new("demo", "test").with_table(
//!     "test",
//!     "users",
//!     CatalogTable::new(
//!         Schema::new()
//!             .with_column(Column::physical("id", DataType::INT).with_nullable(false))
//!             .with_column(Column::physical("name", DataType::varchar(50)))
//!             .with_primary_key("PRIMARY", &["id"]),
//!     ),
//! );
//!
//! let snapshot = build_snapshot(&catalog, "test").await.unwrap();
//! let users = snapshot.get("users").unwrap();
//! assert_eq!(users.row_type.to_string(), "ROW<`id` INT NOT NULL, `name` VARCHAR(50)>");
//! assert_eq!(users.primary_key, vec!["id"]);
//! # });
//! ```
//!
//! ## Failure policy
//!
//! A snapshot is all-or-nothing. The first table that cannot be resolved
//! aborts the build with a [`SnapshotError`] naming it.

pub mod builder;
pub mod error;
pub mod options;
pub mod row_type;
pub mod snapshot;

// Re-exports
pub use builder::{SnapshotBuilder, build_snapshot, resolve_table};
pub use error::{SnapshotError, SnapshotResult};
pub use options::{ColumnKindPolicy, PrimaryKeyPolicy, SnapshotOptions, TableFilter};
pub use row_type::{RowField, RowType};
pub use snapshot::{SkippedColumn, Snapshot, TableSnapshot};
