// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Catalog Snapshot - Schema Model
//!
//! This crate defines the schema types shared by catalogs and the snapshot builder:
//!
//! - [`DataType`]: the declared column type as reported by the source database
//! - [`LogicalType`]: the normalized engine type derived from a [`DataType`]
//! - [`Column`]: a sealed set of column variants (physical, computed, metadata)
//! - [`Schema`]: ordered columns plus an optional [`PrimaryKey`]
//! - [`CatalogTable`]: a table definition returned by a catalog
//! - [`ObjectPath`]: a `database.object` qualified name
//!
//! The derivation from declared to logical type is a pure function:
//!
//! ```rust
//! use catalog_snapshot_schema::{DataType, LogicalTypeRoot};
//!
//! let logical = DataType::Integer { unsigned: true }.to_logical_type(false).unwrap();
//! assert_eq!(logical.root, LogicalTypeRoot::BigInt);
//! assert_eq!(logical.to_string(), "BIGINT NOT NULL");
//! ```

pub mod data_type;
pub mod logical_type;
pub mod table;

// Re-export commonly used types
pub use data_type::DataType;
pub use logical_type::{LogicalType, LogicalTypeRoot, TypeError, MAX_DECIMAL_PRECISION, MAX_LENGTH};
pub use table::{
    CatalogTable, Column, ColumnKind, ComputedColumn, MetadataColumn, ObjectPath, PhysicalColumn,
    PrimaryKey, Schema, TableKind,
};
