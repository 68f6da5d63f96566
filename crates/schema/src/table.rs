// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Table definitions
//!
//! Types describing a table as a catalog reports it: its qualified path,
//! its unresolved schema (columns and primary key), and table-level
//! properties such as kind, comment and connector options.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::data_type::DataType;

/// Qualified name of a catalog object (`database.object`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectPath {
    pub database: String,
    pub object: String,
}

impl ObjectPath {
    pub fn new(database: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            object: object.into(),
        }
    }

    /// Full name in `database.object` form
    pub fn full_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database, self.object)
    }
}

/// A column backed by stored data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalColumn {
    /// Column name
    pub name: String,
    /// Declared data type
    pub data_type: DataType,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Column comment/description
    pub comment: Option<String>,
}

/// A column computed from an expression over other columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedColumn {
    pub name: String,
    /// SQL expression the value is generated from
    pub expression: String,
    pub comment: Option<String>,
}

/// A column exposing connector or system metadata rather than row data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataColumn {
    pub name: String,
    pub data_type: DataType,
    /// Metadata key, when different from the column name
    pub metadata_key: Option<String>,
    /// Virtual metadata columns are read-only
    pub is_virtual: bool,
    pub comment: Option<String>,
}

/// Column kind discriminant, used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Physical,
    Computed,
    Metadata,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Physical => f.write_str("physical"),
            ColumnKind::Computed => f.write_str("computed"),
            ColumnKind::Metadata => f.write_str("metadata"),
        }
    }
}

/// A schema column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Column {
    Physical(PhysicalColumn),
    Computed(ComputedColumn),
    Metadata(MetadataColumn),
}

impl Column {
    /// Create a nullable physical column
    pub fn physical(name: impl Into<String>, data_type: DataType) -> Self {
        Column::Physical(PhysicalColumn {
            name: name.into(),
            data_type,
            nullable: true,
            comment: None,
        })
    }

    /// Create a computed column
    pub fn computed(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Column::Computed(ComputedColumn {
            name: name.into(),
            expression: expression.into(),
            comment: None,
        })
    }

    /// Create a virtual metadata column keyed by its own name
    pub fn metadata(name: impl Into<String>, data_type: DataType) -> Self {
        Column::Metadata(MetadataColumn {
            name: name.into(),
            data_type,
            metadata_key: None,
            is_virtual: true,
            comment: None,
        })
    }

    /// Builder method: set nullable (no effect on computed columns)
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        if let Column::Physical(col) = &mut self {
            col.nullable = nullable;
        }
        self
    }

    /// Builder method: set comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = Some(comment.into());
        match &mut self {
            Column::Physical(col) => col.comment = comment,
            Column::Computed(col) => col.comment = comment,
            Column::Metadata(col) => col.comment = comment,
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            Column::Physical(col) => &col.name,
            Column::Computed(col) => &col.name,
            Column::Metadata(col) => &col.name,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Physical(_) => ColumnKind::Physical,
            Column::Computed(_) => ColumnKind::Computed,
            Column::Metadata(_) => ColumnKind::Metadata,
        }
    }

    /// The physical column, if this is one
    pub fn as_physical(&self) -> Option<&PhysicalColumn> {
        match self {
            Column::Physical(col) => Some(col),
            _ => None,
        }
    }
}

/// Primary key constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryKey {
    pub constraint_name: String,
    /// Key columns in key order
    pub columns: Vec<String>,
}

impl PrimaryKey {
    pub fn new(constraint_name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            constraint_name: constraint_name.into(),
            columns,
        }
    }
}

/// Unresolved table schema: ordered columns plus an optional primary key
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<Column>,
    pub primary_key: Option<PrimaryKey>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: append a column
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Builder method: replace all columns
    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Builder method: set the primary key
    pub fn with_primary_key(
        mut self,
        constraint_name: impl Into<String>,
        columns: &[&str],
    ) -> Self {
        self.primary_key = Some(PrimaryKey::new(
            constraint_name,
            columns.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    /// Get column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Primary key column names, empty when no key is declared
    pub fn primary_key_columns(&self) -> &[String] {
        self.primary_key
            .as_ref()
            .map(|pk| pk.columns.as_slice())
            .unwrap_or(&[])
    }
}

/// Table type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    #[default]
    Table,
    View,
}

/// A table definition as returned by a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTable {
    pub schema: Schema,
    pub kind: TableKind,
    pub comment: Option<String>,
    /// Connector options describing how to reach the table's data
    pub options: BTreeMap<String, String>,
}

impl CatalogTable {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            kind: TableKind::Table,
            comment: None,
            options: BTreeMap::new(),
        }
    }

    /// Builder method: set table kind
    pub fn with_kind(mut self, kind: TableKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builder method: set comment
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Builder method: add a connector option
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn is_view(&self) -> bool {
        self.kind == TableKind::View
    }
}
