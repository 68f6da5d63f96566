// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Snapshot types
//!
//! A [`Snapshot`] maps table names to [`TableSnapshot`]s in the order the
//! catalog listed them. It serializes to the compact form
//!
//! ```json
//! { "users": { "typeName": "test.users",
//!              "columns": [{ "name": "id", "type": "INT NOT NULL" }],
//!              "primaryKey": ["id"] } }
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use std::fmt;

use crate::row_type::RowType;
use catalog_snapshot_schema::{ColumnKind, TableKind};

/// A column left out of a row type
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SkippedColumn {
    pub name: String,
    pub kind: ColumnKind,
}

/// Resolved metadata of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    pub row_type: RowType,
    /// Primary key columns in key order; empty when none is declared
    pub primary_key: Vec<String>,
    pub kind: TableKind,
    pub skipped_columns: Vec<SkippedColumn>,
}

impl TableSnapshot {
    pub fn has_primary_key(&self) -> bool {
        !self.primary_key.is_empty()
    }
}

impl fmt::Display for TableSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.row_type)?;
        if self.has_primary_key() {
            write!(f, " PRIMARY KEY ({})", self.primary_key.join(", "))?;
        }
        Ok(())
    }
}

struct ColumnEntry<'a>(&'a crate::row_type::RowField);

impl Serialize for ColumnEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Column", 2)?;
        state.serialize_field("name", &self.0.name)?;
        state.serialize_field("type", &self.0.logical_type.to_string())?;
        state.end()
    }
}

impl Serialize for TableSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let skipped = !self.skipped_columns.is_empty();
        let columns: Vec<ColumnEntry<'_>> = self.row_type.fields.iter().map(ColumnEntry).collect();

        let mut state = serializer.serialize_struct("TableSnapshot", if skipped { 4 } else { 3 })?;
        state.serialize_field("typeName", &self.row_type.type_name)?;
        state.serialize_field("columns", &columns)?;
        state.serialize_field("primaryKey", &self.primary_key)?;
        if skipped {
            state.serialize_field("skippedColumns", &self.skipped_columns)?;
        } else {
            state.skip_field("skippedColumns")?;
        }
        state.end()
    }
}

/// Complete table-name to table-metadata mapping for one database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub database: String,
    pub tables: IndexMap<String, TableSnapshot>,
}

impl Snapshot {
    pub fn new(database: impl Into<String>, tables: IndexMap<String, TableSnapshot>) -> Self {
        Self {
            database: database.into(),
            tables,
        }
    }

    /// Table names in listing order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn get(&self, table: &str) -> Option<&TableSnapshot> {
        self.tables.get(table)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TableSnapshot)> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Serialize to a JSON value
    pub fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Serialize to pretty-printed JSON, keeping table order
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (name, table) in &self.tables {
            map.serialize_entry(name, table)?;
        }
        map.end()
    }
}
