// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Row types
//!
//! A [`RowType`] describes the shape of a table: its fields in physical column
//! order, each with the declared and the derived logical type. Field order is
//! positional and always matches the source schema.

use catalog_snapshot_schema::{DataType, LogicalType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One field of a row type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowField {
    pub name: String,
    /// Type as declared in the source schema
    pub data_type: DataType,
    /// Normalized type derived from `data_type`
    pub logical_type: LogicalType,
}

impl RowField {
    pub fn new(name: impl Into<String>, data_type: DataType, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            data_type,
            logical_type,
        }
    }
}

/// Ordered field list with a type name label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowType {
    pub type_name: String,
    pub fields: Vec<RowField>,
}

impl RowType {
    pub fn new(type_name: impl Into<String>, fields: Vec<RowField>) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn logical_types(&self) -> Vec<LogicalType> {
        self.fields.iter().map(|f| f.logical_type).collect()
    }

    /// Get field by name
    pub fn field(&self, name: &str) -> Option<&RowField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of a field in the row
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for RowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ROW<")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "`{}` {}", field.name, field.logical_type)?;
        }
        f.write_str(">")
    }
}
