// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Declared data types
//!
//! [`DataType`] is the type a column was declared with in the source database,
//! including its parameters (length, precision, signedness). It is what the
//! catalog reports; the normalized form used downstream is
//! [`LogicalType`](crate::LogicalType).

use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL data types as declared by the source database
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DataType {
    // Boolean
    Boolean,

    // Integer types
    TinyInt { unsigned: bool },
    SmallInt { unsigned: bool },
    MediumInt { unsigned: bool },
    Integer { unsigned: bool },
    BigInt { unsigned: bool },

    // Decimal types
    Decimal {
        precision: Option<u8>,
        scale: Option<u8>,
    },
    Float,
    Double,

    // String types
    Char(Option<usize>),
    Varchar(Option<usize>),
    Text,

    // Binary types
    Binary(Option<usize>),
    VarBinary(Option<usize>),
    Blob,
    Bit(Option<usize>),

    // Date/Time types
    Date,
    Time(Option<u8>),
    DateTime(Option<u8>),
    Timestamp(Option<u8>),
    Year,

    // JSON
    Json,

    // Enumerations
    Enum(Vec<String>),
    Set(Vec<String>),

    // Unknown/Other (with original type name)
    Other(String),
}

impl DataType {
    /// Signed `INT`
    pub const INT: DataType = DataType::Integer { unsigned: false };

    /// Signed `BIGINT`
    pub const BIGINT: DataType = DataType::BigInt { unsigned: false };

    /// `DECIMAL(precision, scale)`
    pub fn decimal(precision: u8, scale: u8) -> Self {
        DataType::Decimal {
            precision: Some(precision),
            scale: Some(scale),
        }
    }

    /// `VARCHAR(length)`
    pub fn varchar(length: usize) -> Self {
        DataType::Varchar(Some(length))
    }

    /// Whether this type is one of the integer families
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::TinyInt { .. }
                | DataType::SmallInt { .. }
                | DataType::MediumInt { .. }
                | DataType::Integer { .. }
                | DataType::BigInt { .. }
        )
    }
}

fn write_length(f: &mut fmt::Formatter<'_>, name: &str, len: &Option<usize>) -> fmt::Result {
    match len {
        Some(len) => write!(f, "{}({})", name, len),
        None => f.write_str(name),
    }
}

fn write_precision(f: &mut fmt::Formatter<'_>, name: &str, precision: &Option<u8>) -> fmt::Result {
    match precision {
        Some(p) => write!(f, "{}({})", name, p),
        None => f.write_str(name),
    }
}

fn write_integer(f: &mut fmt::Formatter<'_>, name: &str, unsigned: bool) -> fmt::Result {
    if unsigned {
        write!(f, "{} UNSIGNED", name)
    } else {
        f.write_str(name)
    }
}

fn write_values(f: &mut fmt::Formatter<'_>, name: &str, values: &[String]) -> fmt::Result {
    let quoted: Vec<String> = values.iter().map(|v| format!("'{}'", v)).collect();
    write!(f, "{}({})", name, quoted.join(","))
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => f.write_str("BOOLEAN"),
            DataType::TinyInt { unsigned } => write_integer(f, "TINYINT", *unsigned),
            DataType::SmallInt { unsigned } => write_integer(f, "SMALLINT", *unsigned),
            DataType::MediumInt { unsigned } => write_integer(f, "MEDIUMINT", *unsigned),
            DataType::Integer { unsigned } => write_integer(f, "INT", *unsigned),
            DataType::BigInt { unsigned } => write_integer(f, "BIGINT", *unsigned),
            DataType::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => write!(f, "DECIMAL({}, {})", p, s),
                (Some(p), None) => write!(f, "DECIMAL({})", p),
                _ => f.write_str("DECIMAL"),
            },
            DataType::Float => f.write_str("FLOAT"),
            DataType::Double => f.write_str("DOUBLE"),
            DataType::Char(len) => write_length(f, "CHAR", len),
            DataType::Varchar(len) => write_length(f, "VARCHAR", len),
            DataType::Text => f.write_str("TEXT"),
            DataType::Binary(len) => write_length(f, "BINARY", len),
            DataType::VarBinary(len) => write_length(f, "VARBINARY", len),
            DataType::Blob => f.write_str("BLOB"),
            DataType::Bit(len) => write_length(f, "BIT", len),
            DataType::Date => f.write_str("DATE"),
            DataType::Time(p) => write_precision(f, "TIME", p),
            DataType::DateTime(p) => write_precision(f, "DATETIME", p),
            DataType::Timestamp(p) => write_precision(f, "TIMESTAMP", p),
            DataType::Year => f.write_str("YEAR"),
            DataType::Json => f.write_str("JSON"),
            DataType::Enum(values) => write_values(f, "ENUM", values),
            DataType::Set(values) => write_values(f, "SET", values),
            DataType::Other(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parameterized_types() {
        assert_eq!(DataType::varchar(50).to_string(), "VARCHAR(50)");
        assert_eq!(DataType::decimal(10, 2).to_string(), "DECIMAL(10, 2)");
        assert_eq!(DataType::Integer { unsigned: true }.to_string(), "INT UNSIGNED");
        assert_eq!(DataType::DateTime(Some(3)).to_string(), "DATETIME(3)");
        assert_eq!(DataType::Timestamp(None).to_string(), "TIMESTAMP");
    }

    #[test]
    fn test_display_enum_values() {
        let dt = DataType::Enum(vec!["new".to_string(), "paid".to_string()]);
        assert_eq!(dt.to_string(), "ENUM('new','paid')");
    }

    #[test]
    fn test_display_other_keeps_raw_name() {
        assert_eq!(DataType::Other("geometry".to_string()).to_string(), "geometry");
    }

    #[test]
    fn test_is_integer() {
        assert!(DataType::INT.is_integer());
        assert!(DataType::TinyInt { unsigned: true }.is_integer());
        assert!(!DataType::Double.is_integer());
    }
}
