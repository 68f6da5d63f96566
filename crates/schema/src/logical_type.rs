// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Logical types
//!
//! A [`LogicalType`] is the normalized, engine-internal representation of a
//! column type. It is derived from a declared [`DataType`] and the column's
//! nullability by [`DataType::to_logical_type`], which is deterministic and
//! has no side effects.
//!
//! ## Mapping
//!
//! | Declared                       | Logical                  |
//! |--------------------------------|--------------------------|
//! | `BOOLEAN`, `BIT(1)`            | `BOOLEAN`                |
//! | `TINYINT` / `UNSIGNED`         | `TINYINT` / `SMALLINT`   |
//! | `SMALLINT` / `UNSIGNED`        | `SMALLINT` / `INT`       |
//! | `MEDIUMINT`                    | `INT`                    |
//! | `INT` / `UNSIGNED`             | `INT` / `BIGINT`         |
//! | `BIGINT` / `UNSIGNED`          | `BIGINT` / `DECIMAL(20, 0)` |
//! | `DECIMAL(p, s)`, p <= 38       | `DECIMAL(p, s)`          |
//! | `DECIMAL(p, s)`, p > 38        | `STRING`                 |
//! | `CHAR(n)` / `VARCHAR(n)`       | `CHAR(n)` / `VARCHAR(n)` |
//! | `TEXT`, `JSON`, `ENUM`, `SET`  | `STRING`                 |
//! | `BINARY`, `VARBINARY`, `BLOB`  | `BYTES`                  |
//! | `DATETIME(p)`, `TIMESTAMP(p)`  | `TIMESTAMP(p)`           |
//! | `YEAR`                         | `INT`                    |

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::data_type::DataType;

/// Maximum length of variable-length character and binary types
pub const MAX_LENGTH: usize = i32::MAX as usize;

/// Maximum precision of an exact numeric
pub const MAX_DECIMAL_PRECISION: u8 = 38;

const DEFAULT_DECIMAL_PRECISION: u8 = 10;
const MAX_TIME_PRECISION: u8 = 9;

/// Errors raised when a declared type has no logical counterpart
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum TypeError {
    /// The declared type is not known to the type mapping
    #[error("Unsupported data type '{0}'")]
    UnsupportedType(String),

    /// The declared type carries parameters outside the supported range
    #[error("Invalid parameters for data type '{data_type}': {reason}")]
    InvalidParameters { data_type: String, reason: String },
}

/// Root of a logical type, without nullability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalTypeRoot {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Decimal { precision: u8, scale: u8 },
    Float,
    Double,
    Char { length: usize },
    Varchar { length: usize },
    Binary { length: usize },
    VarBinary { length: usize },
    Date,
    Time { precision: u8 },
    Timestamp { precision: u8 },
}

/// Normalized column type used for execution and type checking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicalType {
    pub root: LogicalTypeRoot,
    pub nullable: bool,
}

impl LogicalType {
    pub fn new(root: LogicalTypeRoot, nullable: bool) -> Self {
        Self { root, nullable }
    }

    /// `VARCHAR` of maximum length
    pub fn string(nullable: bool) -> Self {
        Self::new(LogicalTypeRoot::Varchar { length: MAX_LENGTH }, nullable)
    }

    /// `VARBINARY` of maximum length
    pub fn bytes(nullable: bool) -> Self {
        Self::new(LogicalTypeRoot::VarBinary { length: MAX_LENGTH }, nullable)
    }

    /// Copy of this type with a different nullability
    pub fn with_nullable(self, nullable: bool) -> Self {
        Self { nullable, ..self }
    }
}

impl fmt::Display for LogicalTypeRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalTypeRoot::Boolean => f.write_str("BOOLEAN"),
            LogicalTypeRoot::TinyInt => f.write_str("TINYINT"),
            LogicalTypeRoot::SmallInt => f.write_str("SMALLINT"),
            LogicalTypeRoot::Int => f.write_str("INT"),
            LogicalTypeRoot::BigInt => f.write_str("BIGINT"),
            LogicalTypeRoot::Decimal { precision, scale } => {
                write!(f, "DECIMAL({}, {})", precision, scale)
            }
            LogicalTypeRoot::Float => f.write_str("FLOAT"),
            LogicalTypeRoot::Double => f.write_str("DOUBLE"),
            LogicalTypeRoot::Char { length } => write!(f, "CHAR({})", length),
            LogicalTypeRoot::Varchar { length } if *length == MAX_LENGTH => f.write_str("STRING"),
            LogicalTypeRoot::Varchar { length } => write!(f, "VARCHAR({})", length),
            LogicalTypeRoot::Binary { length } => write!(f, "BINARY({})", length),
            LogicalTypeRoot::VarBinary { length } if *length == MAX_LENGTH => {
                f.write_str("BYTES")
            }
            LogicalTypeRoot::VarBinary { length } => write!(f, "VARBINARY({})", length),
            LogicalTypeRoot::Date => f.write_str("DATE"),
            LogicalTypeRoot::Time { precision } => write!(f, "TIME({})", precision),
            LogicalTypeRoot::Timestamp { precision } => write!(f, "TIMESTAMP({})", precision),
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}", self.root)
        } else {
            write!(f, "{} NOT NULL", self.root)
        }
    }
}

fn time_precision(data_type: &DataType, precision: Option<u8>) -> Result<u8, TypeError> {
    let precision = precision.unwrap_or(0);
    if precision > MAX_TIME_PRECISION {
        return Err(TypeError::InvalidParameters {
            data_type: data_type.to_string(),
            reason: format!("precision must be at most {}", MAX_TIME_PRECISION),
        });
    }
    Ok(precision)
}

impl DataType {
    /// Derive the logical type of a column declared with this type
    ///
    /// The result depends only on `self` and `nullable`.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::UnsupportedType` for [`DataType::Other`] and
    /// `TypeError::InvalidParameters` when declared parameters are out of range
    /// (for example a decimal scale larger than its precision).
    pub fn to_logical_type(&self, nullable: bool) -> Result<LogicalType, TypeError> {
        let root = match self {
            DataType::Boolean => LogicalTypeRoot::Boolean,
            DataType::Bit(None) | DataType::Bit(Some(1)) => LogicalTypeRoot::Boolean,
            DataType::Bit(Some(_)) => return Ok(LogicalType::bytes(nullable)),

            DataType::TinyInt { unsigned: false } => LogicalTypeRoot::TinyInt,
            DataType::TinyInt { unsigned: true } => LogicalTypeRoot::SmallInt,
            DataType::SmallInt { unsigned: false } => LogicalTypeRoot::SmallInt,
            DataType::SmallInt { unsigned: true } => LogicalTypeRoot::Int,
            DataType::MediumInt { .. } => LogicalTypeRoot::Int,
            DataType::Integer { unsigned: false } => LogicalTypeRoot::Int,
            DataType::Integer { unsigned: true } => LogicalTypeRoot::BigInt,
            DataType::BigInt { unsigned: false } => LogicalTypeRoot::BigInt,
            DataType::BigInt { unsigned: true } => LogicalTypeRoot::Decimal {
                precision: 20,
                scale: 0,
            },

            DataType::Decimal { precision, scale } => {
                let precision = precision.unwrap_or(DEFAULT_DECIMAL_PRECISION);
                let scale = scale.unwrap_or(0);
                if precision == 0 || scale > precision {
                    return Err(TypeError::InvalidParameters {
                        data_type: self.to_string(),
                        reason: "scale must not exceed a non-zero precision".to_string(),
                    });
                }
                if precision > MAX_DECIMAL_PRECISION {
                    return Ok(LogicalType::string(nullable));
                }
                LogicalTypeRoot::Decimal { precision, scale }
            }
            DataType::Float => LogicalTypeRoot::Float,
            DataType::Double => LogicalTypeRoot::Double,

            DataType::Char(len) => LogicalTypeRoot::Char {
                length: len.unwrap_or(1).max(1),
            },
            DataType::Varchar(Some(len)) if *len > 0 => LogicalTypeRoot::Varchar {
                length: (*len).min(MAX_LENGTH),
            },
            DataType::Varchar(_)
            | DataType::Text
            | DataType::Json
            | DataType::Enum(_)
            | DataType::Set(_) => return Ok(LogicalType::string(nullable)),

            DataType::Binary(_) | DataType::VarBinary(_) | DataType::Blob => {
                return Ok(LogicalType::bytes(nullable));
            }

            DataType::Date => LogicalTypeRoot::Date,
            DataType::Year => LogicalTypeRoot::Int,
            DataType::Time(p) => LogicalTypeRoot::Time {
                precision: time_precision(self, *p)?,
            },
            DataType::DateTime(p) | DataType::Timestamp(p) => LogicalTypeRoot::Timestamp {
                precision: time_precision(self, *p)?,
            },

            DataType::Other(raw) => return Err(TypeError::UnsupportedType(raw.clone())),
        };

        Ok(LogicalType::new(root, nullable))
    }
}
