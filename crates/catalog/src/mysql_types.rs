// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # MySQL column type parsing
//!
//! Converts MySQL `COLUMN_TYPE` strings (as found in `information_schema.COLUMNS`,
//! e.g. `int unsigned`, `varchar(255)`, `decimal(10,2)`, `enum('a','b')`)
//! into a declared [`DataType`].

use catalog_snapshot_schema::DataType;

/// Parse a MySQL column type into a declared DataType
///
/// Unknown types are kept verbatim as [`DataType::Other`].
pub fn parse_mysql_type(column_type: &str) -> DataType {
    let raw = column_type.trim();
    let type_lower = raw.to_ascii_lowercase();

    let type_name: String = type_lower
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();

    let unsigned = modifiers(&type_lower).contains("unsigned");

    match type_name.as_str() {
        // Boolean (MySQL stores BOOL as TINYINT(1))
        "bool" | "boolean" => DataType::Boolean,
        "tinyint" if !unsigned && extract_length(&type_lower) == Some(1) => DataType::Boolean,

        // Integer types
        "tinyint" => DataType::TinyInt { unsigned },
        "smallint" => DataType::SmallInt { unsigned },
        "mediumint" => DataType::MediumInt { unsigned },
        "int" | "integer" => DataType::Integer { unsigned },
        "bigint" => DataType::BigInt { unsigned },

        // Decimal types
        "decimal" | "numeric" | "dec" | "fixed" => {
            let (precision, scale) = extract_precision_scale(&type_lower);
            DataType::Decimal { precision, scale }
        }
        "float" => DataType::Float,
        "double" | "real" => DataType::Double,

        // String types
        "char" => DataType::Char(extract_length(&type_lower)),
        "varchar" => DataType::Varchar(extract_length(&type_lower)),
        "text" | "tinytext" | "mediumtext" | "longtext" => DataType::Text,

        // Binary types
        "binary" => DataType::Binary(extract_length(&type_lower)),
        "varbinary" => DataType::VarBinary(extract_length(&type_lower)),
        "blob" | "tinyblob" | "mediumblob" | "longblob" => DataType::Blob,
        "bit" => DataType::Bit(extract_length(&type_lower)),

        // Date/Time types
        "date" => DataType::Date,
        "time" => DataType::Time(extract_fraction(&type_lower)),
        "datetime" => DataType::DateTime(extract_fraction(&type_lower)),
        "timestamp" => DataType::Timestamp(extract_fraction(&type_lower)),
        "year" => DataType::Year,

        // JSON
        "json" => DataType::Json,

        // Enumerations keep the original case of their values
        "enum" => DataType::Enum(extract_values(raw)),
        "set" => DataType::Set(extract_values(raw)),

        // Unknown/Other types
        _ => DataType::Other(raw.to_string()),
    }
}

/// Text inside the first pair of parentheses, if any
fn parameters(type_str: &str) -> Option<&str> {
    let start = type_str.find('(')?;
    let end = type_str.rfind(')')?;
    (end > start).then(|| &type_str[start + 1..end])
}

/// Text following the parameter list (e.g. `unsigned zerofill`)
fn modifiers(type_str: &str) -> &str {
    match type_str.rfind(')') {
        Some(end) => &type_str[end + 1..],
        None => type_str,
    }
}

/// Extract length from type string (e.g., "varchar(255)" -> Some(255))
pub(crate) fn extract_length(type_str: &str) -> Option<usize> {
    parameters(type_str)
        .and_then(|p| p.trim().parse().ok())
        .and_then(|len: usize| if len == 0 { None } else { Some(len) })
}

/// Extract fractional seconds precision; `datetime(0)` is a valid explicit precision
fn extract_fraction(type_str: &str) -> Option<u8> {
    parameters(type_str).and_then(|p| p.trim().parse().ok())
}

/// Extract precision and scale from e.g. "decimal(10,2)"
fn extract_precision_scale(type_str: &str) -> (Option<u8>, Option<u8>) {
    let Some(params) = parameters(type_str) else {
        return (None, None);
    };
    let mut parts = params.split(',').map(|p| p.trim().parse::<u8>().ok());
    let precision = parts.next().flatten();
    let scale = parts.next().flatten();
    (precision, scale)
}

/// Extract quoted values from e.g. "enum('a','it''s')"
fn extract_values(type_str: &str) -> Vec<String> {
    let Some(params) = parameters(type_str) else {
        return Vec::new();
    };

    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut chars = params.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, in_quote) {
            ('\'', false) => in_quote = true,
            ('\'', true) if chars.peek() == Some(&'\'') => {
                current.push('\'');
                chars.next();
            }
            ('\'', true) => {
                in_quote = false;
                values.push(std::mem::take(&mut current));
            }
            (c, true) => current.push(c),
            _ => {}
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mysql_varchar() {
        assert_eq!(parse_mysql_type("varchar(255)"), DataType::Varchar(Some(255)));
    }

    #[test]
    fn test_parse_integers_with_sign() {
        assert_eq!(parse_mysql_type("int"), DataType::Integer { unsigned: false });
        assert_eq!(parse_mysql_type("int(11)"), DataType::Integer { unsigned: false });
        assert_eq!(parse_mysql_type("int unsigned"), DataType::Integer { unsigned: true });
        assert_eq!(
            parse_mysql_type("bigint(20) unsigned zerofill"),
            DataType::BigInt { unsigned: true }
        );
        assert_eq!(parse_mysql_type("MEDIUMINT"), DataType::MediumInt { unsigned: false });
    }

    #[test]
    fn test_parse_tinyint_one_is_boolean() {
        assert_eq!(parse_mysql_type("tinyint(1)"), DataType::Boolean);
        assert_eq!(parse_mysql_type("tinyint(4)"), DataType::TinyInt { unsigned: false });
        assert_eq!(
            parse_mysql_type("tinyint(1) unsigned"),
            DataType::TinyInt { unsigned: true }
        );
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_mysql_type("decimal(10,2)"), DataType::decimal(10, 2));
        assert_eq!(
            parse_mysql_type("numeric(8)"),
            DataType::Decimal {
                precision: Some(8),
                scale: None
            }
        );
    }

    #[test]
    fn test_parse_temporal() {
        assert_eq!(parse_mysql_type("datetime(3)"), DataType::DateTime(Some(3)));
        assert_eq!(parse_mysql_type("datetime(0)"), DataType::DateTime(Some(0)));
        assert_eq!(parse_mysql_type("timestamp"), DataType::Timestamp(None));
        assert_eq!(parse_mysql_type("year(4)"), DataType::Year);
    }

    #[test]
    fn test_parse_enum_keeps_case_and_escapes() {
        assert_eq!(
            parse_mysql_type("enum('New','it''s','a,b')"),
            DataType::Enum(vec!["New".to_string(), "it's".to_string(), "a,b".to_string()])
        );
        assert_eq!(
            parse_mysql_type("set('x','y')"),
            DataType::Set(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn test_parse_unknown_type() {
        assert_eq!(parse_mysql_type("geometry"), DataType::Other("geometry".to_string()));
    }

    #[test]
    fn test_extract_length_from_char() {
        assert_eq!(extract_length("char(10)"), Some(10));
    }

    #[test]
    fn test_extract_length_no_parens() {
        assert_eq!(extract_length("text"), None);
    }
}
