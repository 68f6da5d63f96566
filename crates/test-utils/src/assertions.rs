// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Catalog-specific test helpers and custom assertions

use catalog_snapshot_catalog::{CatalogTable, Column, DataType};

/// Custom assertion helpers for catalog testing
pub struct CatalogAssertions;

impl CatalogAssertions {
    /// Assert that a column is physical with the given properties
    pub fn assert_physical_column(column: &Column, name: &str, data_type: DataType, nullable: bool) {
        match column {
            Column::Physical(physical) => {
                assert_eq!(physical.name, name, "Column name mismatch");
                assert_eq!(physical.data_type, data_type, "Column data type mismatch");
                assert_eq!(physical.nullable, nullable, "Column nullable mismatch");
            }
            other => panic!("Expected physical column '{}', found {:?}", name, other),
        }
    }

    /// Assert the column names of a table, in schema order
    pub fn assert_column_names(table: &CatalogTable, expected: &[&str]) {
        let names: Vec<&str> = table.schema.columns.iter().map(Column::name).collect();
        assert_eq!(names, expected, "Column order mismatch");
    }

    /// Assert the primary key columns of a table, in key order
    pub fn assert_primary_key(table: &CatalogTable, expected: &[&str]) {
        let key: Vec<&str> = table
            .schema
            .primary_key_columns()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(key, expected, "Primary key mismatch");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_snapshot_catalog::Schema;

    fn users() -> CatalogTable {
        CatalogTable::new(
            Schema::new()
                .with_column(Column::physical("id", DataType::INT).with_nullable(false))
                .with_column(Column::physical("name", DataType::varchar(50)))
                .with_primary_key("PRIMARY", &["id"]),
        )
    }

    #[test]
    fn test_assert_physical_column() {
        let table = users();
        CatalogAssertions::assert_physical_column(&table.schema.columns[0], "id", DataType::INT, false);
        CatalogAssertions::assert_column_names(&table, &["id", "name"]);
        CatalogAssertions::assert_primary_key(&table, &["id"]);
    }

    #[test]
    #[should_panic(expected = "Expected physical column")]
    fn test_assert_physical_column_rejects_computed() {
        let column = Column::computed("total", "a + b");
        CatalogAssertions::assert_physical_column(&column, "total", DataType::INT, true);
    }
}
