// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures and sample catalogs

use catalog_snapshot_catalog::{
    CatalogTable, Column, DataType, Schema, StaticCatalog, TableKind,
};

/// Sample catalog definitions for testing
pub struct SchemaFixtures;

impl SchemaFixtures {
    // ===== JSON fixtures =====

    /// `users` and `orders` in database `test`
    pub const fn shop_json() -> &'static str {
        r#"{
            "test": {
                "users": {
                    "columns": [
                        { "name": "id", "type": "int", "nullable": false },
                        { "name": "name", "type": "varchar(50)" }
                    ],
                    "primaryKey": ["id"]
                },
                "orders": {
                    "columns": [
                        { "name": "id", "type": "int", "nullable": false },
                        { "name": "user_id", "type": "int" },
                        { "name": "amount", "type": "decimal(10,2)" }
                    ],
                    "primaryKey": ["id"]
                }
            }
        }"#
    }

    /// A key-less view listed between two keyed tables
    pub const fn view_without_key_json() -> &'static str {
        r#"{
            "test": {
                "users": {
                    "columns": [
                        { "name": "id", "type": "int", "nullable": false },
                        { "name": "name", "type": "varchar(50)" }
                    ],
                    "primaryKey": ["id"]
                },
                "view_x": {
                    "kind": "view",
                    "columns": [
                        { "name": "user_name", "type": "varchar(50)" },
                        { "name": "total", "type": "decimal(32,2)" }
                    ]
                },
                "orders": {
                    "columns": [
                        { "name": "id", "type": "int", "nullable": false },
                        { "name": "user_id", "type": "int" },
                        { "name": "amount", "type": "decimal(10,2)" }
                    ],
                    "primaryKey": ["id"]
                }
            }
        }"#
    }

    /// A table covering the common MySQL column types
    pub const fn all_types_json() -> &'static str {
        r#"{
            "test": {
                "all_types": {
                    "columns": [
                        { "name": "c_bool", "type": "tinyint(1)" },
                        { "name": "c_tiny", "type": "tinyint(4)" },
                        { "name": "c_small_u", "type": "smallint(5) unsigned" },
                        { "name": "c_medium", "type": "mediumint" },
                        { "name": "c_int_u", "type": "int(10) unsigned" },
                        { "name": "c_big", "type": "bigint(20)", "nullable": false },
                        { "name": "c_big_u", "type": "bigint unsigned" },
                        { "name": "c_float", "type": "float" },
                        { "name": "c_double", "type": "double" },
                        { "name": "c_char", "type": "char(3)" },
                        { "name": "c_text", "type": "text" },
                        { "name": "c_blob", "type": "blob" },
                        { "name": "c_date", "type": "date" },
                        { "name": "c_time", "type": "time(3)" },
                        { "name": "c_datetime", "type": "datetime(6)" },
                        { "name": "c_ts", "type": "timestamp" },
                        { "name": "c_year", "type": "year" },
                        { "name": "c_json", "type": "json" },
                        { "name": "c_enum", "type": "enum('a','b')" }
                    ],
                    "primaryKey": ["c_big"]
                }
            }
        }"#
    }

    // ===== Catalogs =====

    /// Catalog loaded from [`SchemaFixtures::shop_json`]
    pub fn shop_catalog() -> StaticCatalog {
        Self::load(Self::shop_json())
    }

    /// Catalog loaded from [`SchemaFixtures::view_without_key_json`]
    pub fn view_without_key_catalog() -> StaticCatalog {
        Self::load(Self::view_without_key_json())
    }

    /// Catalog loaded from [`SchemaFixtures::all_types_json`]
    pub fn all_types_catalog() -> StaticCatalog {
        Self::load(Self::all_types_json())
    }

    /// `tables` tables of `columns` columns each, named `t0000`, `t0001`, ...
    ///
    /// The first column of every table is a non-null `id` primary key.
    pub fn large_catalog(tables: usize, columns: usize) -> StaticCatalog {
        let mut catalog = StaticCatalog::new("mock_catalog", "test").with_database("test");
        for t in 0..tables {
            let mut schema =
                Schema::new().with_column(Column::physical("id", DataType::BIGINT).with_nullable(false));
            for c in 1..columns {
                let data_type = match c % 4 {
                    0 => DataType::INT,
                    1 => DataType::varchar(255),
                    2 => DataType::decimal(12, 4),
                    _ => DataType::DateTime(None),
                };
                schema = schema.with_column(Column::physical(format!("c{}", c), data_type));
            }
            let table = CatalogTable::new(schema.with_primary_key("PRIMARY", &["id"]))
                .with_kind(TableKind::Table);
            catalog.insert_table("test", format!("t{:04}", t), table);
        }
        catalog
    }

    fn load(json: &str) -> StaticCatalog {
        match StaticCatalog::from_json("mock_catalog", json) {
            Ok(catalog) => catalog,
            Err(e) => panic!("invalid built-in fixture: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_snapshot_catalog::{Catalog, ObjectPath};

    #[tokio::test]
    async fn test_shop_catalog() {
        let catalog = SchemaFixtures::shop_catalog();
        assert_eq!(catalog.default_database(), "test");
        assert_eq!(catalog.list_tables("test").await.unwrap(), vec!["users", "orders"]);
    }

    #[tokio::test]
    async fn test_view_without_key_catalog() {
        let catalog = SchemaFixtures::view_without_key_catalog();
        let view = catalog
            .get_table(&ObjectPath::new("test", "view_x"))
            .await
            .unwrap()
            .unwrap();
        assert!(view.is_view());
        assert!(view.schema.primary_key.is_none());
    }

    #[tokio::test]
    async fn test_large_catalog() {
        let catalog = SchemaFixtures::large_catalog(3, 5);
        let tables = catalog.list_tables("test").await.unwrap();
        assert_eq!(tables, vec!["t0000", "t0001", "t0002"]);

        let table = catalog
            .get_table(&ObjectPath::new("test", "t0001"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(table.schema.columns.len(), 5);
        assert_eq!(table.schema.primary_key_columns(), ["id".to_string()]);
    }

    #[test]
    fn test_all_types_fixture_parses() {
        let _ = SchemaFixtures::all_types_catalog();
    }
}
