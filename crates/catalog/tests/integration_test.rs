// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Integration tests for the catalog crate

use catalog_snapshot_catalog::{
    Catalog, CatalogError, CatalogTable, Column, DataType, ObjectPath, Schema, StaticCatalog,
    TableKind,
};
use catalog_snapshot_test_utils::{CatalogAssertions, SchemaFixtures};

// Catalog whose every call fails, for exercising error paths through `dyn Catalog`
struct OfflineCatalog;

#[async_trait::async_trait]
impl Catalog for OfflineCatalog {
    fn name(&self) -> &str {
        "offline"
    }

    fn default_database(&self) -> &str {
        "test"
    }

    async fn list_databases(&self) -> catalog_snapshot_catalog::CatalogResult<Vec<String>> {
        Err(CatalogError::ConnectionFailed("connection refused".to_string()))
    }

    async fn list_tables(
        &self,
        _database: &str,
    ) -> catalog_snapshot_catalog::CatalogResult<Vec<String>> {
        Err(CatalogError::ConnectionFailed("connection refused".to_string()))
    }

    async fn get_table(
        &self,
        _path: &ObjectPath,
    ) -> catalog_snapshot_catalog::CatalogResult<Option<CatalogTable>> {
        Err(CatalogError::ConnectionFailed("connection refused".to_string()))
    }
}

fn shop_catalog() -> StaticCatalog {
    StaticCatalog::new("shop", "test")
        .with_table(
            "test",
            "users",
            CatalogTable::new(
                Schema::new()
                    .with_column(Column::physical("id", DataType::INT).with_nullable(false))
                    .with_column(Column::physical("name", DataType::varchar(50)))
                    .with_primary_key("PRIMARY", &["id"]),
            )
            .with_comment("User accounts"),
        )
        .with_table(
            "test",
            "orders",
            CatalogTable::new(
                Schema::new()
                    .with_column(Column::physical("id", DataType::INT).with_nullable(false))
                    .with_column(Column::physical("user_id", DataType::INT))
                    .with_column(Column::physical("amount", DataType::decimal(10, 2)))
                    .with_primary_key("PRIMARY", &["id"]),
            ),
        )
}

#[tokio::test]
async fn test_list_tables_in_insertion_order() {
    let catalog = shop_catalog();
    let tables = catalog.list_tables("test").await.unwrap();
    assert_eq!(tables, vec!["users", "orders"]);
}

#[tokio::test]
async fn test_get_table_definition() {
    let catalog = shop_catalog();
    let orders = catalog
        .get_table(&ObjectPath::new("test", "orders"))
        .await
        .unwrap()
        .expect("orders should exist");

    assert_eq!(orders.kind, TableKind::Table);
    CatalogAssertions::assert_column_names(&orders, &["id", "user_id", "amount"]);
    CatalogAssertions::assert_physical_column(&orders.schema.columns[0], "id", DataType::INT, false);
    CatalogAssertions::assert_physical_column(
        &orders.schema.columns[2],
        "amount",
        DataType::decimal(10, 2),
        true,
    );
    CatalogAssertions::assert_primary_key(&orders, &["id"]);
}

#[tokio::test]
async fn test_json_fixture_matches_built_catalog() {
    let loaded = SchemaFixtures::shop_catalog();
    let built = shop_catalog();

    for table in ["users", "orders"] {
        let path = ObjectPath::new("test", table);
        let from_json = loaded.get_table(&path).await.unwrap().unwrap();
        let from_code = built.get_table(&path).await.unwrap().unwrap();
        assert_eq!(from_json.schema, from_code.schema);
    }
}

#[tokio::test]
async fn test_json_fixture_parses_mysql_types() {
    let catalog = SchemaFixtures::all_types_catalog();
    let table = catalog
        .get_table(&ObjectPath::new("test", "all_types"))
        .await
        .unwrap()
        .unwrap();

    let columns = &table.schema.columns;
    CatalogAssertions::assert_physical_column(&columns[0], "c_bool", DataType::Boolean, true);
    CatalogAssertions::assert_physical_column(
        &columns[2],
        "c_small_u",
        DataType::SmallInt { unsigned: true },
        true,
    );
    CatalogAssertions::assert_physical_column(&columns[5], "c_big", DataType::BIGINT, false);
    CatalogAssertions::assert_physical_column(
        &columns[18],
        "c_enum",
        DataType::Enum(vec!["a".to_string(), "b".to_string()]),
        true,
    );
    CatalogAssertions::assert_primary_key(&table, &["c_big"]);
}

#[tokio::test]
async fn test_database_exists_default_impl_via_dyn() {
    let catalog: Box<dyn Catalog> = Box::new(shop_catalog());
    assert!(catalog.database_exists("test").await.unwrap());
    assert!(!catalog.database_exists("other").await.unwrap());
}

#[tokio::test]
async fn test_table_exists() {
    let catalog = shop_catalog();
    assert!(
        catalog
            .table_exists(&ObjectPath::new("test", "users"))
            .await
            .unwrap()
    );
    assert!(
        !catalog
            .table_exists(&ObjectPath::new("test", "payments"))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_offline_catalog_errors_propagate() {
    let catalog = OfflineCatalog;
    let err = catalog.database_exists("test").await.unwrap_err();
    assert!(err.is_connectivity());

    let err = catalog
        .table_exists(&ObjectPath::new("test", "users"))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ConnectionFailed(_)));
}

#[tokio::test]
async fn test_table_json_serialization_roundtrip() {
    let catalog = shop_catalog();
    let users = catalog
        .get_table(&ObjectPath::new("test", "users"))
        .await
        .unwrap()
        .unwrap();

    let json = serde_json::to_string(&users).unwrap();
    let deserialized: CatalogTable = serde_json::from_str(&json).unwrap();
    assert_eq!(users, deserialized);
}

#[tokio::test]
async fn test_error_display() {
    let err = CatalogError::TableNotFound("test_table".to_string(), "public".to_string());
    let msg = format!("{}", err);
    assert!(msg.contains("test_table"));
    assert!(msg.contains("public"));
    assert!(msg.contains("not found"));
}
