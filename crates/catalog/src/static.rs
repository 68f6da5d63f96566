// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Static Catalog
//!
//! This module provides an in-memory catalog built from code or loaded from a
//! JSON fixture. Database and table order is preserved as inserted.
//!
//! ## Fixture format
//!
//! ```json
//! {
//!   "test": {
//!     "users": {
//!       "columns": [
//!         { "name": "id", "type": "int", "nullable": false },
//!         { "name": "name", "type": "varchar(50)" }
//!       ],
//!       "primaryKey": ["id"]
//!     },
//!     "user_totals": {
//!       "kind": "view",
//!       "columns": [{ "name": "total", "kind": "computed", "expression": "SUM(amount)" }]
//!     }
//!   }
//! }
//! ```
//!
//! Column types use MySQL syntax and are parsed with
//! [`parse_mysql_type`](crate::mysql_types::parse_mysql_type).

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::mysql_types::parse_mysql_type;
use crate::{Catalog, CatalogError, CatalogResult};
use catalog_snapshot_schema::{
    CatalogTable, Column, ComputedColumn, MetadataColumn, ObjectPath, PhysicalColumn, Schema,
    TableKind,
};

/// Static catalog with predefined schema data
#[derive(Debug, Clone, PartialEq)]
pub struct StaticCatalog {
    name: String,
    default_database: String,
    databases: IndexMap<String, IndexMap<String, CatalogTable>>,
}

impl StaticCatalog {
    /// Create an empty catalog
    pub fn new(name: impl Into<String>, default_database: impl Into<String>) -> Self {
        let default_database = default_database.into();
        let mut databases = IndexMap::new();
        databases.insert(default_database.clone(), IndexMap::new());
        Self {
            name: name.into(),
            default_database,
            databases,
        }
    }

    /// Builder method: add an empty database
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.databases.entry(database.into()).or_default();
        self
    }

    /// Builder method: add a table, creating its database if needed
    pub fn with_table(
        mut self,
        database: impl Into<String>,
        table: impl Into<String>,
        definition: CatalogTable,
    ) -> Self {
        self.insert_table(database, table, definition);
        self
    }

    /// Add or replace a table, creating its database if needed
    pub fn insert_table(
        &mut self,
        database: impl Into<String>,
        table: impl Into<String>,
        definition: CatalogTable,
    ) {
        self.databases
            .entry(database.into())
            .or_default()
            .insert(table.into(), definition);
    }

    /// Remove a table, returning its definition
    pub fn remove_table(&mut self, path: &ObjectPath) -> Option<CatalogTable> {
        self.databases
            .get_mut(&path.database)?
            .shift_remove(&path.object)
    }

    /// Load a catalog from a JSON fixture
    ///
    /// The first database in the fixture becomes the default database.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::SerializationError` for malformed JSON and
    /// `CatalogError::InvalidSchema` for fixtures without databases or with a
    /// primary key naming an unknown column.
    pub fn from_json(name: impl Into<String>, json: &str) -> CatalogResult<Self> {
        let fixture: IndexMap<String, IndexMap<String, TableFixture>> =
            serde_json::from_str(json)?;

        let Some(default_database) = fixture.keys().next().cloned() else {
            return Err(CatalogError::InvalidSchema(
                "fixture defines no databases".to_string(),
            ));
        };

        let mut catalog = Self::new(name, default_database);
        for (database, tables) in fixture {
            catalog = catalog.with_database(database.clone());
            for (table, definition) in tables {
                let definition = definition.into_table(&table)?;
                catalog.insert_table(database.clone(), table, definition);
            }
        }

        Ok(catalog)
    }

    /// Load a catalog from a JSON fixture file
    pub fn from_file(name: impl Into<String>, path: &str) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::ConfigurationError(format!("Failed to read '{}': {}", path, e))
        })?;
        Self::from_json(name, &json)
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_database(&self) -> &str {
        &self.default_database
    }

    async fn list_databases(&self) -> CatalogResult<Vec<String>> {
        Ok(self.databases.keys().cloned().collect())
    }

    async fn database_exists(&self, database: &str) -> CatalogResult<bool> {
        Ok(self.databases.contains_key(database))
    }

    async fn list_tables(&self, database: &str) -> CatalogResult<Vec<String>> {
        self.databases
            .get(database)
            .map(|tables| tables.keys().cloned().collect())
            .ok_or_else(|| CatalogError::DatabaseNotExist(database.to_string()))
    }

    async fn get_table(&self, path: &ObjectPath) -> CatalogResult<Option<CatalogTable>> {
        Ok(self
            .databases
            .get(&path.database)
            .and_then(|tables| tables.get(&path.object))
            .cloned())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct TableFixture {
    #[serde(default)]
    kind: TableKind,
    comment: Option<String>,
    columns: Vec<ColumnFixture>,
    #[serde(default)]
    primary_key: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ColumnFixtureKind {
    #[default]
    Physical,
    Computed,
    Metadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ColumnFixture {
    name: String,
    #[serde(rename = "type", default)]
    column_type: Option<String>,
    #[serde(default = "default_nullable")]
    nullable: bool,
    #[serde(default)]
    kind: ColumnFixtureKind,
    expression: Option<String>,
    comment: Option<String>,
}

fn default_nullable() -> bool {
    true
}

impl ColumnFixture {
    fn into_column(self, table: &str) -> CatalogResult<Column> {
        let missing = |what: &str| {
            CatalogError::InvalidSchema(format!(
                "column '{}.{}' is missing '{}'",
                table, self.name, what
            ))
        };

        let column = match self.kind {
            ColumnFixtureKind::Physical => Column::Physical(PhysicalColumn {
                data_type: parse_mysql_type(self.column_type.as_deref().ok_or_else(|| missing("type"))?),
                nullable: self.nullable,
                name: self.name,
                comment: self.comment,
            }),
            ColumnFixtureKind::Computed => Column::Computed(ComputedColumn {
                expression: self.expression.clone().ok_or_else(|| missing("expression"))?,
                name: self.name,
                comment: self.comment,
            }),
            ColumnFixtureKind::Metadata => Column::Metadata(MetadataColumn {
                data_type: parse_mysql_type(self.column_type.as_deref().ok_or_else(|| missing("type"))?),
                name: self.name,
                metadata_key: None,
                is_virtual: true,
                comment: self.comment,
            }),
        };
        Ok(column)
    }
}

impl TableFixture {
    fn into_table(self, table: &str) -> CatalogResult<CatalogTable> {
        let columns = self
            .columns
            .into_iter()
            .map(|c| c.into_column(table))
            .collect::<CatalogResult<Vec<_>>>()?;

        let mut schema = Schema::new().with_columns(columns);
        if let Some(key) = self.primary_key {
            if let Some(unknown) = key.iter().find(|k| schema.get_column(k).is_none()) {
                return Err(CatalogError::InvalidSchema(format!(
                    "primary key of '{}' names unknown column '{}'",
                    table, unknown
                )));
            }
            let key: Vec<&str> = key.iter().map(String::as_str).collect();
            schema = schema.with_primary_key("PRIMARY", &key);
        }

        let mut definition = CatalogTable::new(schema).with_kind(self.kind);
        if let Some(comment) = self.comment {
            definition = definition.with_comment(comment);
        }
        Ok(definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_snapshot_schema::{ColumnKind, DataType};

    const FIXTURE: &str = r#"{
        "test": {
            "users": {
                "comment": "User accounts",
                "columns": [
                    { "name": "id", "type": "int", "nullable": false },
                    { "name": "name", "type": "varchar(50)" }
                ],
                "primaryKey": ["id"]
            },
            "view_x": {
                "kind": "view",
                "columns": [{ "name": "total", "kind": "computed", "expression": "SUM(amount)" }]
            }
        },
        "archive": {}
    }"#;

    #[tokio::test]
    async fn test_from_json_preserves_order() {
        let catalog = StaticCatalog::from_json("static", FIXTURE).unwrap();
        assert_eq!(catalog.default_database(), "test");
        assert_eq!(catalog.list_databases().await.unwrap(), vec!["test", "archive"]);
        assert_eq!(catalog.list_tables("test").await.unwrap(), vec!["users", "view_x"]);
        assert!(catalog.list_tables("archive").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_from_json_parses_columns() {
        let catalog = StaticCatalog::from_json("static", FIXTURE).unwrap();
        let users = catalog
            .get_table(&ObjectPath::new("test", "users"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(users.comment.as_deref(), Some("User accounts"));
        assert_eq!(users.schema.primary_key_columns(), ["id".to_string()]);
        let id = users.schema.columns[0].as_physical().unwrap();
        assert_eq!(id.data_type, DataType::INT);
        assert!(!id.nullable);
        assert!(users.schema.columns[1].as_physical().unwrap().nullable);

        let view = catalog
            .get_table(&ObjectPath::new("test", "view_x"))
            .await
            .unwrap()
            .unwrap();
        assert!(view.is_view());
        assert!(view.schema.primary_key.is_none());
        assert_eq!(view.schema.columns[0].kind(), ColumnKind::Computed);
    }

    #[tokio::test]
    async fn test_unknown_database() {
        let catalog = StaticCatalog::new("static", "test");
        let result = catalog.list_tables("nope").await;
        assert!(matches!(result, Err(CatalogError::DatabaseNotExist(_))));
    }

    #[tokio::test]
    async fn test_missing_table_is_none() {
        let catalog = StaticCatalog::new("static", "test");
        let path = ObjectPath::new("test", "ghost");
        assert!(catalog.get_table(&path).await.unwrap().is_none());
        assert!(!catalog.table_exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_table() {
        let mut catalog = StaticCatalog::from_json("static", FIXTURE).unwrap();
        let removed = catalog.remove_table(&ObjectPath::new("test", "users"));
        assert!(removed.is_some());
        assert_eq!(catalog.list_tables("test").await.unwrap(), vec!["view_x"]);
    }

    #[test]
    fn test_from_json_rejects_unknown_key_column() {
        let json = r#"{ "test": { "t": { "columns": [{ "name": "a", "type": "int" }], "primaryKey": ["b"] } } }"#;
        let result = StaticCatalog::from_json("static", json);
        assert!(matches!(result, Err(CatalogError::InvalidSchema(_))));
    }

    #[test]
    fn test_from_json_requires_type_for_physical_columns() {
        let json = r#"{ "test": { "t": { "columns": [{ "name": "a" }] } } }"#;
        let result = StaticCatalog::from_json("static", json);
        assert!(matches!(result, Err(CatalogError::InvalidSchema(_))));
    }

    #[test]
    fn test_from_json_malformed() {
        let result = StaticCatalog::from_json("static", "{ not json");
        assert!(matches!(result, Err(CatalogError::SerializationError(_))));
    }

    #[test]
    fn test_from_json_empty() {
        let result = StaticCatalog::from_json("static", "{}");
        assert!(matches!(result, Err(CatalogError::InvalidSchema(_))));
    }
}
