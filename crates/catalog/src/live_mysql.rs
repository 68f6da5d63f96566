// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Live MySQL Catalog implementation
//!
//! This module provides a live MySQL catalog that connects to a MySQL server
//! and reads table definitions from `information_schema` on every call.
//!
//! ## Features
//!
//! - Explicit connection factory: connection options are built from a
//!   [`MySqlCatalogConfig`] or a caller-supplied pool, never discovered implicitly
//! - Connection pooling with configurable size (default: 10 connections)
//! - Query timeout support (default: 5 seconds)
//! - Generated columns reported as computed columns
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_snapshot_catalog::{Catalog, MySqlCatalog, MySqlCatalogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MySqlCatalogConfig {
//!         password: "secret".to_string(),
//!         ..Default::default()
//!     };
//!     let catalog = MySqlCatalog::connect(&config).await?;
//!
//!     for table in catalog.list_tables("test").await? {
//!         println!("{}", table);
//!     }
//!
//!     catalog.close().await;
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlDatabaseError, MySqlPool, MySqlPoolOptions};
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};
use crate::mysql_types::parse_mysql_type;
use crate::r#trait::Catalog;
use catalog_snapshot_schema::{
    CatalogTable, Column, ComputedColumn, ObjectPath, PhysicalColumn, PrimaryKey, Schema,
    TableKind,
};

/// Default connection pool size
const DEFAULT_POOL_SIZE: u32 = 10;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default query timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Name MySQL gives every primary key constraint
const PRIMARY_KEY_CONSTRAINT: &str = "PRIMARY";

/// Schemas maintained by the server itself
const BUILTIN_DATABASES: [&str; 4] = ["information_schema", "mysql", "performance_schema", "sys"];

/// Access denied error numbers (database, user, table, column)
const ACCESS_DENIED_ERRORS: [u16; 4] = [1044, 1045, 1142, 1143];

/// Connection settings for a [`MySqlCatalog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlCatalogConfig {
    /// Name the catalog is registered under
    pub catalog_name: String,
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Database that must exist when the catalog is opened
    pub default_database: String,
    /// Connection pool size
    pub max_connections: u32,
    /// Time allowed to acquire a connection, in seconds
    pub connect_timeout_secs: u64,
    /// Time allowed for a single metadata query, in seconds
    pub query_timeout_secs: u64,
}

impl Default for MySqlCatalogConfig {
    fn default() -> Self {
        Self {
            catalog_name: "mysql_catalog".to_string(),
            hostname: "localhost".to_string(),
            port: 3306,
            username: "root".to_string(),
            password: String::new(),
            default_database: "test".to_string(),
            max_connections: DEFAULT_POOL_SIZE,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            query_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl MySqlCatalogConfig {
    /// Validate the configuration
    ///
    /// Checks that names are present and pool/timeout settings are non-zero.
    /// This doesn't guarantee the connection will succeed.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.catalog_name.is_empty() {
            return Err(CatalogError::ConfigurationError(
                "catalog_name cannot be empty".to_string(),
            ));
        }
        if self.hostname.is_empty() {
            return Err(CatalogError::ConfigurationError(
                "hostname cannot be empty".to_string(),
            ));
        }
        if self.username.is_empty() {
            return Err(CatalogError::ConfigurationError(
                "username cannot be empty".to_string(),
            ));
        }
        if self.default_database.is_empty() {
            return Err(CatalogError::ConfigurationError(
                "default_database cannot be empty".to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(CatalogError::ConfigurationError(
                "max_connections must be greater than 0".to_string(),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(CatalogError::ConfigurationError(
                "connect_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.query_timeout_secs == 0 {
            return Err(CatalogError::ConfigurationError(
                "query_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Server URL without credentials or database, e.g. `mysql://localhost:3306`
    pub fn base_url(&self) -> String {
        format!("mysql://{}:{}", self.hostname, self.port)
    }

    /// Driver connection options built from this configuration
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.hostname)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
    }
}

/// Live MySQL Catalog implementation
///
/// This catalog reads schema information from the `information_schema`
/// database of a MySQL server.
pub struct MySqlCatalog {
    name: String,
    default_database: String,
    /// Server URL recorded in table connector options
    base_url: String,
    username: String,
    pool: MySqlPool,
    timeout_secs: u64,
}

impl MySqlCatalog {
    /// Open a catalog using the given configuration
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ConfigurationError` if the configuration is invalid,
    /// `CatalogError::ConnectionFailed` if the server cannot be reached and
    /// `CatalogError::DatabaseNotExist` if the default database is missing.
    pub async fn connect(config: &MySqlCatalogConfig) -> CatalogResult<Self> {
        config.validate()?;

        info!(
            catalog = %config.catalog_name,
            url = %config.base_url(),
            "Connecting MySQL catalog"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_with(config.connect_options())
            .await
            .map_err(|e| {
                CatalogError::ConnectionFailed(format!("Failed to connect to MySQL: {}", e))
            })?;

        let catalog = Self {
            name: config.catalog_name.clone(),
            default_database: config.default_database.clone(),
            base_url: config.base_url(),
            username: config.username.clone(),
            pool,
            timeout_secs: config.query_timeout_secs,
        };

        catalog.verify_default_database().await
    }

    /// Check that the default database exists, closing the pool on failure
    async fn verify_default_database(self) -> CatalogResult<Self> {
        let exists = self.database_exists(&self.default_database).await;
        let result = match exists {
            Ok(true) => return Ok(self),
            Ok(false) => Err(CatalogError::DatabaseNotExist(self.default_database.clone())),
            Err(err) => Err(err),
        };
        self.close().await;
        result
    }

    /// Wrap an existing pool
    ///
    /// The pool is used as-is; no connection is attempted until the first query.
    pub fn with_pool(
        name: impl Into<String>,
        default_database: impl Into<String>,
        base_url: impl Into<String>,
        username: impl Into<String>,
        pool: MySqlPool,
    ) -> Self {
        Self {
            name: name.into(),
            default_database: default_database.into(),
            base_url: base_url.into(),
            username: username.into(),
            pool,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Builder method: set the query timeout in seconds
    pub fn with_query_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Get the timeout in seconds
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Run a query under the configured timeout
    async fn run<T, F>(&self, context: &str, query: F) -> CatalogResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        tokio::time::timeout(Duration::from_secs(self.timeout_secs), query)
            .await
            .map_err(|_| CatalogError::QueryTimeout(self.timeout_secs))?
            .map_err(|e| map_sqlx_error(context, e))
    }

    fn connector_options(&self, path: &ObjectPath) -> [(&'static str, String); 4] {
        [
            ("connector", "jdbc".to_string()),
            ("url", format!("{}/{}", self.base_url, path.database)),
            ("table-name", path.object.clone()),
            ("username", self.username.clone()),
        ]
    }
}

/// Classify a driver error
fn map_sqlx_error(context: &str, err: sqlx::Error) -> CatalogError {
    match &err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => {
            CatalogError::ConnectionFailed(format!("{}: {}", context, err))
        }
        sqlx::Error::Database(db_err) => {
            let denied = db_err
                .try_downcast_ref::<MySqlDatabaseError>()
                .is_some_and(|e| ACCESS_DENIED_ERRORS.contains(&e.number()));
            if denied {
                CatalogError::PermissionDenied(format!("{}: {}", context, err))
            } else {
                CatalogError::QueryFailed(format!("{}: {}", context, err))
            }
        }
        _ => CatalogError::QueryFailed(format!("{}: {}", context, err)),
    }
}

/// One row of `information_schema.COLUMNS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnRow {
    pub name: String,
    pub column_type: String,
    pub is_nullable: String,
    pub comment: Option<String>,
    pub extra: Option<String>,
    pub generation_expression: Option<String>,
}

impl ColumnRow {
    fn is_generated(&self) -> bool {
        // DEFAULT_GENERATED marks a default expression, not a generated column
        self.extra.as_deref().is_some_and(|extra| {
            let extra = extra.to_ascii_uppercase();
            extra.contains("VIRTUAL GENERATED") || extra.contains("STORED GENERATED")
        })
    }

    pub fn into_column(self) -> Column {
        let comment = self.comment.clone().filter(|c| !c.is_empty());

        if self.is_generated() {
            return Column::Computed(ComputedColumn {
                name: self.name,
                expression: self.generation_expression.unwrap_or_default(),
                comment,
            });
        }

        Column::Physical(PhysicalColumn {
            data_type: parse_mysql_type(&self.column_type),
            nullable: self.is_nullable.eq_ignore_ascii_case("YES"),
            name: self.name,
            comment,
        })
    }
}

fn table_kind(table_type: &str) -> TableKind {
    match table_type {
        "VIEW" | "SYSTEM VIEW" => TableKind::View,
        _ => TableKind::Table,
    }
}

#[async_trait]
impl Catalog for MySqlCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn default_database(&self) -> &str {
        &self.default_database
    }

    /// List user databases, excluding the server's own schemas
    async fn list_databases(&self) -> CatalogResult<Vec<String>> {
        let query = r#"
            SELECT SCHEMA_NAME
            FROM information_schema.SCHEMATA
            ORDER BY SCHEMA_NAME
        "#;

        let rows = self
            .run(
                "Failed to list databases",
                sqlx::query_as::<_, (String,)>(query).fetch_all(&self.pool),
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|(name,)| name)
            .filter(|name| !BUILTIN_DATABASES.contains(&name.as_str()))
            .collect())
    }

    async fn database_exists(&self, database: &str) -> CatalogResult<bool> {
        let query = r#"
            SELECT SCHEMA_NAME
            FROM information_schema.SCHEMATA
            WHERE SCHEMA_NAME = ?
        "#;

        let row = self
            .run(
                "Failed to look up database",
                sqlx::query_as::<_, (String,)>(query)
                    .bind(database)
                    .fetch_optional(&self.pool),
            )
            .await?;

        Ok(row.is_some())
    }

    /// List tables and views of a database
    ///
    /// Queries information_schema.TABLES, ordered by table name.
    async fn list_tables(&self, database: &str) -> CatalogResult<Vec<String>> {
        if !self.database_exists(database).await? {
            return Err(CatalogError::DatabaseNotExist(database.to_string()));
        }

        let query = r#"
            SELECT TABLE_NAME
            FROM information_schema.TABLES
            WHERE TABLE_SCHEMA = ?
            ORDER BY TABLE_NAME
        "#;

        let rows = self
            .run(
                "Failed to list tables",
                sqlx::query_as::<_, (String,)>(query)
                    .bind(database)
                    .fetch_all(&self.pool),
            )
            .await?;

        debug!(database, count = rows.len(), "Listed tables");
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Read a table definition
    ///
    /// Columns come from information_schema.COLUMNS in ordinal order and the
    /// primary key from information_schema.KEY_COLUMN_USAGE.
    async fn get_table(&self, path: &ObjectPath) -> CatalogResult<Option<CatalogTable>> {
        let table_query = r#"
            SELECT TABLE_TYPE, TABLE_COMMENT
            FROM information_schema.TABLES
            WHERE TABLE_SCHEMA = ?
              AND TABLE_NAME = ?
        "#;

        let context = format!("Failed to read table '{}'", path);

        let Some((table_type, table_comment)) = self
            .run(
                &context,
                sqlx::query_as::<_, (String, Option<String>)>(table_query)
                    .bind(&path.database)
                    .bind(&path.object)
                    .fetch_optional(&self.pool),
            )
            .await?
        else {
            debug!(table = %path, "Table not found");
            return Ok(None);
        };

        let columns_query = r#"
            SELECT
                COLUMN_NAME,
                COLUMN_TYPE,
                IS_NULLABLE,
                COLUMN_COMMENT,
                EXTRA,
                GENERATION_EXPRESSION
            FROM information_schema.COLUMNS
            WHERE TABLE_SCHEMA = ?
              AND TABLE_NAME = ?
            ORDER BY ORDINAL_POSITION
        "#;

        let column_rows = self
            .run(
                &context,
                sqlx::query_as::<
                    _,
                    (
                        String,
                        String,
                        String,
                        Option<String>,
                        Option<String>,
                        Option<String>,
                    ),
                >(columns_query)
                .bind(&path.database)
                .bind(&path.object)
                .fetch_all(&self.pool),
            )
            .await?;

        let columns = column_rows
            .into_iter()
            .map(
                |(name, column_type, is_nullable, comment, extra, generation_expression)| {
                    ColumnRow {
                        name,
                        column_type,
                        is_nullable,
                        comment,
                        extra,
                        generation_expression,
                    }
                    .into_column()
                },
            )
            .collect();

        let key_query = r#"
            SELECT COLUMN_NAME
            FROM information_schema.KEY_COLUMN_USAGE
            WHERE TABLE_SCHEMA = ?
              AND TABLE_NAME = ?
              AND CONSTRAINT_NAME = ?
            ORDER BY ORDINAL_POSITION
        "#;

        let key_columns: Vec<String> = self
            .run(
                &context,
                sqlx::query_as::<_, (String,)>(key_query)
                    .bind(&path.database)
                    .bind(&path.object)
                    .bind(PRIMARY_KEY_CONSTRAINT)
                    .fetch_all(&self.pool),
            )
            .await?
            .into_iter()
            .map(|(name,)| name)
            .collect();

        let primary_key = (!key_columns.is_empty())
            .then(|| PrimaryKey::new(PRIMARY_KEY_CONSTRAINT, key_columns));

        let mut table = CatalogTable::new(Schema {
            columns,
            primary_key,
        })
        .with_kind(table_kind(&table_type));

        if let Some(comment) = table_comment.filter(|c| !c.is_empty()) {
            table = table.with_comment(comment);
        }
        for (key, value) in self.connector_options(path) {
            table = table.with_option(key, value);
        }

        Ok(Some(table))
    }
}
