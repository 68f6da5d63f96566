// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Command-line configuration
//!
//! Parses arguments with `clap` and converts them into a [`SnapshotConfig`]
//! holding the catalog connection settings and the snapshot policies.

use clap::Parser;

use crate::output::OutputFormat;
use catalog_snapshot::{ColumnKindPolicy, PrimaryKeyPolicy, SnapshotOptions, TableFilter};
use catalog_snapshot_catalog::{CatalogError, MySqlCatalogConfig};

/// Print the table-name to row-type snapshot of a MySQL database
#[derive(Parser, Debug, Clone)]
#[command(name = "catalog-snapshot", version, about, long_about = None)]
pub struct Args {
    /// MySQL server host
    #[arg(long, default_value = "localhost")]
    pub hostname: String,

    /// MySQL server port
    #[arg(long, default_value_t = 3306)]
    pub port: u16,

    /// User to connect as
    #[arg(long, default_value = "root")]
    pub username: String,

    /// Password of the user
    #[arg(long, env = "CATALOG_SNAPSHOT_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Database to snapshot
    #[arg(long, default_value = "test")]
    pub database_name: String,

    /// Name the catalog is registered under
    #[arg(long, default_value = "mysql_catalog")]
    pub catalog_name: String,

    /// Connection pool size
    #[arg(long, default_value_t = 10)]
    pub max_connections: u32,

    /// Seconds allowed to acquire a connection
    #[arg(long, default_value_t = 30)]
    pub connect_timeout_secs: u64,

    /// Seconds allowed for each metadata query
    #[arg(long, default_value_t = 5)]
    pub query_timeout_secs: u64,

    /// Record an empty primary key instead of failing on tables without one
    #[arg(long)]
    pub allow_missing_primary_key: bool,

    /// Leave computed and metadata columns out instead of failing
    #[arg(long)]
    pub skip_non_physical_columns: bool,

    /// Only snapshot tables matching this pattern (`*` wildcard, repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Skip tables matching this pattern (`*` wildcard, repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Resolved run configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotConfig {
    pub catalog: MySqlCatalogConfig,
    /// Database to snapshot; also the catalog's default database
    pub database: String,
    pub options: SnapshotOptions,
    pub format: OutputFormat,
}

impl From<Args> for SnapshotConfig {
    fn from(args: Args) -> Self {
        let primary_key = if args.allow_missing_primary_key {
            PrimaryKeyPolicy::Optional
        } else {
            PrimaryKeyPolicy::Required
        };
        let column_kinds = if args.skip_non_physical_columns {
            ColumnKindPolicy::Skip
        } else {
            ColumnKindPolicy::Reject
        };
        let filter = TableFilter {
            include: args.include,
            exclude: args.exclude,
        };

        Self {
            catalog: MySqlCatalogConfig {
                catalog_name: args.catalog_name,
                hostname: args.hostname,
                port: args.port,
                username: args.username,
                password: args.password,
                default_database: args.database_name.clone(),
                max_connections: args.max_connections,
                connect_timeout_secs: args.connect_timeout_secs,
                query_timeout_secs: args.query_timeout_secs,
            },
            database: args.database_name,
            options: SnapshotOptions::new()
                .with_primary_key_policy(primary_key)
                .with_column_kind_policy(column_kinds)
                .with_filter(filter),
            format: args.format,
        }
    }
}

impl SnapshotConfig {
    /// Validate the configuration
    ///
    /// Checks the catalog settings and the table patterns. This doesn't
    /// guarantee the server is reachable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.is_empty() {
            return Err(ConfigError::MissingDatabaseName);
        }

        self.catalog.validate()?;

        let filter = &self.options.filter;
        if let Some(pattern) = filter
            .include
            .iter()
            .chain(filter.exclude.iter())
            .find(|p| p.trim().is_empty())
        {
            return Err(ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                reason: "pattern cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No database to snapshot
    #[error("Database name is required")]
    MissingDatabaseName,

    /// Catalog connection settings are invalid
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A table pattern is unusable
    #[error("Invalid table pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> SnapshotConfig {
        let argv = std::iter::once("catalog-snapshot").chain(args.iter().copied());
        SnapshotConfig::from(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);

        assert_eq!(config.catalog.catalog_name, "mysql_catalog");
        assert_eq!(config.catalog.hostname, "localhost");
        assert_eq!(config.catalog.port, 3306);
        assert_eq!(config.catalog.username, "root");
        assert_eq!(config.catalog.default_database, "test");
        assert_eq!(config.catalog.max_connections, 10);
        assert_eq!(config.catalog.connect_timeout_secs, 30);
        assert_eq!(config.catalog.query_timeout_secs, 5);
        assert_eq!(config.database, "test");
        assert_eq!(config.options.primary_key, PrimaryKeyPolicy::Required);
        assert_eq!(config.options.column_kinds, ColumnKindPolicy::Reject);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "--hostname",
            "db.internal",
            "--port",
            "3307",
            "--database-name",
            "shop",
            "--allow-missing-primary-key",
            "--skip-non-physical-columns",
            "--include",
            "order*",
            "--include",
            "users",
            "--exclude",
            "*_tmp",
            "--format",
            "json",
        ]);

        assert_eq!(config.catalog.base_url(), "mysql://db.internal:3307");
        assert_eq!(config.catalog.default_database, "shop");
        assert_eq!(config.database, "shop");
        assert_eq!(config.options.primary_key, PrimaryKeyPolicy::Optional);
        assert_eq!(config.options.column_kinds, ColumnKindPolicy::Skip);
        assert_eq!(config.options.filter.include, vec!["order*", "users"]);
        assert!(config.options.filter.is_table_allowed("orders"));
        assert!(!config.options.filter.is_table_allowed("orders_tmp"));
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_validate_empty_database() {
        let config = parse(&["--database-name", ""]);
        assert!(matches!(config.validate(), Err(ConfigError::MissingDatabaseName)));
    }

    #[test]
    fn test_validate_zero_pool() {
        let config = parse(&["--max-connections", "0"]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Catalog(CatalogError::ConfigurationError(_)))
        ));
    }

    #[test]
    fn test_validate_empty_pattern() {
        let config = parse(&["--exclude", " "]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pattern cannot be empty"));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result = Args::try_parse_from(["catalog-snapshot", "--format", "yaml"]);
        assert!(result.is_err());
    }
}
