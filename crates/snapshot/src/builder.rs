// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Snapshot builder
//!
//! Walks the tables of one database in listing order and resolves each table
//! definition into a [`TableSnapshot`].
//!
//! The build is all-or-nothing: the first failing table aborts it and no
//! partial snapshot is returned. Tables are resolved one after another and
//! the catalog is only read, never closed.

use std::time::Instant;

use indexmap::IndexMap;
use tracing::{debug, error, info, warn};

use crate::error::{SnapshotError, SnapshotResult};
use crate::options::{ColumnKindPolicy, PrimaryKeyPolicy, SnapshotOptions};
use crate::row_type::{RowField, RowType};
use crate::snapshot::{SkippedColumn, Snapshot, TableSnapshot};
use catalog_snapshot_catalog::{Catalog, CatalogError};
use catalog_snapshot_schema::{CatalogTable, Column, ObjectPath};

/// Builds snapshots from a borrowed catalog
///
/// # Examples
///
/// ```rust,ignore
/// let snapshot = SnapshotBuilder::new(&catalog)
///     .with_options(SnapshotOptions::new().with_primary_key_policy(PrimaryKeyPolicy::Required))
///     .build("test")
///     .await?;
/// for (table, meta) in snapshot.iter() {
///     println!("{}: {}", table, meta);
/// }
/// ```
pub struct SnapshotBuilder<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    options: SnapshotOptions,
}

impl<'a, C: Catalog + ?Sized> SnapshotBuilder<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self {
            catalog,
            options: SnapshotOptions::default(),
        }
    }

    /// Builder method: set snapshot options
    pub fn with_options(mut self, options: SnapshotOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SnapshotOptions {
        &self.options
    }

    /// Build the snapshot of `database`
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; see [`SnapshotError`].
    pub async fn build(&self, database: &str) -> SnapshotResult<Snapshot> {
        if database.is_empty() {
            return Err(SnapshotError::EmptyDatabaseName);
        }

        let started = Instant::now();

        let tables = self.catalog.list_tables(database).await.map_err(|source| {
            error!(database, error = %source, "Failed to list tables");
            SnapshotError::CatalogUnreachable {
                database: database.to_string(),
                table: None,
                source,
            }
        })?;

        debug!(database, count = tables.len(), "Building snapshot");

        let mut entries = IndexMap::with_capacity(tables.len());
        for table in tables {
            if !self.options.filter.is_table_allowed(&table) {
                debug!(database, table = %table, "Table filtered out");
                continue;
            }

            match self.snapshot_table(database, &table).await {
                Ok(entry) => {
                    entries.insert(table, entry);
                }
                Err(err) => {
                    error!(database, table = %table, error = %err, "Snapshot aborted");
                    return Err(err);
                }
            }
        }

        info!(
            catalog = self.catalog.name(),
            database,
            tables = entries.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Snapshot complete"
        );

        Ok(Snapshot::new(database, entries))
    }

    /// Fetch and resolve a single table
    pub async fn snapshot_table(&self, database: &str, table: &str) -> SnapshotResult<TableSnapshot> {
        let path = ObjectPath::new(database, table);

        let definition = match self.catalog.get_table(&path).await {
            Ok(Some(definition)) => definition,
            Ok(None) | Err(CatalogError::TableNotFound(..)) => {
                return Err(SnapshotError::TableNotFound {
                    database: database.to_string(),
                    table: table.to_string(),
                });
            }
            Err(source) => {
                return Err(SnapshotError::CatalogUnreachable {
                    database: database.to_string(),
                    table: Some(table.to_string()),
                    source,
                });
            }
        };

        let entry = resolve_table(&path, &definition, &self.options)?;
        debug!(table = %path, row_type = %entry.row_type, "Resolved table");
        Ok(entry)
    }
}

/// Build a snapshot with default options
pub async fn build_snapshot<C: Catalog + ?Sized>(
    catalog: &C,
    database: &str,
) -> SnapshotResult<Snapshot> {
    SnapshotBuilder::new(catalog).build(database).await
}

/// Resolve a table definition into its snapshot entry
///
/// This is the pure part of the build: no catalog access, same input gives the
/// same output.
pub fn resolve_table(
    path: &ObjectPath,
    definition: &CatalogTable,
    options: &SnapshotOptions,
) -> SnapshotResult<TableSnapshot> {
    let table = path.object.as_str();
    let mut fields = Vec::with_capacity(definition.schema.columns.len());
    let mut skipped_columns = Vec::new();

    for column in &definition.schema.columns {
        let physical = match column {
            Column::Physical(physical) => physical,
            other => match options.column_kinds {
                ColumnKindPolicy::Reject => {
                    return Err(SnapshotError::UnsupportedColumnKind {
                        table: table.to_string(),
                        column: other.name().to_string(),
                        kind: other.kind(),
                    });
                }
                ColumnKindPolicy::Skip => {
                    warn!(
                        table = %path,
                        column = other.name(),
                        kind = %other.kind(),
                        "Skipping non-physical column"
                    );
                    skipped_columns.push(SkippedColumn {
                        name: other.name().to_string(),
                        kind: other.kind(),
                    });
                    continue;
                }
            },
        };

        let logical_type = physical
            .data_type
            .to_logical_type(physical.nullable)
            .map_err(|source| SnapshotError::UnsupportedDataType {
                table: table.to_string(),
                column: physical.name.clone(),
                source,
            })?;

        fields.push(RowField::new(
            physical.name.clone(),
            physical.data_type.clone(),
            logical_type,
        ));
    }

    let primary_key = definition.schema.primary_key_columns().to_vec();
    if primary_key.is_empty() && options.primary_key == PrimaryKeyPolicy::Required {
        return Err(SnapshotError::MissingPrimaryKey {
            table: table.to_string(),
        });
    }

    Ok(TableSnapshot {
        row_type: RowType::new(path.full_name(), fields),
        primary_key,
        kind: definition.kind,
        skipped_columns,
    })
}
