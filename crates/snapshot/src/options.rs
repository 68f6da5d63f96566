// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Snapshot options
//!
//! Policies controlling how strictly a snapshot treats missing primary keys
//! and non-physical columns, plus a table name filter.

use serde::{Deserialize, Serialize};

/// What to do when a table declares no primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrimaryKeyPolicy {
    /// Record an empty primary key
    #[default]
    Optional,
    /// Fail with `SnapshotError::MissingPrimaryKey`
    Required,
}

/// What to do with computed and metadata columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnKindPolicy {
    /// Fail with `SnapshotError::UnsupportedColumnKind`
    #[default]
    Reject,
    /// Leave the column out of the row type and record it as skipped
    Skip,
}

/// Table name filter
///
/// Patterns are matched against the whole table name; `*` matches any run of
/// characters (including none). Exclusions win over inclusions, and an empty
/// include list admits every table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl TableFilter {
    /// Create a filter admitting every table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an allowed table pattern
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }

    /// Add an excluded table pattern
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Check if a table is allowed based on patterns
    pub fn is_table_allowed(&self, table: &str) -> bool {
        if self.exclude.iter().any(|p| matches_pattern(p, table)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| matches_pattern(p, table))
    }
}

/// Match `name` against a pattern where `*` is a wildcard
fn matches_pattern(pattern: &str, name: &str) -> bool {
    let mut parts = pattern.split('*');
    let Some(first) = parts.next() else {
        return name.is_empty();
    };
    let Some(mut rest) = name.strip_prefix(first) else {
        return false;
    };

    let parts: Vec<&str> = parts.collect();
    let Some((last, middle)) = parts.split_last() else {
        // No wildcard: exact match
        return rest.is_empty();
    };

    for part in middle {
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}

/// Options for a snapshot run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotOptions {
    pub primary_key: PrimaryKeyPolicy,
    pub column_kinds: ColumnKindPolicy,
    pub filter: TableFilter,
}

impl SnapshotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the primary key policy
    pub fn with_primary_key_policy(mut self, policy: PrimaryKeyPolicy) -> Self {
        self.primary_key = policy;
        self
    }

    /// Builder method: set the column kind policy
    pub fn with_column_kind_policy(mut self, policy: ColumnKindPolicy) -> Self {
        self.column_kinds = policy;
        self
    }

    /// Builder method: set the table filter
    pub fn with_filter(mut self, filter: TableFilter) -> Self {
        self.filter = filter;
        self
    }
}
