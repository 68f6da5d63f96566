// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for catalog-snapshot
//!
//! This crate provides common testing components including:
//! - A mock catalog with fault injection and call recording
//! - Catalog assertions
//! - Test fixtures and sample catalogs

pub mod assertions;
pub mod fixtures;
pub mod mock_catalog;

// Re-exports for convenience
pub use assertions::CatalogAssertions;
pub use fixtures::SchemaFixtures;
pub use mock_catalog::{CallStats, MockCatalog, MockCatalogBuilder};
