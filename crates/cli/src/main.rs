// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # catalog-snapshot
//!
//! Connects to a MySQL server, snapshots one database and prints the result
//! to stdout. Logs go to stderr; set `RUST_LOG` to adjust verbosity.

mod config;
mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use catalog_snapshot::SnapshotBuilder;
use catalog_snapshot_catalog::MySqlCatalog;
use config::{Args, SnapshotConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: failed to set tracing subscriber: {}", e);
    }

    let config = SnapshotConfig::from(Args::parse());

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(database = %config.database, error = %format!("{:#}", err), "Snapshot failed");
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &SnapshotConfig) -> Result<()> {
    config.validate().context("invalid configuration")?;

    let catalog = MySqlCatalog::connect(&config.catalog)
        .await
        .with_context(|| {
            format!(
                "failed to open catalog '{}' at {}",
                config.catalog.catalog_name,
                config.catalog.base_url()
            )
        })?;

    let result = SnapshotBuilder::new(&catalog)
        .with_options(config.options.clone())
        .build(&config.database)
        .await;

    // The snapshot only borrows the catalog; release the pool either way
    catalog.close().await;

    let snapshot =
        result.with_context(|| format!("failed to snapshot database '{}'", config.database))?;

    tracing::info!(tables = ?snapshot.table_names(), "Tables in database");

    let rendered =
        output::render(&snapshot, config.format).context("failed to render snapshot")?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }

    Ok(())
}
