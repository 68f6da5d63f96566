// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Snapshot rendering

use catalog_snapshot::Snapshot;
use clap::ValueEnum;

/// How the snapshot is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per table
    #[default]
    Text,
    /// Pretty-printed JSON object keyed by table name
    Json,
}

/// Render a snapshot in the requested format
pub fn render(snapshot: &Snapshot, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(snapshot)),
        OutputFormat::Json => snapshot.to_json_pretty(),
    }
}

fn render_text(snapshot: &Snapshot) -> String {
    let mut lines = Vec::with_capacity(snapshot.len());
    for (name, table) in snapshot.iter() {
        let mut line = format!("{}: {}", name, table);
        if !table.skipped_columns.is_empty() {
            let skipped: Vec<&str> = table
                .skipped_columns
                .iter()
                .map(|c| c.name.as_str())
                .collect();
            line.push_str(&format!(" (skipped: {})", skipped.join(", ")));
        }
        lines.push(line);
    }
    lines.join("\n")
}
