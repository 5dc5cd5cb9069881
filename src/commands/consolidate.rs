//! Consolidate subcommand handler

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use excerptor::fragment;
use excerptor::{consolidate, MappingType, Offsets};

#[derive(Debug, Serialize)]
struct ConsolidateReport {
    fragments: String,
    segments: usize,
    truncated: bool,
}

/// Parse comma-separated 0-based hit indices.
pub fn parse_hits(value: &str) -> Result<Vec<u64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .with_context(|| format!("Invalid hit index '{}'", s))
        })
        .collect()
}

/// Expand hits through a mapping file and print the result as JSON.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    mapping: &Path,
    limit: u64,
    source_offset: u64,
    target_offset: u64,
    hits: &str,
) -> Result<()> {
    let hits = parse_hits(hits)?;
    let file = File::open(mapping)
        .with_context(|| format!("Failed to open mapping file: {}", mapping.display()))?;
    let mapping_data = MappingType::Tabular
        .load(BufReader::new(file))
        .with_context(|| format!("Failed to load mapping: {}", mapping.display()))?;

    let offsets = Offsets::new(source_offset, target_offset);
    let result = consolidate(hits, mapping_data.as_ref(), offsets, limit)?;

    let report = ConsolidateReport {
        fragments: fragment::encode_all(&result.fragments()?),
        segments: result.len(),
        truncated: result.is_truncated(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
