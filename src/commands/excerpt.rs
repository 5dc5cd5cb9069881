//! PDF and CoNLL excerpt subcommands handler

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use excerptor::excerpt::{HandlerOptions, SourceFormat};
use excerptor::fragment::Fragment;
use excerptor::MappingType;

use super::fragments::parse_fragments;

/// Extract PDF pages into a new document.
#[cfg(not(tarpaulin_include))]
pub fn handle_pdf(input: &Path, output: &Path, fragments: &str) -> Result<()> {
    let fragments = parse_fragments(fragments, "page")?;
    write_excerpt(SourceFormat::Pdf, HandlerOptions::default(), input, output, &fragments)
}

/// Extract CoNLL sentence blocks for the selected pages.
#[cfg(not(tarpaulin_include))]
pub fn handle_conll(
    input: &Path,
    output: &Path,
    mapping: &Path,
    max_fan_out: u64,
    fragments: &str,
) -> Result<()> {
    let fragments = parse_fragments(fragments, "page")?;
    let file = File::open(mapping)
        .with_context(|| format!("Failed to open mapping file: {}", mapping.display()))?;
    let mapping_data = MappingType::Tabular
        .load(BufReader::new(file))
        .with_context(|| format!("Failed to load mapping: {}", mapping.display()))?;

    let options = HandlerOptions {
        mapping: Some(Arc::clone(&mapping_data)),
        max_fan_out,
    };
    write_excerpt(SourceFormat::Conll09, options, input, output, &fragments)
}

/// Run one handler from `input` to `output`.
///
/// A partially written output file is removed when the excerpt fails.
fn write_excerpt(
    format: SourceFormat,
    options: HandlerOptions,
    input: &Path,
    output: &Path,
    fragments: &[Fragment],
) -> Result<()> {
    if let Some(detected) = SourceFormat::for_file_name(input) {
        if detected != format {
            tracing::warn!(
                file = %input.display(),
                detected = %detected,
                "file extension suggests a different format"
            );
        }
    }

    let mut handler = format.handler(options)?;
    let file =
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    handler
        .init(format.content_type(), &mut BufReader::new(file))
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let segments = handler.segments()?;
    tracing::info!(segments, label = handler.segment_label(), "source loaded");

    let result = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            handler.excerpt(fragments, &mut writer)?;
            writer.flush()?;
            Ok(())
        });
    handler.close();

    if let Err(e) = result {
        let _ = fs::remove_file(output);
        return Err(e.context(format!("Failed to write excerpt to {}", output.display())));
    }

    println!(
        "Wrote excerpt of {} ({} {}s) to {}",
        input.display(),
        segments,
        handler.segment_label(),
        output.display()
    );
    Ok(())
}
