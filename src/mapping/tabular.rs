//! Mapping backed by a precomputed lookup table.
//!
//! The table is read from UTF-8 text with one record per line:
//!
//! ```text
//! 0	0	0
//! 1	0	1
//! 2	1	1
//! ```
//!
//! Columns are the source index, the first target index and the last target
//! index, separated by tabs. Rows must be dense and ordered, starting at 0.
//! There is no header row. Empty lines are ignored.

use std::io::BufRead;

use super::{Mapping, MappingError};

const DELIMITER: char = '\t';

/// Dense lookup table mapping each source index to a target range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularMapping {
    spans: Vec<(u64, u64)>,
}

impl TabularMapping {
    /// Parse tabular mapping rows from `reader`.
    ///
    /// Fails if a row lacks a separator, holds something other than unsigned
    /// numbers, or declares a source index that differs from its row
    /// position.
    pub fn load<R: BufRead>(reader: R) -> Result<Self, MappingError> {
        let mut spans = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            let line_no = line_num + 1;
            let (source, begin, end) = split_row(line, line_no)?;

            let expected = spans.len() as u64;
            if source != expected {
                return Err(MappingError::InconsistentIndex {
                    line: line_no,
                    expected,
                    found: source,
                });
            }
            spans.push((begin, end));
        }

        tracing::debug!(rows = spans.len(), "loaded tabular mapping");
        Ok(Self { spans })
    }

    /// Build a mapping directly from target ranges, indexed by position.
    pub fn from_spans(spans: Vec<(u64, u64)>) -> Self {
        Self { spans }
    }

    fn span(&self, source: u64) -> Result<(u64, u64), MappingError> {
        usize::try_from(source)
            .ok()
            .and_then(|index| self.spans.get(index))
            .copied()
            .ok_or(MappingError::OutOfRange {
                index: source,
                len: self.spans.len(),
            })
    }
}

impl Mapping for TabularMapping {
    fn len(&self) -> usize {
        self.spans.len()
    }

    fn target_begin(&self, source: u64) -> Result<u64, MappingError> {
        Ok(self.span(source)?.0)
    }

    fn target_end(&self, source: u64) -> Result<u64, MappingError> {
        Ok(self.span(source)?.1)
    }

    fn target_range(&self, source: u64) -> Result<(u64, u64), MappingError> {
        self.span(source)
    }
}

/// Split a row into its three numeric columns.
fn split_row(line: &str, line_no: usize) -> Result<(u64, u64, u64), MappingError> {
    let format = |reason: &str| MappingError::Format {
        line: line_no,
        reason: reason.to_string(),
    };

    let (source, rest) = line
        .split_once(DELIMITER)
        .ok_or_else(|| format("no delimiter at all"))?;
    let (begin, end) = rest
        .split_once(DELIMITER)
        .ok_or_else(|| format("no delimiter after source index"))?;

    let number = |field: &str, name: &str| -> Result<u64, MappingError> {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format(&format!("malformed {} '{}'", name, field)));
        }
        field
            .parse()
            .map_err(|_| format(&format!("{} '{}' out of range", name, field)))
    };

    Ok((
        number(source, "source index")?,
        number(begin, "target begin")?,
        number(end, "target end")?,
    ))
}
