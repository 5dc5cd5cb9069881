//! Materialization of fragments into output artifacts.
//!
//! An [`ExcerptHandler`] loads one source resource and writes the subset of
//! its segments selected by a fragment list. Handlers are single-use
//! stateful values: `init` once, any number of `excerpt` calls, then
//! `close`.
//!
//! # Module Structure
//!
//! - [`pdf`] - Page extraction from PDF documents
//! - [`conll`] - Sentence-block extraction from CoNLL-2009 annotation
//! - [`filter`] - Single-pass boundary filter used by sequential scans

pub mod conll;
mod error;
pub mod filter;
pub mod pdf;

use std::fmt;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::fragment::Fragment;
use crate::mapping::Mapping;

pub use conll::{excerpt_sentences, ConllHandler, SentenceReader, SentenceStats};
pub use error::ExcerptError;
pub use filter::{FilterError, FilterState, PageFilter};
pub use pdf::PdfHandler;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_CONLL09: &str = "text/x-conll09";
pub const MIME_CONLL: &str = "text/x-conll";

/// Default upper bound on the pages a single sentence may span.
pub const DEFAULT_MAX_FAN_OUT: u64 = 10;

/// A handler that writes excerpts of one source resource.
pub trait ExcerptHandler: fmt::Debug {
    /// The format this handler reads.
    fn format(&self) -> SourceFormat;

    /// Human-readable name for error messages.
    fn name(&self) -> &'static str {
        self.format().name()
    }

    /// Name of one addressable unit, e.g. "page".
    fn segment_label(&self) -> &'static str;

    /// Load the source from `input`.
    ///
    /// Fails if `content_type` is not handled, the source holds no
    /// segments, or the handler was initialized before.
    fn init(&mut self, content_type: &str, input: &mut dyn Read) -> Result<(), ExcerptError>;

    /// Number of segments in the loaded source.
    fn segments(&self) -> Result<u64, ExcerptError>;

    /// Write the segments selected by `fragments` to `output`.
    fn excerpt(&self, fragments: &[Fragment], output: &mut dyn Write) -> Result<(), ExcerptError>;

    /// Release the loaded source. Safe to call more than once.
    fn close(&mut self);
}

/// Source formats with a dedicated handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Pdf,
    Conll09,
}

/// Handler settings that do not come from the source itself.
#[derive(Debug, Clone)]
pub struct HandlerOptions {
    /// Sentence-to-page mapping, required for annotation formats
    pub mapping: Option<Arc<dyn Mapping>>,
    pub max_fan_out: u64,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            mapping: None,
            max_fan_out: DEFAULT_MAX_FAN_OUT,
        }
    }
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 2] = [SourceFormat::Pdf, SourceFormat::Conll09];

    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Conll09 => "conll09",
        }
    }

    /// Content types accepted by this format's handler.
    pub fn content_types(&self) -> &'static [&'static str] {
        match self {
            SourceFormat::Pdf => &[MIME_PDF],
            SourceFormat::Conll09 => &[MIME_CONLL09, MIME_CONLL],
        }
    }

    /// Check whether this format accepts `content_type`.
    ///
    /// Parameters such as `; charset=utf-8` are ignored.
    pub fn accepts(&self, content_type: &str) -> bool {
        let essence = essence(content_type);
        self.content_types()
            .iter()
            .any(|t| t.eq_ignore_ascii_case(essence))
    }

    /// Detect the format from a content type.
    pub fn for_content_type(content_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.accepts(content_type))
    }

    /// Detect the format from a file name extension.
    pub fn for_file_name(name: impl AsRef<Path>) -> Option<Self> {
        let ext = name.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(SourceFormat::Pdf),
            "conll" | "conll09" => Some(SourceFormat::Conll09),
            _ => None,
        }
    }

    /// Primary content type of this format.
    pub fn content_type(&self) -> &'static str {
        self.content_types()[0]
    }

    /// Create a fresh handler for this format.
    pub fn handler(self, options: HandlerOptions) -> Result<Box<dyn ExcerptHandler>, ExcerptError> {
        match self {
            SourceFormat::Pdf => Ok(Box::new(PdfHandler::new())),
            SourceFormat::Conll09 => {
                let mapping = options.mapping.ok_or(ExcerptError::MissingMapping)?;
                Ok(Box::new(ConllHandler::new(mapping, options.max_fan_out)))
            }
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceFormat {
    type Err = ExcerptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ExcerptError::InvalidArgument(format!("unknown source format '{}'", s)))
    }
}

/// Content type without parameters.
fn essence(content_type: &str) -> &str {
    content_type
        .split_once(';')
        .map_or(content_type, |(essence, _)| essence)
        .trim()
}

/// Load state shared by the handlers.
#[derive(Debug)]
pub(crate) enum Loaded<T> {
    Fresh,
    Ready(T),
    Closed,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Loaded::Fresh
    }
}

impl<T> Loaded<T> {
    /// Fail unless nothing was loaded yet.
    pub(crate) fn ensure_fresh(&self) -> Result<(), ExcerptError> {
        match self {
            Loaded::Fresh => Ok(()),
            _ => Err(ExcerptError::AlreadyInitialized),
        }
    }

    pub(crate) fn get(&self) -> Result<&T, ExcerptError> {
        match self {
            Loaded::Ready(value) => Ok(value),
            _ => Err(ExcerptError::NotInitialized),
        }
    }

    pub(crate) fn close(&mut self) {
        *self = Loaded::Closed;
    }
}

/// Fail with an unsupported-type error unless `format` accepts
/// `content_type`.
pub(crate) fn check_content_type(format: SourceFormat, content_type: &str) -> Result<(), ExcerptError> {
    if format.accepts(content_type) {
        Ok(())
    } else {
        Err(ExcerptError::UnsupportedType {
            content_type: content_type.to_string(),
            handler: format.name(),
        })
    }
}

/// Fail with an invalid-argument error on an empty fragment list.
pub(crate) fn require_fragments(fragments: &[Fragment]) -> Result<(), ExcerptError> {
    if fragments.is_empty() {
        Err(ExcerptError::InvalidArgument(
            "fragment list must not be empty".to_string(),
        ))
    } else {
        Ok(())
    }
}
