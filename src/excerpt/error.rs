//! Excerpt handler errors.

use super::filter::FilterError;
use crate::mapping::MappingError;

/// Errors that can occur while loading a source or writing an excerpt.
#[derive(Debug, thiserror::Error)]
pub enum ExcerptError {
    #[error("Content type '{content_type}' is not supported by the {handler} handler")]
    UnsupportedType {
        content_type: String,
        handler: &'static str,
    },

    #[error("Encrypted documents are not supported")]
    Encrypted,

    #[error("Source contains no {0}s")]
    EmptyResource(&'static str),

    #[error("Handler has not been initialized")]
    NotInitialized,

    #[error("Handler has already been initialized")]
    AlreadyInitialized,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Page {index} is out of range, document has {pages} pages")]
    PageOutOfRange { index: u64, pages: u64 },

    #[error("Excerpt produced no output")]
    EmptyExcerpt,

    #[error("Sentence {sentence} spans {fan_out} pages, at most {max} allowed")]
    FanOut {
        sentence: u64,
        fan_out: u64,
        max: u64,
    },

    #[error("Sentence excerpts need a sentence-to-page mapping")]
    MissingMapping,

    #[error(transparent)]
    Order(#[from] FilterError),

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
