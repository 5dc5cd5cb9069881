//! Mapping load and lookup errors.

/// Errors that can occur while loading or querying a mapping.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("Invalid mapping syntax at line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("Inconsistent source index at line {line}: expected {expected}, found {found}")]
    InconsistentIndex {
        line: usize,
        expected: u64,
        found: u64,
    },

    #[error("Source index {index} outside of mapping domain [0, {len})")]
    OutOfRange { index: u64, len: usize },

    #[error("Index {index} lies before offset {offset}")]
    BeforeOffset { index: u64, offset: u64 },

    #[error("Target index {index} overflows when shifted by {offset}")]
    Overflow { index: u64, offset: u64 },

    #[error("Unsupported mapping type: {0}")]
    UnsupportedType(String),

    #[error("Failed to read mapping data: {0}")]
    Io(#[from] std::io::Error),
}
