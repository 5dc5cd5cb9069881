//! Fragment construction and decoding errors.

/// Errors raised when a fragment would violate its invariants.
///
/// All variants are invalid-argument conditions: they are surfaced to the
/// caller as-is and never corrected silently.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FragmentError {
    #[error("Fragment begin must be greater than 0")]
    ZeroBegin,

    #[error("Fragment end must be greater than 0")]
    ZeroEnd,

    #[error("Fragment end {end} must be greater or equal to begin {begin}")]
    Inverted { begin: u64, end: u64 },

    #[error("Fragment builder has no begin index")]
    MissingBegin,

    #[error("Malformed fragment token '{token}'")]
    Malformed { token: String },

    #[error("Index {value} follows {previous} but indices must be strictly increasing")]
    Unordered { previous: u64, value: u64 },

    #[error("Shifting fragment [{begin},{end}] by {offset} overflows")]
    Overflow { begin: u64, end: u64, offset: u64 },
}
