//! Single-pass membership test against a sorted fragment list.
//!
//! [`PageFilter`] answers "is index `v` selected?" for a non-decreasing
//! stream of indices in amortized O(1). It walks a cursor over the
//! fragments and never looks back. Once the stream has passed the last
//! fragment the filter is at end-of-stream and rejects everything, which
//! lets callers stop scanning their input early.

use crate::fragment::{set, Fragment};

/// Violations of the filter's input precondition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("Index {value} tested after {previous}, indices must not decrease")]
    OutOfOrder { previous: u64, value: u64 },
}

/// Position of the filter within its fragment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    /// Cursor at the fragment that may still match
    Active(usize),
    /// All fragments passed
    Eos,
}

/// Boundary filter over fragments sorted by begin and pairwise disjoint.
#[derive(Debug, Clone)]
pub struct PageFilter<'a> {
    fragments: &'a [Fragment],
    state: FilterState,
    last: Option<u64>,
}

impl<'a> PageFilter<'a> {
    pub fn new(fragments: &'a [Fragment]) -> Self {
        debug_assert!(
            set::is_sorted_disjoint(fragments),
            "filter fragments must be sorted and disjoint"
        );
        let state = if fragments.is_empty() {
            FilterState::Eos
        } else {
            FilterState::Active(0)
        };
        Self {
            fragments,
            state,
            last: None,
        }
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    /// True once no further index can match.
    pub fn is_eos(&self) -> bool {
        self.state == FilterState::Eos
    }

    /// Test whether `value` lies in one of the fragments.
    ///
    /// Values must be non-decreasing across calls. Repeating a value is
    /// allowed and yields the same answer.
    pub fn test(&mut self, value: u64) -> Result<bool, FilterError> {
        let mut cursor = match self.state {
            FilterState::Eos => return Ok(false),
            FilterState::Active(cursor) => cursor,
        };

        if let Some(previous) = self.last {
            if value < previous {
                return Err(FilterError::OutOfOrder { previous, value });
            }
        }
        self.last = Some(value);

        while value > self.fragments[cursor].end() {
            cursor += 1;
            if cursor == self.fragments.len() {
                self.state = FilterState::Eos;
                return Ok(false);
            }
        }
        self.state = FilterState::Active(cursor);

        Ok(value >= self.fragments[cursor].begin())
    }
}
