//! Hit consolidation under a quota ceiling.
//!
//! An external query evaluator reports matches as 0-based indices in the
//! annotation space ("hits"). Each hit maps onto a range of primary-data
//! segments. This module expands the hits of one region into the union of
//! their target ranges while enforcing the remaining quota.
//!
//! **Algorithm** (single pass, bounded by the emitted output):
//! 1. Keep the highest target index emitted so far (`max`)
//! 2. A span starting above `max` is appended whole
//! 3. A span overlapping `max` contributes only `[max+1, end]`
//! 4. A span ending at or below `max` is skipped in O(1)
//! 5. The first span that would cross `target_limit` stops the whole run;
//!    the span is discarded, not clipped
//!
//! Hitting the ceiling is not an error. The result carries a `truncated`
//! flag and the caller decides whether a partial result is acceptable.

use serde::Serialize;

use crate::fragment::{set, Fragment, FragmentError};
use crate::mapping::{Mapping, MappingError, Offsets};

/// Outcome of a consolidation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Consolidation {
    indices: Vec<u64>,
    truncated: bool,
}

impl Consolidation {
    /// Strictly increasing 1-based target indices.
    pub fn indices(&self) -> &[u64] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<u64> {
        self.indices
    }

    /// True if the run stopped at the quota ceiling.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Regroup the indices into maximal fragments.
    pub fn fragments(&self) -> Result<Vec<Fragment>, FragmentError> {
        set::from_indices(self.indices.iter().copied())
    }
}

/// Expand sorted `hits` through `mapping` into 1-based target indices.
///
/// `hits` must be ascending. Each hit is first moved into the mapping's
/// domain by `offsets.source`; looked-up targets are moved by
/// `offsets.target` and converted to 1-based. No emitted index exceeds
/// `target_limit`.
///
/// Fails only if a hit lies outside the mapping domain or before the source
/// offset.
pub fn consolidate<M, I>(
    hits: I,
    mapping: &M,
    offsets: Offsets,
    target_limit: u64,
) -> Result<Consolidation, MappingError>
where
    M: Mapping + ?Sized,
    I: IntoIterator<Item = u64>,
{
    let mut result = Consolidation::default();
    let mut max: Option<u64> = None;

    for hit in hits {
        let source = offsets.local_source(hit)?;
        let (begin, end) = mapping.target_range(source)?;
        if end < begin {
            tracing::debug!(hit, begin, end, "skipping inverted mapping span");
            continue;
        }
        let begin = one_based(offsets.global_target(begin)?, offsets)?;
        let end = one_based(offsets.global_target(end)?, offsets)?;

        let from = match max {
            None => begin,
            Some(m) if begin > m => begin,
            Some(m) if end > m => m + 1,
            Some(_) => continue,
        };

        if end > target_limit {
            tracing::debug!(
                hit,
                end,
                target_limit,
                emitted = result.indices.len(),
                "quota ceiling reached, stopping consolidation"
            );
            result.truncated = true;
            break;
        }

        result.indices.extend(from..=end);
        max = Some(end);
    }

    Ok(result)
}

fn one_based(index: u64, offsets: Offsets) -> Result<u64, MappingError> {
    index.checked_add(1).ok_or(MappingError::Overflow {
        index,
        offset: offsets.target,
    })
}
