//! Set operations over fragment lists.
//!
//! Fragment lists handed to the page filter or the hit consolidator must be
//! sorted by begin index and pairwise disjoint. The functions here establish
//! that invariant again when two independently produced lists meet, most
//! notably when a new excerpt is folded into an existing quota.

use super::{Fragment, FragmentError};

/// Number of distinct indices covered by `a ∪ b`.
///
/// Each list may be unsorted and the two lists may overlap each other.
/// Nested, overlapping and duplicate fragments are counted once.
///
/// **Algorithm**:
/// 1. Order all fragments of both lists by begin index
/// 2. Scan left to right keeping the highest index covered so far
/// 3. Each fragment contributes only the part above that marker
pub fn combined_size(a: &[Fragment], b: &[Fragment]) -> u64 {
    let mut all: Vec<&Fragment> = a.iter().chain(b.iter()).collect();
    all.sort_unstable_by_key(|f| f.begin());

    let mut total: u64 = 0;
    let mut last_covered: Option<u64> = None;

    for fragment in all {
        let start = match last_covered {
            None => Some(fragment.begin()),
            Some(last) => last.checked_add(1).map(|next| next.max(fragment.begin())),
        };
        if let Some(start) = start {
            if fragment.end() >= start {
                total = total.saturating_add(fragment.end() - start + 1);
            }
        }
        last_covered = Some(last_covered.map_or(fragment.end(), |last| last.max(fragment.end())));
    }

    total
}

/// Fold `others` into `ours`.
///
/// Afterwards `ours` is sorted by begin index and no two fragments overlap or
/// touch: any overlapping or adjacent pair was replaced by the single
/// fragment `min(begin)..=max(end)`.
pub fn merge(ours: &mut Vec<Fragment>, others: &[Fragment]) {
    if others.is_empty() {
        return;
    }
    ours.extend_from_slice(others);
    normalize(ours);
}

/// Sort `fragments` and coalesce overlapping or adjacent entries in place.
pub fn normalize(fragments: &mut Vec<Fragment>) {
    if fragments.len() < 2 {
        return;
    }
    fragments.sort_unstable();

    let mut merged: Vec<Fragment> = Vec::with_capacity(fragments.len());
    for fragment in fragments.drain(..) {
        match merged.last_mut() {
            Some(last) if last.touches(&fragment) => {
                *last = Fragment {
                    begin: last.begin.min(fragment.begin),
                    end: last.end.max(fragment.end),
                };
            }
            _ => merged.push(fragment),
        }
    }
    *fragments = merged;
}

/// Sum of the sizes of all fragments, without resolving overlaps.
pub fn total_size(fragments: &[Fragment]) -> u64 {
    fragments
        .iter()
        .fold(0u64, |acc, f| acc.saturating_add(f.size()))
}

/// True if the list is sorted by begin index and no two fragments overlap.
///
/// Adjacent fragments (`1-3,4-6`) are allowed.
pub fn is_sorted_disjoint(fragments: &[Fragment]) -> bool {
    fragments.windows(2).all(|w| w[0].end() < w[1].begin())
}

/// Regroup a strictly increasing sequence of 1-based indices into maximal
/// runs.
///
/// `[1, 2, 3, 7, 9, 10]` becomes `1-3,7,9-10`.
pub fn from_indices<I>(indices: I) -> Result<Vec<Fragment>, FragmentError>
where
    I: IntoIterator<Item = u64>,
{
    let mut fragments: Vec<Fragment> = Vec::new();
    let mut current: Option<(u64, u64)> = None;

    for value in indices {
        current = match current {
            None => {
                Fragment::single(value)?;
                Some((value, value))
            }
            Some((begin, end)) if end.checked_add(1) == Some(value) => Some((begin, value)),
            Some((begin, end)) if value > end => {
                fragments.push(Fragment::new(begin, end)?);
                Some((value, value))
            }
            Some((_, end)) => {
                return Err(FragmentError::Unordered {
                    previous: end,
                    value,
                })
            }
        };
    }

    if let Some((begin, end)) = current {
        fragments.push(Fragment::new(begin, end)?);
    }
    Ok(fragments)
}
