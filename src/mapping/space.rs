//! Coordinate spaces spanning several sub-corpora.
//!
//! A corpus may consist of several parts that are addressed as one
//! contiguous space: part `k` starts right after the last segment of part
//! `k-1`. [`CorpusLayout`] owns the part list and translates fragments
//! between per-part (local) and corpus-wide (global) coordinates.
//! [`Offsets`] carries the source/target shift for a single part's mapping.

use serde::{Deserialize, Serialize};

use super::MappingError;
use crate::fragment::{Fragment, FragmentCodec, FragmentError};

/// Source and target shift applied around a [`super::Mapping`] lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offsets {
    /// Subtracted from incoming hits before the lookup
    pub source: u64,
    /// Added to the looked-up target indices
    pub target: u64,
}

impl Offsets {
    pub fn new(source: u64, target: u64) -> Self {
        Self { source, target }
    }

    /// Translate a global source index into the mapping's own domain.
    pub fn local_source(&self, index: u64) -> Result<u64, MappingError> {
        index
            .checked_sub(self.source)
            .ok_or(MappingError::BeforeOffset {
                index,
                offset: self.source,
            })
    }

    /// Translate a looked-up target index into the global target space.
    pub fn global_target(&self, index: u64) -> Result<u64, MappingError> {
        index
            .checked_add(self.target)
            .ok_or(MappingError::Overflow {
                index,
                offset: self.target,
            })
    }
}

/// Errors raised while moving fragments between local and global space.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Unknown corpus part: {0}")]
    UnknownPart(String),

    #[error("Corpus part '{0}' registered twice")]
    DuplicatePart(String),

    #[error("Index {index} exceeds the {total} segments of the corpus")]
    OutOfBounds { index: u64, total: u64 },

    #[error("Fragment {fragment} exceeds the {segments} segments of part '{part}'")]
    ExceedsPart {
        part: String,
        fragment: Fragment,
        segments: u64,
    },

    #[error(transparent)]
    Fragment(#[from] FragmentError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Part {
    id: String,
    segments: u64,
}

/// Local fragments belonging to one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartFragments<'a> {
    pub part: &'a str,
    pub fragments: Vec<Fragment>,
}

/// Ordered list of corpus parts defining one global coordinate space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusLayout {
    parts: Vec<Part>,
}

impl CorpusLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part with the given number of segments.
    pub fn push(&mut self, id: impl Into<String>, segments: u64) -> Result<&mut Self, LayoutError> {
        let id = id.into();
        if self.parts.iter().any(|p| p.id == id) {
            return Err(LayoutError::DuplicatePart(id));
        }
        self.parts.push(Part { id, segments });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Part ids in layout order.
    pub fn part_ids(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.id.as_str())
    }

    pub fn segments_of(&self, part: &str) -> Option<u64> {
        self.parts.iter().find(|p| p.id == part).map(|p| p.segments)
    }

    /// Sum of the segments of all parts.
    pub fn total_segments(&self) -> u64 {
        self.parts
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.segments))
    }

    /// Number of segments that precede `part` in the global space.
    pub fn offset_of(&self, part: &str) -> Option<u64> {
        let mut offset = 0u64;
        for p in &self.parts {
            if p.id == part {
                return Some(offset);
            }
            offset = offset.saturating_add(p.segments);
        }
        None
    }

    /// Offsets for a mapping from `part`'s annotation into the global page
    /// space, given the number of source units that precede it.
    pub fn offsets_for(&self, part: &str, source_offset: u64) -> Result<Offsets, LayoutError> {
        let target = self
            .offset_of(part)
            .ok_or_else(|| LayoutError::UnknownPart(part.to_string()))?;
        Ok(Offsets::new(source_offset, target))
    }

    /// Move local fragments of `part` into global coordinates.
    pub fn to_global(&self, part: &str, fragments: &[Fragment]) -> Result<Vec<Fragment>, LayoutError> {
        let offset = self
            .offset_of(part)
            .ok_or_else(|| LayoutError::UnknownPart(part.to_string()))?;
        let segments = self.segments_of(part).unwrap_or(0);

        fragments
            .iter()
            .map(|f| {
                if f.end() > segments {
                    return Err(LayoutError::ExceedsPart {
                        part: part.to_string(),
                        fragment: *f,
                        segments,
                    });
                }
                Ok(f.shifted(offset)?)
            })
            .collect()
    }

    /// Split global fragments into local fragments per part.
    ///
    /// Fragments straddling a part boundary are cut at the boundary. Parts
    /// receiving no fragment are omitted; the result follows layout order.
    pub fn to_local(&self, fragments: &[Fragment]) -> Result<Vec<PartFragments<'_>>, LayoutError> {
        let total = self.total_segments();
        if let Some(f) = fragments.iter().find(|f| f.end() > total) {
            return Err(LayoutError::OutOfBounds {
                index: f.end(),
                total,
            });
        }

        let mut result = Vec::new();
        let mut offset = 0u64;
        for part in &self.parts {
            let first = offset.saturating_add(1);
            let last = offset.saturating_add(part.segments);
            let mut local = Vec::new();
            if part.segments > 0 {
                for f in fragments {
                    let begin = f.begin().max(first);
                    let end = f.end().min(last);
                    if begin <= end {
                        local.push(Fragment::new(begin - offset, end - offset)?);
                    }
                }
            }
            if !local.is_empty() {
                result.push(PartFragments {
                    part: &part.id,
                    fragments: local,
                });
            }
            offset = last;
        }
        Ok(result)
    }

    /// Encode the local fragments of several parts as one global list.
    pub fn encode_global<'f>(
        &self,
        entries: impl IntoIterator<Item = (&'f str, &'f [Fragment])>,
    ) -> Result<String, LayoutError> {
        let mut codec = FragmentCodec::new();
        for (part, fragments) in entries {
            let offset = self
                .offset_of(part)
                .ok_or_else(|| LayoutError::UnknownPart(part.to_string()))?;
            codec.push_all_with_offset(fragments, offset)?;
        }
        Ok(codec.finish())
    }
}
