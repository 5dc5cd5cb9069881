//! Closed 1-based index intervals.
//!
//! A [`Fragment`] denotes an inclusive span of addressable units of a
//! resource. The unit depends on the resource type: pages of a PDF,
//! sentences of an annotation file, characters of plain text.
//!
//! # Module Structure
//!
//! - [`codec`] - Textual form (`"7"`, `"5-14"`, comma-joined lists)
//! - [`set`] - Union size, merging and normalization of fragment lists

pub mod codec;
mod error;
pub mod set;

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use codec::{decode, decode_all, encode, encode_all, FragmentCodec};
pub use error::FragmentError;

/// Inclusive span `[begin, end]` of 1-based indices.
///
/// Field order matters: the derived ordering is lexicographic on
/// `(begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fragment {
    begin: u64,
    end: u64,
}

impl Fragment {
    /// Create a fragment covering `begin..=end`.
    pub fn new(begin: u64, end: u64) -> Result<Self, FragmentError> {
        if begin < 1 {
            return Err(FragmentError::ZeroBegin);
        }
        if end < 1 {
            return Err(FragmentError::ZeroEnd);
        }
        if end < begin {
            return Err(FragmentError::Inverted { begin, end });
        }
        Ok(Self { begin, end })
    }

    /// Create a fragment covering exactly one index.
    pub fn single(value: u64) -> Result<Self, FragmentError> {
        Self::new(value, value)
    }

    pub fn builder() -> FragmentBuilder {
        FragmentBuilder::default()
    }

    /// 1-based first index.
    pub fn begin(&self) -> u64 {
        self.begin
    }

    /// 1-based last index (inclusive).
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of indices covered.
    pub fn size(&self) -> u64 {
        self.end - self.begin + 1
    }

    /// Check if this fragment completely covers `other`.
    pub fn contains(&self, other: &Fragment) -> bool {
        self.begin <= other.begin && self.end >= other.end
    }

    /// Check if `value` lies within this fragment.
    pub fn contains_value(&self, value: u64) -> bool {
        self.begin <= value && self.end >= value
    }

    /// All covered indices in ascending order.
    pub fn iter(&self) -> RangeInclusive<u64> {
        self.begin..=self.end
    }

    /// Move both bounds up by `offset`.
    pub fn shifted(&self, offset: u64) -> Result<Self, FragmentError> {
        let overflow = || FragmentError::Overflow {
            begin: self.begin,
            end: self.end,
            offset,
        };
        let begin = self.begin.checked_add(offset).ok_or_else(overflow)?;
        let end = self.end.checked_add(offset).ok_or_else(overflow)?;
        Ok(Self { begin, end })
    }

    /// True if both fragments overlap or `other` starts right after `self`
    /// ends (or vice versa).
    pub(crate) fn touches(&self, other: &Fragment) -> bool {
        self.begin <= other.end.saturating_add(1) && other.begin <= self.end.saturating_add(1)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin == self.end {
            write!(f, "{}", self.begin)
        } else {
            write!(f, "{}-{}", self.begin, self.end)
        }
    }
}

impl FromStr for Fragment {
    type Err = FragmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl Serialize for Fragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fragment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        decode(&raw).map_err(serde::de::Error::custom)
    }
}

/// Step-wise construction of a [`Fragment`].
///
/// The builder is consumed by [`FragmentBuilder::build`], so it cannot be
/// reused after the fragment was obtained.
#[derive(Debug, Clone, Default)]
pub struct FragmentBuilder {
    begin: Option<u64>,
    end: Option<u64>,
}

impl FragmentBuilder {
    pub fn begin(mut self, begin: u64) -> Self {
        self.begin = Some(begin);
        self
    }

    pub fn end(mut self, end: u64) -> Self {
        self.end = Some(end);
        self
    }

    /// Validate and create the fragment. A missing end defaults to begin.
    pub fn build(self) -> Result<Fragment, FragmentError> {
        let begin = self.begin.ok_or(FragmentError::MissingBegin)?;
        Fragment::new(begin, self.end.unwrap_or(begin))
    }
}
