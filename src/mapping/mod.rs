//! Translation between segment coordinate spaces.
//!
//! *Source* refers to the native segmentation of the annotation data (for
//! example sentences of a CoNLL file). *Target* refers to the segmentation
//! of the primary data (for example pages of a PDF). A [`Mapping`] maps one
//! source index onto a contiguous range of target indices. Both sides are
//! 0-based; callers translate to 1-based fragment space.
//!
//! A mapping never applies offsets itself. When several sub-corpora share a
//! single addressing space, the caller applies [`Offsets`] at the call site.
//!
//! # Module Structure
//!
//! - [`tabular`] - Mapping loaded from a tab-separated lookup table
//! - [`space`] - Offsets and multi-part corpus coordinate spaces

mod error;
pub mod space;
pub mod tabular;

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use error::MappingError;
pub use space::{CorpusLayout, LayoutError, Offsets, PartFragments};
pub use tabular::TabularMapping;

/// One-way translation from source indices to target index ranges.
///
/// Implementations are immutable once loaded and may be shared between
/// threads without further synchronization.
pub trait Mapping: fmt::Debug + Send + Sync {
    /// Size of the source domain `[0, len)`.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 0-based first target index for `source`.
    fn target_begin(&self, source: u64) -> Result<u64, MappingError>;

    /// 0-based last target index (inclusive) for `source`.
    fn target_end(&self, source: u64) -> Result<u64, MappingError>;

    /// Both bounds of the target range for `source`.
    fn target_range(&self, source: u64) -> Result<(u64, u64), MappingError> {
        Ok((self.target_begin(source)?, self.target_end(source)?))
    }
}

/// Storage formats for mapping data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingType {
    /// Tab-separated `source<TAB>begin<TAB>end` rows
    Tabular,
}

impl MappingType {
    pub fn name(&self) -> &'static str {
        match self {
            MappingType::Tabular => "tabular",
        }
    }

    /// Load a mapping of this type from `reader`.
    pub fn load<R: BufRead>(self, reader: R) -> Result<Arc<dyn Mapping>, MappingError> {
        match self {
            MappingType::Tabular => Ok(Arc::new(TabularMapping::load(reader)?)),
        }
    }
}

impl fmt::Display for MappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MappingType {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tabular" => Ok(MappingType::Tabular),
            other => Err(MappingError::UnsupportedType(other.to_string())),
        }
    }
}
