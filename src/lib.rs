//! excerptor - excerpt coordinate translation and interval accounting
//!
//! Derives legally bounded excerpts from protected resources and keeps track
//! of how much of each resource a user has already received.
//!
//! # Module Structure
//!
//! - [`fragment`] - 1-based closed index ranges, their text form and set operations
//! - [`mapping`] - Source-to-target index translation and multi-part coordinate spaces
//! - [`consolidate`] - Expansion of query hits into target indices under a quota ceiling
//! - [`quota`] - Per-user, per-resource quota accounts
//! - [`excerpt`] - PDF page and CoNLL sentence-block extraction
//! - [`config`] - User configuration
//! - [`cli`] - Command line definitions

pub mod cli;
pub mod config;
pub mod consolidate;
pub mod excerpt;
pub mod fragment;
pub mod mapping;
pub mod quota;

pub use config::Config;
pub use consolidate::{consolidate, Consolidation};
pub use excerpt::{ExcerptError, ExcerptHandler, HandlerOptions, SourceFormat};
pub use fragment::{Fragment, FragmentError};
pub use mapping::{Mapping, MappingError, MappingType, Offsets};
pub use quota::{QuotaAccount, QuotaCheck, QuotaLedger, QuotaPolicy};
