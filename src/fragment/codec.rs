//! Textual encoding of fragments and fragment lists.
//!
//! A single fragment is written as `"7"` when it covers one index and as
//! `"5-14"` otherwise. Lists are joined with `,` in their original order:
//! `"1-4,7,9-12"`. External clients parse this format, so it must stay
//! stable.

use std::fmt;

use super::{Fragment, FragmentError};

const SEP: char = ',';
const RANGE_SEP: char = '-';

/// Encode a single fragment.
pub fn encode(fragment: &Fragment) -> String {
    fragment.to_string()
}

/// Encode a list of fragments, preserving order.
///
/// An empty list encodes to the empty string.
pub fn encode_all(fragments: &[Fragment]) -> String {
    let mut codec = FragmentCodec::with_capacity(fragments.len() * 4);
    codec.push_all(fragments);
    codec.finish()
}

/// Decode a single fragment, splitting on the first `-`.
pub fn decode(s: &str) -> Result<Fragment, FragmentError> {
    match s.split_once(RANGE_SEP) {
        Some((begin, end)) => Fragment::new(parse_index(begin, s)?, parse_index(end, s)?),
        None => Fragment::single(parse_index(s, s)?),
    }
}

/// Decode a comma-separated list of fragments, preserving order.
///
/// The empty string decodes to an empty list so that [`encode_all`] and
/// `decode_all` are exact inverses. Empty tokens (`"1,,2"`, `"1,"`) are
/// rejected.
pub fn decode_all(s: &str) -> Result<Vec<Fragment>, FragmentError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(SEP).map(decode).collect()
}

/// Parse a strictly unsigned decimal number. Signs, whitespace and empty
/// input are malformed.
fn parse_index(digits: &str, token: &str) -> Result<u64, FragmentError> {
    let malformed = || FragmentError::Malformed {
        token: token.to_string(),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    digits.parse().map_err(|_| malformed())
}

/// Incremental builder for comma-joined fragment strings.
///
/// Used when several sources contribute to one encoded list, e.g. when the
/// quotas of all parts of a corpus are rendered into a single global
/// coordinate space by adding each part's offset.
#[derive(Debug, Clone, Default)]
pub struct FragmentCodec {
    buffer: String,
}

impl FragmentCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    fn separate(&mut self) {
        if !self.buffer.is_empty() {
            self.buffer.push(SEP);
        }
    }

    /// Append a fragment.
    pub fn push(&mut self, fragment: &Fragment) -> &mut Self {
        self.separate();
        self.buffer.push_str(&encode(fragment));
        self
    }

    /// Append all fragments in order.
    pub fn push_all(&mut self, fragments: &[Fragment]) -> &mut Self {
        for fragment in fragments {
            self.push(fragment);
        }
        self
    }

    /// Append a fragment after moving it up by `offset`.
    pub fn push_with_offset(
        &mut self,
        fragment: &Fragment,
        offset: u64,
    ) -> Result<&mut Self, FragmentError> {
        let shifted = fragment.shifted(offset)?;
        Ok(self.push(&shifted))
    }

    /// Append all fragments after moving them up by `offset`.
    pub fn push_all_with_offset(
        &mut self,
        fragments: &[Fragment],
        offset: u64,
    ) -> Result<&mut Self, FragmentError> {
        for fragment in fragments {
            self.push_with_offset(fragment, offset)?;
        }
        Ok(self)
    }

    /// Append a bare index as a single-value entry.
    pub fn push_index(&mut self, index: u64) -> &mut Self {
        self.separate();
        self.buffer.push_str(&index.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the codec and return the encoded list.
    pub fn finish(self) -> String {
        self.buffer
    }
}

impl fmt::Display for FragmentCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}
