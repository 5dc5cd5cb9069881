//! Quota accounting for released excerpts.
//!
//! A [`QuotaAccount`] holds the union of all segments already released to
//! one user for one resource. Checking a candidate excerpt measures the
//! union of the account and the excerpt, so segments that were released
//! before are not charged twice.
//!
//! [`QuotaLedger`] keys accounts by [`QuotaKey`] and is an owned value.
//! Callers that share it between threads wrap it in their own lock.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::fragment::{set, Fragment};

/// Errors raised by ledger operations that release segments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuotaError {
    #[error("Quota exceeded: releasing would use {used} of {limit} segments")]
    Exceeded { used: u64, limit: u64 },
}

/// Fraction of a resource's segments that may be released to one user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaPolicy {
    pub excerpt_limit: f64,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self { excerpt_limit: 0.1 }
    }
}

impl QuotaPolicy {
    pub fn new(excerpt_limit: f64) -> Self {
        Self { excerpt_limit }
    }

    /// Maximum number of segments releasable from a resource of `segments`
    /// units. The product is floored; negative or NaN fractions yield 0.
    pub fn limit_for(&self, segments: u64) -> u64 {
        let limit = (segments as f64 * self.excerpt_limit).floor();
        if limit.is_nan() || limit <= 0.0 {
            0
        } else {
            // float-to-int casts saturate
            limit as u64
        }
    }
}

/// Result of measuring an excerpt against an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaCheck {
    /// Size of the union of the account and the excerpt
    pub used: u64,
    pub limit: u64,
}

impl QuotaCheck {
    pub fn exceeded(&self) -> bool {
        self.used > self.limit
    }

    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.used)
    }
}

/// Segments already released for one (user, resource) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaAccount {
    fragments: Vec<Fragment>,
}

impl QuotaAccount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account from previously stored fragments.
    pub fn from_fragments(mut fragments: Vec<Fragment>) -> Self {
        set::normalize(&mut fragments);
        Self { fragments }
    }

    /// Released fragments, sorted and disjoint.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Number of released segments.
    pub fn size(&self) -> u64 {
        set::total_size(&self.fragments)
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Add `excerpt` to the released segments.
    pub fn merge(&mut self, excerpt: &[Fragment]) {
        set::merge(&mut self.fragments, excerpt);
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    /// Measure the account combined with `excerpt` against `limit`.
    pub fn check(&self, excerpt: &[Fragment], limit: u64) -> QuotaCheck {
        QuotaCheck {
            used: set::combined_size(&self.fragments, excerpt),
            limit,
        }
    }

    /// Segments still releasable under `limit`.
    pub fn remaining(&self, limit: u64) -> u64 {
        limit.saturating_sub(self.size())
    }
}

/// Identifies one account in a [`QuotaLedger`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuotaKey {
    pub user: String,
    pub resource: String,
}

impl QuotaKey {
    pub fn new(user: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            resource: resource.into(),
        }
    }
}

/// Quota accounts of all users and resources.
#[derive(Debug, Clone, Default)]
pub struct QuotaLedger {
    accounts: HashMap<QuotaKey, QuotaAccount>,
}

impl QuotaLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, key: &QuotaKey) -> Option<&QuotaAccount> {
        self.accounts.get(key)
    }

    /// Account for `key`, created empty on first access.
    pub fn account_mut(&mut self, key: QuotaKey) -> &mut QuotaAccount {
        self.accounts.entry(key).or_default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Check `excerpt` against `limit` and merge it into the account when
    /// it fits. An excerpt that does not fit leaves the account unchanged.
    pub fn release(
        &mut self,
        key: QuotaKey,
        excerpt: &[Fragment],
        limit: u64,
    ) -> Result<QuotaCheck, QuotaError> {
        let check = match self.accounts.get(&key) {
            Some(account) => account.check(excerpt, limit),
            None => QuotaAccount::new().check(excerpt, limit),
        };
        if check.exceeded() {
            tracing::info!(used = check.used, limit, "excerpt rejected by quota");
            return Err(QuotaError::Exceeded {
                used: check.used,
                limit,
            });
        }
        self.account_mut(key).merge(excerpt);
        Ok(check)
    }

    /// Drop the account for `key`. Returns true if it existed.
    pub fn clear(&mut self, key: &QuotaKey) -> bool {
        self.accounts.remove(key).is_some()
    }
}
