//! Fragment list and quota subcommands handler

use anyhow::{bail, Context, Result};
use serde::Serialize;

use excerptor::fragment::{self, set, Fragment};
use excerptor::{Config, QuotaAccount};

/// Parse a comma-separated fragment list given on the command line.
pub fn parse_fragments(value: &str, what: &str) -> Result<Vec<Fragment>> {
    fragment::decode_all(value.trim())
        .with_context(|| format!("Invalid {} fragment list '{}'", what, value))
}

/// Print the size of the union of two fragment lists.
#[cfg(not(tarpaulin_include))]
pub fn handle_size(a: &str, b: &str) -> Result<()> {
    let a = parse_fragments(a, "first")?;
    let b = parse_fragments(b, "second")?;
    println!("{}", set::combined_size(&a, &b));
    Ok(())
}

/// Print the quota after merging an excerpt into it.
#[cfg(not(tarpaulin_include))]
pub fn handle_merge(quota: &str, excerpt: &str) -> Result<()> {
    let mut account = QuotaAccount::from_fragments(parse_fragments(quota, "quota")?);
    account.merge(&parse_fragments(excerpt, "excerpt")?);
    println!("{}", fragment::encode_all(account.fragments()));
    Ok(())
}

#[derive(Debug, Serialize)]
struct CheckReport {
    used: u64,
    limit: u64,
    remaining: u64,
    exceeded: bool,
    /// Quota after the excerpt was released, unchanged if it did not fit
    quota: String,
}

/// Print a JSON quota report; fails if the excerpt does not fit.
#[cfg(not(tarpaulin_include))]
pub fn handle_check(
    quota: &str,
    excerpt: &str,
    segments: u64,
    limit: Option<u64>,
    config: &Config,
) -> Result<()> {
    let mut account = QuotaAccount::from_fragments(parse_fragments(quota, "quota")?);
    let excerpt = parse_fragments(excerpt, "excerpt")?;

    if let Some(f) = excerpt.iter().find(|f| f.end() > segments) {
        bail!(
            "Excerpt fragment {} exceeds the {} segments of the resource",
            f,
            segments
        );
    }

    let limit = limit.unwrap_or_else(|| config.quota.limit_for(segments));
    let check = account.check(&excerpt, limit);
    if !check.exceeded() {
        account.merge(&excerpt);
    }

    let report = CheckReport {
        used: check.used,
        limit: check.limit,
        remaining: check.remaining(),
        exceeded: check.exceeded(),
        quota: fragment::encode_all(account.fragments()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if check.exceeded() {
        bail!(
            "Quota exceeded: {} of {} allowed segments",
            check.used,
            check.limit
        );
    }
    Ok(())
}
