//! CLI definitions for excerptor
//!
//! This module is shared between the main binary and the xtask crate, which
//! renders man pages from the same definitions.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Version string with git SHA and build date for development builds.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("EXCERPTOR_BUILD_DATE"),
    ")"
);

/// Version string with build date for release builds.
#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("EXCERPTOR_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "excerptor")]
#[command(version = VERSION)]
#[command(about = "Fragment accounting, hit consolidation and excerpt extraction")]
#[command(long_about = "Fragment accounting, hit consolidation and excerpt extraction.

Fragments are 1-based inclusive index ranges written as \"7\" or \"5-14\",
joined with commas: \"1-3,7,10-12\".

EXAMPLES:
    excerptor size 1-4,8-9 2-6              Size of the union of two lists
    excerptor check 1-5 4-8 --segments 100  Check an excerpt against a quota
    excerptor pdf book.pdf out.pdf 3-7      Extract pages 3 to 7
    excerptor conll corpus.conll09 out.conll09 --mapping pages.tsv 1-2

Set EXCERPTOR_LOG (e.g. EXCERPTOR_LOG=debug) to control log output.")]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the number of segments covered by two fragment lists together
    #[command(long_about = "Print the number of segments covered by the union of two fragment lists.

Segments present in both lists are counted once.

EXAMPLE:
    excerptor size 1-2,3-6,9 2,3-5,8    Prints 8")]
    Size {
        /// First fragment list
        #[arg(value_name = "A", allow_hyphen_values = true)]
        a: String,
        /// Second fragment list
        #[arg(value_name = "B", allow_hyphen_values = true)]
        b: String,
    },

    /// Merge an excerpt into a quota and print the resulting fragment list
    Merge {
        /// Fragments already released
        #[arg(value_name = "QUOTA", allow_hyphen_values = true)]
        quota: String,
        /// Fragments of the new excerpt
        #[arg(value_name = "EXCERPT", allow_hyphen_values = true)]
        excerpt: String,
    },

    /// Check whether an excerpt fits into the remaining quota
    #[command(long_about = "Check whether an excerpt fits into the remaining quota.

The limit defaults to the configured fraction of the resource's segments
([quota] excerpt_limit, 0.1 unless configured). Prints a JSON report and
exits with status 1 if the quota would be exceeded.

EXAMPLE:
    excerptor check 1-5 4-8 --segments 100")]
    Check {
        /// Fragments already released
        #[arg(value_name = "QUOTA", allow_hyphen_values = true)]
        quota: String,
        /// Fragments of the requested excerpt
        #[arg(value_name = "EXCERPT", allow_hyphen_values = true)]
        excerpt: String,
        /// Total number of segments in the resource
        #[arg(long)]
        segments: u64,
        /// Absolute limit overriding the configured fraction
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Expand query hits into target fragments under a quota ceiling
    #[command(long_about = "Expand query hits into target fragments under a quota ceiling.

HITS are 0-based source indices, comma separated and ascending. Each hit is
mapped onto its target range; the union of those ranges is printed as JSON.
Expansion stops at the first range that would exceed --limit.

EXAMPLE:
    excerptor consolidate --mapping pages.tsv --limit 20 0,4,5,17")]
    Consolidate {
        /// Tab-separated mapping file (source, first target, last target)
        #[arg(long)]
        mapping: PathBuf,
        /// Highest 1-based target index that may be emitted
        #[arg(long)]
        limit: u64,
        /// Subtracted from hits before the mapping lookup
        #[arg(long, default_value_t = 0)]
        source_offset: u64,
        /// Added to looked-up target indices
        #[arg(long, default_value_t = 0)]
        target_offset: u64,
        /// Comma-separated 0-based hit indices
        #[arg(value_name = "HITS", default_value = "")]
        hits: String,
    },

    /// Extract pages from a PDF document
    Pdf {
        /// Source PDF document
        input: PathBuf,
        /// Destination of the excerpt
        output: PathBuf,
        /// 1-based pages to extract, in output order
        #[arg(value_name = "FRAGMENTS")]
        fragments: String,
    },

    /// Extract sentence blocks of a CoNLL-2009 file by page
    Conll {
        /// Source annotation file
        input: PathBuf,
        /// Destination of the excerpt
        output: PathBuf,
        /// Tab-separated sentence-to-page mapping file
        #[arg(long)]
        mapping: PathBuf,
        /// Maximum number of pages per sentence (overrides config)
        #[arg(long)]
        max_fan_out: Option<u64>,
        /// 1-based pages to extract
        #[arg(value_name = "FRAGMENTS")]
        fragments: String,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
