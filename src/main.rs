use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use std::io;
use tracing_subscriber::EnvFilter;

use excerptor::cli::{Cli, Commands, ConfigCommands};
use excerptor::Config;

mod commands;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "EXCERPTOR_LOG";

/// Install the log subscriber. `EXCERPTOR_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Size { a, b } => commands::fragments::handle_size(&a, &b),
        Commands::Merge { quota, excerpt } => commands::fragments::handle_merge(&quota, &excerpt),
        Commands::Check {
            quota,
            excerpt,
            segments,
            limit,
        } => commands::fragments::handle_check(&quota, &excerpt, segments, limit, &config),
        Commands::Consolidate {
            mapping,
            limit,
            source_offset,
            target_offset,
            hits,
        } => commands::consolidate::handle(&mapping, limit, source_offset, target_offset, &hits),
        Commands::Pdf {
            input,
            output,
            fragments,
        } => commands::excerpt::handle_pdf(&input, &output, &fragments),
        Commands::Conll {
            input,
            output,
            mapping,
            max_fan_out,
            fragments,
        } => {
            let max_fan_out = max_fan_out.unwrap_or(config.excerpt.max_fan_out);
            commands::excerpt::handle_conll(&input, &output, &mapping, max_fan_out, &fragments)
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "excerptor", &mut io::stdout());
            Ok(())
        }
    }
}
