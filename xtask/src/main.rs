//! Development tasks for excerptor
//!
//! Run with `cargo run -p xtask -- <task>`.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use excerptor::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for excerptor")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for excerptor and all subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => generate_man_pages(&out),
    }
}

fn generate_man_pages(out: &Path) -> Result<()> {
    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;

    let cmd = Cli::command();
    write_man_page(&cmd, out, "excerptor")?;

    for sub in cmd.get_subcommands() {
        let name = format!("excerptor-{}", sub.get_name());
        write_man_page(sub, out, &name)?;
    }

    println!("Man pages written to {}", out.display());
    Ok(())
}

fn write_man_page(cmd: &clap::Command, out: &Path, name: &str) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    let path = out.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
