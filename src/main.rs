//! # incbuild CLI Entry Point
//!
//! Parses the profile argument and flags with clap, loads `build.toml`, runs
//! the incremental build and maps its outcome to an exit code:
//!
//! - `0` - built, up to date, or dry run
//! - `1` - config or directory errors, failed compile or link steps
//! - `2` - invalid arguments (reported by clap)

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use incbuild::build::{self, BuildOptions, ProcessInvoker};
use incbuild::config::{self, CONFIG_FILE, Profile};

#[cfg(windows)]
#[link(name = "kernel32")]
unsafe extern "system" {
    fn SetConsoleOutputCP(wCodePageID: u32) -> i32;
}

#[cfg(windows)]
fn enable_windows_utf8_console() {
    unsafe {
        SetConsoleOutputCP(65001);
    }
}

#[cfg(not(windows))]
fn enable_windows_utf8_console() {}

#[derive(Parser)]
#[command(name = "incbuild")]
#[command(about = "Incremental build driver for C++ projects", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// Build profile: debug or release [default: debug]
    profile: Option<Profile>,
    /// Project description to build from
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,
    /// Show staleness decisions and every command
    #[arg(short, long)]
    verbose: bool,
    /// Show what would be executed without running or creating anything
    #[arg(long)]
    dry_run: bool,
    /// Parallel compile jobs (1 compiles sequentially) [default: one per core]
    #[arg(short, long)]
    jobs: Option<NonZeroUsize>,
    /// Write compile_commands.json next to the config file
    #[arg(long)]
    compile_commands: bool,
}

fn main() -> Result<()> {
    enable_windows_utf8_console();

    let cli = Cli::parse();
    let profile = cli.profile.unwrap_or_default();

    let project = config::load_config(&cli.config)?;
    let root = config::project_root(&cli.config);
    let resolved = project.resolve(&root, profile);

    let options = BuildOptions {
        verbose: cli.verbose,
        dry_run: cli.dry_run,
        jobs: cli.jobs,
        compile_commands: cli.compile_commands,
    };

    let report = build::build_project(&resolved, &options, &ProcessInvoker)?;
    if let Err(e) = report.into_result() {
        println!("{} {}", "x".red(), e);
        std::process::exit(1);
    }
    Ok(())
}
