// Declare modules
pub mod cli;
pub mod config;
pub mod filter;
pub mod formatter;
pub mod models;
pub mod paths;
pub mod reader;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::OutputGenerator;
use self::models::{CollectConfig, RunSummary};
use self::paths::{program_dir, validate_target};
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Identify project name for preset auto-detection
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let project_name = current_dir.file_name().and_then(|n| n.to_str());

    // 3. Resolve Configuration
    let base_dir = program_dir()?;
    let mut config = resolve_config(args, project_name, &base_dir)?;

    // 4. Validate target before anything is written
    validate_target(&config.target_dir)?;
    config.target_dir = fs::canonicalize(&config.target_dir)
        .context(format!("Failed to resolve {:?}", config.target_dir))?;
    config.output_file = canonical_output(&config.output_file);

    println!("Scanning directory: {}", config.target_dir.display());
    println!("Output file: {}", config.output_file.display());
    println!();

    // 5. Collect
    let summary = collect(&config)?;

    println!("✓ Files collected: {}", summary.collected);
    println!("✓ Files skipped: {}", summary.skipped);
    println!("✓ Result saved to: {}", summary.output_file.display());

    Ok(())
}

/// Scans the target and writes the consolidated document, replacing any existing file.
pub fn collect(config: &CollectConfig) -> Result<RunSummary> {
    let scan = Scanner::new(config).scan();
    log::info!(
        "{} collected, {} skipped, {} excluded directories",
        scan.collected.len(),
        scan.skipped.len(),
        scan.excluded_dirs.len()
    );

    let file = File::create(&config.output_file)
        .context(format!("Failed to create {:?}", config.output_file))?;
    let mut writer = BufWriter::new(file);

    OutputGenerator::new(config)
        .write(&scan, &mut writer)
        .context(format!("Failed to write {:?}", config.output_file))?;
    writer
        .flush()
        .context(format!("Failed to write {:?}", config.output_file))?;

    Ok(RunSummary {
        collected: scan.collected.len(),
        skipped: scan.skipped.len(),
        output_file: config.output_file.clone(),
    })
}

/// Canonical parent joined with the file name, so the scanner can recognize
/// the output file inside the target tree. Falls back to the path as given.
fn canonical_output(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|p| p.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}
