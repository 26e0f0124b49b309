//! `license-scanner` — classify the licenses declared by Python package metadata.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Validate the input/output directories (usage errors exit `2`).
//! 3. Acquire package metadata: PyPI (`--package`, [`registry`]), a metadata
//!    directory (`-i`), or an installed environment ([`scanner`]).
//! 4. Classify each package ([`license`], [`models`]).
//! 5. Persist oversized license texts ([`store`], `-o`).
//! 6. Render the requested report ([`report`]).
//! 7. Exit `0` (clean), `2` (usage error), or `1` (runtime failure).

mod cli;
mod license;
mod models;
mod registry;
mod report;
mod scanner;
mod store;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::{Cli, ReportFormat};
use models::PackageLicenses;
use store::LicenseStore;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "ERROR:".red().bold());
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // Unusable directories are argument errors, same exit code as clap's.
    if let Some(dir) = &cli.input_directory {
        if !dir.is_dir() {
            eprintln!(
                "{} invalid input directory: {}",
                "ERROR:".red().bold(),
                dir.display()
            );
            return Ok(ExitCode::from(2));
        }
    }

    let store = match &cli.output_directory {
        Some(dir) => match LicenseStore::create(dir) {
            Ok(store) => Some(store),
            Err(err) => {
                eprintln!("{} invalid output directory: {err:#}", "ERROR:".red().bold());
                return Ok(ExitCode::from(2));
            }
        },
        None => None,
    };

    let packages = if !cli.packages.is_empty() {
        if !cli.quiet {
            eprintln!(
                "  {} fetching {} package(s) from PyPI",
                "→".cyan(),
                cli.packages.len()
            );
        }
        registry::pypi::fetch_packages(&cli.packages, cli.quiet).await?
    } else if let Some(dir) = &cli.input_directory {
        scanner::directory::scan_directory(dir)?
    } else {
        let site = cli
            .site_packages
            .clone()
            .or_else(scanner::site_packages::discover_site_packages);
        let Some(site) = site.filter(|dir| dir.is_dir()) else {
            eprintln!(
                "{} no site-packages directory found; pass --input-directory, --package, or --site-packages",
                "ERROR:".red().bold()
            );
            return Ok(ExitCode::from(2));
        };
        if !cli.quiet {
            eprintln!("  {} scanning {}", "→".cyan(), site.display());
        }
        scanner::site_packages::scan_site_packages(&site)?
    };

    if let Some(store) = &store {
        persist_license_files(&packages, store)?;
    }

    let records = report::records(&packages);
    match cli.report {
        ReportFormat::Json => println!("{}", report::render_json(&records)?),
        ReportFormat::Terminal => report::terminal::render(&records, cli.quiet)?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Hand every fingerprinted finding's original free-text license to the
/// store, keyed by digest.
fn persist_license_files(packages: &[PackageLicenses], store: &LicenseStore) -> Result<()> {
    for package in packages {
        for finding in package.licenses() {
            if let (Some(digest), Some(text)) = (
                finding.text.strip_prefix("sha256:"),
                package.license.as_deref(),
            ) {
                store.save(digest, text)?;
            }
        }
    }
    Ok(())
}
