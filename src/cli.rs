use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "license-scanner",
    about = "Scan Python package metadata and classify declared licenses",
    version
)]
pub struct Cli {
    /// Directory of package metadata JSON files to scan
    #[arg(short, long, value_name = "DIR")]
    pub input_directory: Option<PathBuf>,

    /// Directory to store license texts embedded in metadata
    #[arg(short, long, value_name = "DIR")]
    pub output_directory: Option<PathBuf>,

    /// Classify a package from PyPI instead of scanning locally (repeatable)
    #[arg(short, long = "package", value_name = "NAME")]
    pub packages: Vec<String>,

    /// Python site-packages directory to scan for installed distributions
    /// [default: discovered from $VIRTUAL_ENV or ./.venv]
    #[arg(long, value_name = "DIR")]
    pub site_packages: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "json", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Json,
    Terminal,
}
