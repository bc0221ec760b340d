//! CLI argument definitions and parsing.

use clap::Parser;
use std::path::PathBuf;

/// vCon CLI - Convert conversation records to vCon documents.
#[derive(Debug, Parser)]
#[command(name = "vcon")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input JSON file (reads standard input when omitted)
    pub input: Option<PathBuf>,

    /// Analysis payload JSON file to merge (phase 2)
    #[arg(short, long)]
    pub analysis: Option<PathBuf>,

    /// Output file, or a directory for an auto-named file
    /// (writes standard output when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored status messages
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Pretty-printed JSON (default)
    Pretty,
    /// Compact single-line JSON
    Compact,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Pretty => crate::config::OutputFormat::Pretty,
            CliFormat::Compact => crate::config::OutputFormat::Compact,
        }
    }
}
