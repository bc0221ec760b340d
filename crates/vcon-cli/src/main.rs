//! vCon CLI - Convert conversation records to vCon documents.

use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vcon_cli::{Cli, CliError, Config, Formatter, Result};
use vcon_generator::{AnalysisInput, ConversationInput, VconGenerator};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let color_flag = !cli.no_color;
    if let Err(e) = run(cli) {
        let formatter = Formatter::new(vcon_cli::OutputFormat::Pretty, color_flag);
        eprintln!("{}", formatter.error(&e.to_string()));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Load or create config
    let config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    // Phase 1: read and transform the conversation record
    let input: ConversationInput = serde_json::from_str(&read_input(cli.input.as_deref())?)?;
    let mut generator = VconGenerator::new();
    generator.generate_base(&input)?;

    // Phase 2: merge the analysis payload when one was given
    if let Some(path) = &cli.analysis {
        let payload: AnalysisInput = serde_json::from_str(&fs::read_to_string(path)?)?;
        generator.add_analysis(&payload)?;
    }

    let document = generator
        .document()
        .ok_or_else(|| CliError::InvalidInput("no document was generated".into()))?;
    let rendered = formatter.render(document)?;

    match cli.output {
        Some(target) => {
            let path = resolve_output_path(&target, document);
            fs::write(&path, &rendered)?;
            eprintln!("{}", formatter.success(&format!("Wrote {}", path.display())));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Read the record from the input file, or stdin when none was given
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// A directory target gets the document's standardized filename
fn resolve_output_path(target: &Path, document: &vcon_domain::VconDocument) -> PathBuf {
    if target.is_dir() {
        target.join(document.suggested_filename())
    } else {
        target.to_path_buf()
    }
}
