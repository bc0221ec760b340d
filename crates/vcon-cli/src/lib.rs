//! vCon CLI library - argument parsing, configuration, and output
//! formatting for the `vcon` binary.
//!
//! The binary reads a conversation record as JSON (file or stdin), runs the
//! phase-1 transformation, optionally merges a phase-2 analysis payload
//! file, and writes the resulting document to a file, a directory
//! (auto-named), or stdout. All transformation logic lives in
//! `vcon-generator`; this crate is the thin I/O collaborator around it.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat};
pub use config::{Config, OutputFormat, Settings};
pub use error::{CliError, Result};
pub use output::Formatter;
