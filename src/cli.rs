//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::combine::validate_output_filename;
use clap::Parser;
use std::path::PathBuf;

/// filecombine - concatenate a project's text files into one file
///
/// Walks ROOT (default: the current directory), skips dependency caches,
/// VCS metadata, lockfiles and secrets, and writes every remaining text
/// file into a single file inside ROOT, each wrapped in START/END markers.
///
/// Examples:
///   filecombine
///   filecombine ./my-project -o context.txt
///   filecombine --exclude-dirs node_modules,.git,target --dry-run
///   filecombine --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Root directory to combine
    ///
    /// Defaults to the current working directory.
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Output file name, created inside ROOT
    ///
    /// Default: from config or combined_project_files.txt.
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .filecombine.toml in the current
    /// directory, then in ROOT
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory names to skip (comma-separated, replaces the defaults)
    ///
    /// Example: --exclude-dirs node_modules,.git,target
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub exclude_dirs: Option<Vec<String>>,

    /// File names to skip (comma-separated, replaces the defaults)
    ///
    /// Example: --exclude-files Cargo.lock,.env
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub exclude_files: Option<Vec<String>>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (only errors and the final line)
    #[arg(short, long)]
    pub quiet: bool,

    /// Scan and classify files without writing the output
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Generate a default .filecombine.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The root directory to walk.
    pub fn root_dir(&self) -> std::io::Result<PathBuf> {
        match self.root {
            Some(ref root) => Ok(root.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref output) = self.output {
            validate_output_name(output)?;
        }

        if let Some(ref root) = self.root {
            if !root.exists() {
                return Err(format!("Root directory does not exist: {}", root.display()));
            }
            if !root.is_dir() {
                return Err(format!("Root path is not a directory: {}", root.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// The output must be a plain file name so it always lands directly in ROOT.
pub fn validate_output_name(name: &str) -> Result<(), String> {
    validate_output_filename(name).map_err(|e| e.to_string())
}
