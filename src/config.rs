//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.filecombine.toml` files.

use crate::combine::{validate_output_filename, CombineOptions, DEFAULT_OUTPUT_FILENAME};
use crate::scanner::{ExclusionSet, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_FILES};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working and root directories.
pub const CONFIG_FILENAME: &str = ".filecombine.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Exclusion settings.
    #[serde(default)]
    pub exclusions: ExclusionsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output file name, created inside the root directory.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    DEFAULT_OUTPUT_FILENAME.to_string()
}

/// Names skipped during traversal. Matched exactly, not as patterns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExclusionsConfig {
    /// Directory names never descended into.
    #[serde(default = "default_dirs")]
    pub dirs: Vec<String>,

    /// File names never read.
    #[serde(default = "default_files")]
    pub files: Vec<String>,
}

impl Default for ExclusionsConfig {
    fn default() -> Self {
        Self {
            dirs: default_dirs(),
            files: default_files(),
        }
    }
}

fn default_dirs() -> Vec<String> {
    DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_files() -> Vec<String> {
    DEFAULT_EXCLUDED_FILES.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the current directory.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_root(Path::new("."))
    }

    /// Try to load configuration from the directory being combined.
    pub fn load_from_root(root: &Path) -> Result<Option<Self>> {
        let config_path = root.join(CONFIG_FILENAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.clone();
        }

        // Lists replace, they don't extend
        if let Some(ref dirs) = args.exclude_dirs {
            self.exclusions.dirs = dirs.clone();
        }
        if let Some(ref files) = args.exclude_files {
            self.exclusions.files = files.clone();
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Build the exclusion set described by this configuration.
    pub fn exclusion_set(&self) -> ExclusionSet {
        ExclusionSet::new(
            self.exclusions.dirs.iter().cloned(),
            self.exclusions.files.iter().cloned(),
        )
    }

    /// Build the aggregator options described by this configuration.
    ///
    /// Fails if the configured output is not a plain file name.
    pub fn combine_options(&self, dry_run: bool) -> Result<CombineOptions> {
        validate_output_filename(&self.general.output)
            .context("Invalid [general] output setting")?;

        Ok(CombineOptions {
            exclusions: self.exclusion_set(),
            output_filename: self.general.output.clone(),
            dry_run,
        })
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
