//! filecombine - concatenate a project's text files into one file
//!
//! Run with no arguments to combine the current directory into
//! `combined_project_files.txt`.
//!
//! Exit codes:
//!   0 - Success (output written, or dry run complete)
//!   1 - Fatal error (bad arguments, config, unusable root, output write failure)

use anyhow::{Context, Result};
use filecombine::cli::Args;
use filecombine::config::{Config, CONFIG_FILENAME};
use filecombine::{report, Aggregator};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    let root = match args.root_dir() {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error: Failed to determine the current directory: {}", e);
            std::process::exit(1);
        }
    };

    // Config is loaded before logging so its verbose flag can set the level
    let (config, config_source) = match load_config(&args, &root) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&args, &config);

    debug!("filecombine v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match config_source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }

    match run(&args, &root, config) {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .filecombine.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILENAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILENAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILENAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILENAME);
    println!("   Edit it to customize the output name and excluded names.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_logging(args: &Args, config: &Config) {
    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Combine the root and print the outcome.
fn run(args: &Args, root: &Path, mut config: Config) -> Result<()> {
    config.merge_with_args(args);

    let aggregator = Aggregator::new(config.combine_options(args.dry_run)?);
    let output_path = aggregator.output_path(root);

    let summary = aggregator.run(root)?;

    if args.json {
        println!("{}", report::generate_json_summary(&summary)?);
        if summary.written {
            eprintln!("✅ Successfully combined all files into: {}", output_path.display());
        } else {
            eprintln!("✅ Dry run complete. Nothing was written.");
        }
        return Ok(());
    }

    if !args.quiet {
        println!("\n📊 {}", report::generate_summary_text(&summary));
    }

    if args.dry_run {
        println!("\n🔍 {}", report::generate_dry_run_listing(&summary));
        println!("\n✅ Dry run complete. Nothing was written.");
    } else {
        println!(
            "\n✅ Successfully combined all files into: {}",
            output_path.display()
        );
    }

    Ok(())
}

/// Load configuration: explicit path, then the working directory, then the root.
///
/// Returns the config and the file it came from, if any. A config file that
/// exists but can't be parsed is an error.
fn load_config(args: &Args, root: &Path) -> Result<(Config, Option<PathBuf>)> {
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, Some(config_path.clone())));
    }

    if let Some(config) = Config::load_default()? {
        return Ok((config, Some(PathBuf::from(CONFIG_FILENAME))));
    }

    match Config::load_from_root(root)? {
        Some(config) => Ok((config, Some(root.join(CONFIG_FILENAME)))),
        None => Ok((Config::default(), None)),
    }
}
