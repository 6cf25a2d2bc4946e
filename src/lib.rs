//! filecombine - concatenate a project's text files into one file.
//!
//! Walks a root directory, skips excluded directories and file names,
//! and writes every remaining UTF-8 file into `<root>/<output_filename>`
//! wrapped in START/END markers.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let summary = filecombine::aggregate(Path::new("."), filecombine::DEFAULT_OUTPUT_FILENAME)?;
//! println!("{} files combined", summary.counts.included);
//! # Ok::<(), filecombine::CombineError>(())
//! ```

pub mod cli;
pub mod combine;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scanner;

pub use combine::{aggregate, Aggregator, CombineOptions, DEFAULT_OUTPUT_FILENAME};
pub use error::{CombineError, Result};
pub use models::{CombineSummary, FileOutcome, OutcomeKind};
pub use scanner::{ExclusionSet, FileScanner};
