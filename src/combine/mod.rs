//! Aggregation of scanned files into a single combined file.
//!
//! Each included file becomes one marker block:
//!
//! ```text
//! \n--- START FILE: <relative_path> ---\n\n<content>\n\n--- END FILE: <relative_path> ---\n
//! ```
//!
//! Blocks are concatenated in discovery order and written with one write
//! at the end of the run.

use crate::error::{CombineError, Result};
use crate::models::{CombineSummary, FileOutcome, OutcomeCounts};
use crate::scanner::{ExclusionSet, FileScanner, ScannedFile};
use chrono::Utc;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Output file name used when none is given.
pub const DEFAULT_OUTPUT_FILENAME: &str = "combined_project_files.txt";

/// Options for one combine run.
#[derive(Debug, Clone)]
pub struct CombineOptions {
    /// Names skipped during traversal.
    pub exclusions: ExclusionSet,
    /// Output file name, created inside the root.
    pub output_filename: String,
    /// Walk and classify files without writing the output.
    pub dry_run: bool,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            exclusions: ExclusionSet::default(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            dry_run: false,
        }
    }
}

/// Combined content plus the outcome of every file encountered.
#[derive(Debug, Clone, Default)]
pub struct Combined {
    pub content: String,
    pub outcomes: Vec<FileOutcome>,
}

/// Start marker line (with surrounding newlines) for a file.
pub fn start_marker(relative_path: &str) -> String {
    format!("\n--- START FILE: {} ---\n\n", relative_path)
}

/// End marker line (with surrounding newlines) for a file.
pub fn end_marker(relative_path: &str) -> String {
    format!("\n\n--- END FILE: {} ---\n", relative_path)
}

/// Check that an output name is a single plain file name, so the output
/// always lands directly in the root and is skipped on later runs.
pub fn validate_output_filename(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let is_plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if name.trim().is_empty() || !is_plain || name.contains('/') || name.contains('\\') {
        return Err(CombineError::InvalidOutputName(name.to_string()));
    }
    Ok(())
}

/// Combine `root_dir` into `<root_dir>/<output_filename>` using the
/// default exclusions.
pub fn aggregate(root_dir: &Path, output_filename: &str) -> Result<CombineSummary> {
    let options = CombineOptions {
        output_filename: output_filename.to_string(),
        ..CombineOptions::default()
    };
    Aggregator::new(options).run(root_dir)
}

/// Walks a root, reads each non-excluded file and writes the combined output.
pub struct Aggregator {
    options: CombineOptions,
}

impl Aggregator {
    pub fn new(options: CombineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CombineOptions {
        &self.options
    }

    /// Where the output lands for a given root.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.options.output_filename)
    }

    /// Run a full combine: walk, read, then write the output once.
    ///
    /// Per-file problems are logged and recorded in the summary. Only an
    /// invalid output name, an unusable root or a failed output write
    /// returns an error.
    pub fn run(&self, root: &Path) -> Result<CombineSummary> {
        validate_output_filename(&self.options.output_filename)?;

        let started_at = Utc::now();
        let start_time = Instant::now();
        let output_path = self.output_path(root);

        info!("Starting to combine files from: {}", root.display());
        info!("Excluding directories: {:?}", self.options.exclusions.dirs());
        info!("Excluding files: {:?}", self.options.exclusions.files());

        let combined = self.collect(root)?;

        let written = if self.options.dry_run {
            debug!("Dry run: not writing {}", output_path.display());
            false
        } else {
            write_output(&output_path, &combined.content)?;
            true
        };

        Ok(CombineSummary {
            root: root.display().to_string(),
            output_path: output_path.display().to_string(),
            written,
            started_at,
            duration_seconds: start_time.elapsed().as_secs_f64(),
            counts: OutcomeCounts::from_outcomes(&combined.outcomes),
            files: combined.outcomes,
        })
    }

    /// Walk `root` and build the combined content in memory.
    ///
    /// The output file of a previous run is skipped so it never becomes
    /// part of its own input.
    pub fn collect(&self, root: &Path) -> Result<Combined> {
        validate_output_filename(&self.options.output_filename)?;

        let scanner = FileScanner::new(root.to_path_buf(), self.options.exclusions.clone())
            .with_skip_file(self.output_path(root));

        let mut combined = Combined::default();
        for file in scanner.scan()? {
            let outcome = append_file(&mut combined.content, &file);
            combined.outcomes.push(outcome);
        }

        Ok(combined)
    }
}

/// Read one scanned file and append its marker block to `buffer`.
///
/// The buffer is only touched when the file reads and decodes cleanly.
fn append_file(buffer: &mut String, file: &ScannedFile) -> FileOutcome {
    let rel = &file.relative_path;

    if file.excluded {
        info!("Skipping excluded file: {}", file.path.display());
        return FileOutcome::excluded(rel.clone());
    }

    match read_text(&file.path, rel) {
        Ok(content) => {
            buffer.push_str(&start_marker(rel));
            buffer.push_str(&content);
            buffer.push_str(&end_marker(rel));
            info!("Included file: {}", rel);
            FileOutcome::included(rel.clone(), content.len())
        }
        Err(CombineError::Decode { .. }) => {
            info!("Skipping binary or undecodable file: {}", rel);
            FileOutcome::undecodable(rel.clone())
        }
        Err(e) => {
            warn!("{}", e);
            let detail = match e {
                CombineError::Read { source, .. } => source.to_string(),
                other => other.to_string(),
            };
            FileOutcome::read_failed(rel.clone(), detail)
        }
    }
}

/// Read a file fully and decode it as UTF-8.
fn read_text(path: &Path, rel: &str) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| CombineError::Read {
        path: rel.to_string(),
        source,
    })?;

    String::from_utf8(bytes).map_err(|_| CombineError::Decode {
        path: rel.to_string(),
    })
}

/// Write the combined content in a single write, replacing any existing file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| CombineError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
