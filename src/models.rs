//! Data models for a combine run.
//!
//! This module contains the per-file outcomes and the run summary
//! produced by the aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to a single file during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Content was appended to the output buffer.
    Included,
    /// File name is in the excluded-files set (or is the output file).
    Excluded,
    /// Content is not valid UTF-8; treated as binary.
    Undecodable,
    /// Opening or reading the file failed.
    ReadFailed,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutcomeKind::Included => write!(f, "Included"),
            OutcomeKind::Excluded => write!(f, "Excluded"),
            OutcomeKind::Undecodable => write!(f, "Undecodable"),
            OutcomeKind::ReadFailed => write!(f, "Read failed"),
        }
    }
}

impl OutcomeKind {
    /// Returns an emoji representation of the outcome.
    pub fn emoji(&self) -> &'static str {
        match self {
            OutcomeKind::Included => "📄",
            OutcomeKind::Excluded => "🚫",
            OutcomeKind::Undecodable => "🧱",
            OutcomeKind::ReadFailed => "⚠️",
        }
    }

    /// Whether the file made it into the output.
    pub fn is_included(&self) -> bool {
        matches!(self, OutcomeKind::Included)
    }
}

/// Outcome of one file encountered during the walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Path relative to the root, as written in the markers.
    pub path: String,
    /// What happened to the file.
    pub kind: OutcomeKind,
    /// Size of the included content in bytes (0 when skipped).
    pub bytes: usize,
    /// Error detail for read failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn included(path: String, bytes: usize) -> Self {
        Self {
            path,
            kind: OutcomeKind::Included,
            bytes,
            error: None,
        }
    }

    pub fn excluded(path: String) -> Self {
        Self {
            path,
            kind: OutcomeKind::Excluded,
            bytes: 0,
            error: None,
        }
    }

    pub fn undecodable(path: String) -> Self {
        Self {
            path,
            kind: OutcomeKind::Undecodable,
            bytes: 0,
            error: None,
        }
    }

    pub fn read_failed(path: String, error: String) -> Self {
        Self {
            path,
            kind: OutcomeKind::ReadFailed,
            bytes: 0,
            error: Some(error),
        }
    }
}

/// Counts of outcomes for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    /// Total number of files encountered.
    pub total: usize,
    pub included: usize,
    pub excluded: usize,
    pub undecodable: usize,
    pub read_failed: usize,
    /// Bytes of file content written between markers.
    pub included_bytes: usize,
}

impl OutcomeCounts {
    /// Creates counts from a list of outcomes.
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        let mut counts = Self {
            total: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            match outcome.kind {
                OutcomeKind::Included => {
                    counts.included += 1;
                    counts.included_bytes += outcome.bytes;
                }
                OutcomeKind::Excluded => counts.excluded += 1,
                OutcomeKind::Undecodable => counts.undecodable += 1,
                OutcomeKind::ReadFailed => counts.read_failed += 1,
            }
        }

        counts
    }

    /// Number of files skipped for any reason.
    pub fn skipped(&self) -> usize {
        self.excluded + self.undecodable + self.read_failed
    }
}

/// Summary of a complete combine run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombineSummary {
    /// Root directory that was walked.
    pub root: String,
    /// Path of the written output file.
    pub output_path: String,
    /// Whether the output file was written (false for dry runs).
    pub written: bool,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Duration of the run in seconds.
    pub duration_seconds: f64,
    /// Outcome counts.
    pub counts: OutcomeCounts,
    /// Every file encountered, in discovery order.
    pub files: Vec<FileOutcome>,
}

impl CombineSummary {
    /// Relative paths of the included files, in output order.
    pub fn included_paths(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|f| f.kind.is_included())
            .map(|f| f.path.as_str())
            .collect()
    }

    /// Outcomes of a single kind.
    pub fn files_of_kind(&self, kind: OutcomeKind) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(move |f| f.kind == kind)
    }
}
