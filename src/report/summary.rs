//! Summary rendering.
//!
//! Turns a `CombineSummary` into the text printed at the end of a run,
//! the file listing shown by a dry run, or JSON.

use crate::models::{CombineSummary, OutcomeKind};
use anyhow::Result;

/// Generate the end-of-run summary text.
pub fn generate_summary_text(summary: &CombineSummary) -> String {
    let counts = &summary.counts;
    let mut lines = Vec::new();

    lines.push(format!("Files seen: {}", counts.total));
    lines.push(format!(
        "- {} Included: {} ({} bytes)",
        OutcomeKind::Included.emoji(),
        counts.included,
        counts.included_bytes
    ));
    lines.push(format!(
        "- {} Excluded: {}",
        OutcomeKind::Excluded.emoji(),
        counts.excluded
    ));
    lines.push(format!(
        "- {} Undecodable: {}",
        OutcomeKind::Undecodable.emoji(),
        counts.undecodable
    ));
    lines.push(format!(
        "- {} Read errors: {}",
        OutcomeKind::ReadFailed.emoji(),
        counts.read_failed
    ));

    let failures: Vec<_> = summary.files_of_kind(OutcomeKind::ReadFailed).collect();
    if !failures.is_empty() {
        lines.push(String::new());
        lines.push("Read errors:".to_string());
        for failure in failures {
            lines.push(format!(
                "- {}: {}",
                failure.path,
                failure.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    lines.push(format!("Duration: {:.2}s", summary.duration_seconds));

    lines.join("\n")
}

/// List the files a dry run would include.
pub fn generate_dry_run_listing(summary: &CombineSummary) -> String {
    let included = summary.included_paths();

    if included.is_empty() {
        return "No files would be included.".to_string();
    }

    let mut lines = vec![format!("{} files would be included:", included.len())];
    for file in summary.files_of_kind(OutcomeKind::Included) {
        lines.push(format!(
            "  {} {} ({} bytes)",
            OutcomeKind::Included.emoji(),
            file.path,
            file.bytes
        ));
    }

    lines.join("\n")
}

/// Generate a JSON summary.
pub fn generate_json_summary(summary: &CombineSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileOutcome, OutcomeCounts};
    use chrono::Utc;

    fn create_test_summary() -> CombineSummary {
        let files = vec![
            FileOutcome::included("src/main.rs".to_string(), 42),
            FileOutcome::excluded("package-lock.json".to_string()),
            FileOutcome::undecodable("logo.png".to_string()),
            FileOutcome::read_failed("private.key".to_string(), "Permission denied".to_string()),
        ];

        CombineSummary {
            root: "/work/project".to_string(),
            output_path: "/work/project/combined_project_files.txt".to_string(),
            written: true,
            started_at: Utc::now(),
            duration_seconds: 0.25,
            counts: OutcomeCounts::from_outcomes(&files),
            files,
        }
    }

    #[test]
    fn test_generate_summary_text() {
        let text = generate_summary_text(&create_test_summary());

        assert!(text.contains("Files seen: 4"));
        assert!(text.contains("Included: 1 (42 bytes)"));
        assert!(text.contains("Excluded: 1"));
        assert!(text.contains("Undecodable: 1"));
        assert!(text.contains("private.key: Permission denied"));
    }

    #[test]
    fn test_dry_run_listing() {
        let listing = generate_dry_run_listing(&create_test_summary());
        assert!(listing.starts_with("1 files would be included:"));
        assert!(listing.contains("src/main.rs (42 bytes)"));
        assert!(!listing.contains("logo.png"));
    }

    #[test]
    fn test_dry_run_listing_empty() {
        let mut summary = create_test_summary();
        summary.files.retain(|f| !f.kind.is_included());
        assert_eq!(generate_dry_run_listing(&summary), "No files would be included.");
    }

    #[test]
    fn test_generate_json_summary() {
        let json = generate_json_summary(&create_test_summary()).unwrap();

        assert!(json.contains("\"output_path\""));
        assert!(json.contains("\"read_failed\""));
        assert!(json.contains("\"included_bytes\": 42"));
    }
}
