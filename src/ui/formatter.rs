//! Pure formatting functions for UI output.
//!
//! `format_*` functions build the text and are unit tested; `display_*`
//! functions print it with styling from `console`.

use console::style;

use crate::domain::CommitInfo;
use crate::updater::{Preview, UpdateReport};
use crate::warning::UpdateWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a non-fatal warning to stderr.
pub fn display_warning(warning: &UpdateWarning) {
    eprintln!("{} {}", style("WARNING:").yellow().bold(), warning);
}

pub fn format_commit_info(commit: &CommitInfo) -> String {
    match &commit.date {
        Some(date) => format!("Latest commit {} ({})", commit.short_hash(), date),
        None => format!("Latest commit {}", commit.short_hash()),
    }
}

/// Display the commit the manifest is being synchronized to.
pub fn display_commit_info(commit: &CommitInfo) {
    display_status(&format_commit_info(commit));
}

/// One line per rule, e.g. `Commit/Revision: 1 line(s) updated`.
pub fn format_outcomes(report: &UpdateReport) -> Vec<String> {
    report
        .outcomes
        .iter()
        .map(|outcome| format!("{}: {} line(s) updated", outcome.labels, outcome.replaced))
        .collect()
}

/// Display the outcome of a completed update, warnings first.
pub fn display_report(report: &UpdateReport, manifest: &str) {
    for warning in &report.warnings {
        display_warning(warning);
    }
    for line in format_outcomes(report) {
        println!("  {}", line);
    }
    if report.changed {
        display_success(&format!("Updated {}", manifest));
    } else {
        display_success(&format!("{} already up to date", manifest));
    }
}

/// Lines of `after` that differ from `before`, paired by position.
///
/// Substitution never adds or removes lines, so a positional pairing is
/// exact.
pub fn changed_lines<'a>(before: &'a str, after: &'a str) -> Vec<(&'a str, &'a str)> {
    before
        .lines()
        .zip(after.lines())
        .filter(|(old, new)| old != new)
        .collect()
}

/// Display a dry-run rewrite as removed/added line pairs.
///
/// Bytes that are not UTF-8 are shown lossily.
pub fn display_preview(preview: &Preview, manifest: &str) {
    for warning in &preview.report.warnings {
        display_warning(warning);
    }

    let before = String::from_utf8_lossy(&preview.original);
    let after = String::from_utf8_lossy(&preview.text);
    let changes = changed_lines(&before, &after);
    if changes.is_empty() {
        display_success(&format!("Dry run: {} already up to date", manifest));
        return;
    }

    display_status(&format!("Dry run: would update {}", manifest));
    for (old, new) in changes {
        println!("  {}", style(format!("- {}", old)).red());
        println!("  {}", style(format!("+ {}", new)).green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RuleOutcome;

    const HASH: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn test_format_commit_info_with_date() {
        let commit = CommitInfo {
            date: Some("Tue Nov 14 2023".to_string()),
            hash: HASH.to_string(),
        };
        assert_eq!(
            format_commit_info(&commit),
            "Latest commit 0123456 (Tue Nov 14 2023)"
        );
    }

    #[test]
    fn test_format_commit_info_hash_only() {
        let commit = CommitInfo {
            date: None,
            hash: HASH.to_string(),
        };
        assert_eq!(format_commit_info(&commit), "Latest commit 0123456");
    }

    #[test]
    fn test_format_outcomes() {
        let report = UpdateReport {
            commit: CommitInfo {
                date: None,
                hash: HASH.to_string(),
            },
            outcomes: vec![RuleOutcome {
                labels: "Commit/Revision".to_string(),
                replaced: 1,
            }],
            warnings: vec![],
            changed: true,
        };
        assert_eq!(
            format_outcomes(&report),
            vec!["Commit/Revision: 1 line(s) updated".to_string()]
        );
    }

    #[test]
    fn test_changed_lines() {
        let before = "Name: a\nDate: old\nLicense: MIT\n";
        let after = "Name: a\nDate: new\nLicense: MIT\n";
        assert_eq!(changed_lines(before, after), vec![("Date: old", "Date: new")]);
        assert!(changed_lines(before, before).is_empty());
    }
}
