use regex::bytes::{Captures, Regex};

use crate::config::ManifestConfig;
use crate::domain::CommitInfo;
use crate::error::Result;
use crate::warning::UpdateWarning;

/// Value pattern for free-form fields: the rest of the line, any bytes.
pub const REST_OF_LINE: &str = r"(?-u:[^\r\n]*)";

/// Rewrites the value of `Label: value` lines.
///
/// A line matches when it starts (after optional blanks) with one of the
/// labels, a colon and optional blanks, and the value that follows matches
/// `value_pattern`. Only the matched value is replaced; the label and its
/// separator are kept as they were. The manifest is handled as raw bytes,
/// so content outside the rewritten values need not be UTF-8.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    labels: Vec<String>,
    replacement: String,
    line: Regex,
    label_line: Regex,
}

impl SubstitutionRule {
    pub fn new(
        labels: &[String],
        value_pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self> {
        let alternatives = labels
            .iter()
            .map(|label| regex::escape(label))
            .collect::<Vec<_>>()
            .join("|");

        let line = Regex::new(&format!(
            r"(?m)^([ \t]*(?:{}):[ \t]*)(?:{})",
            alternatives, value_pattern
        ))?;
        let label_line = Regex::new(&format!(
            r"(?m)^[ \t]*(?:{}):{}",
            alternatives, REST_OF_LINE
        ))?;

        Ok(SubstitutionRule {
            labels: labels.to_vec(),
            replacement: replacement.into(),
            line,
            label_line,
        })
    }

    /// Labels joined for display, e.g. `Commit/Revision`
    pub fn label_names(&self) -> String {
        self.labels.join("/")
    }

    /// Apply the rule to `text`, returning the new bytes and the number of
    /// lines rewritten.
    pub fn apply(&self, text: &[u8]) -> (Vec<u8>, usize) {
        let count = self.line.find_iter(text).count();
        if count == 0 {
            return (text.to_vec(), 0);
        }
        let rewritten = self.line.replace_all(text, |caps: &Captures| {
            let mut value = caps[1].to_vec();
            value.extend_from_slice(self.replacement.as_bytes());
            value
        });
        (rewritten.into_owned(), count)
    }

    /// Lines carrying one of the labels whose value the rule does not accept.
    fn unrecognized_lines(&self, text: &[u8]) -> Vec<String> {
        self.label_line
            .find_iter(text)
            .map(|m| m.as_bytes())
            .filter(|line| !self.line.is_match(line))
            .map(|line| String::from_utf8_lossy(line).trim().to_string())
            .collect()
    }

    fn has_label_line(&self, text: &[u8]) -> bool {
        self.label_line.is_match(text)
    }
}

/// Per-rule result of a rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub labels: String,
    pub replaced: usize,
}

/// Rewritten manifest bytes and what happened to them
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteResult {
    pub text: Vec<u8>,
    /// Whether `text` differs from the input
    pub changed: bool,
    pub outcomes: Vec<RuleOutcome>,
    pub warnings: Vec<UpdateWarning>,
}

impl RewriteResult {
    pub fn total_replaced(&self) -> usize {
        self.outcomes.iter().map(|o| o.replaced).sum()
    }
}

/// Build the rules for a commit: the date rule (when the date was queried)
/// followed by the hash rule.
pub fn rules_for(
    commit: &CommitInfo,
    manifest: &ManifestConfig,
) -> Result<Vec<SubstitutionRule>> {
    let mut rules = Vec::with_capacity(2);
    if let Some(date) = &commit.date {
        rules.push(SubstitutionRule::new(
            &manifest.date_labels,
            REST_OF_LINE,
            date.clone(),
        )?);
    }
    rules.push(SubstitutionRule::new(
        &manifest.hash_labels,
        &manifest.hash_pattern,
        commit.hash.clone(),
    )?);
    Ok(rules)
}

/// Apply `rules` in order to `text`.
///
/// Warnings are computed against the original text, so they describe the
/// manifest as it was found.
pub fn apply_rules(text: &[u8], rules: &[SubstitutionRule]) -> RewriteResult {
    let mut current = text.to_vec();
    let mut outcomes = Vec::with_capacity(rules.len());
    let mut warnings = Vec::new();

    for rule in rules {
        if !rule.has_label_line(text) {
            warnings.push(UpdateWarning::LabelNotFound {
                labels: rule.label_names(),
            });
        }
        for label_line in rule.unrecognized_lines(text) {
            warnings.push(UpdateWarning::ValueNotRecognized { label_line });
        }

        let (next, replaced) = rule.apply(&current);
        current = next;
        outcomes.push(RuleOutcome {
            labels: rule.label_names(),
            replaced,
        });
    }

    RewriteResult {
        changed: current != text,
        text: current,
        outcomes,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLD: &str = "1111111111111111111111111111111111111111";
    const NEW: &str = "abcdefabcdefabcdefabcdefabcdefabcdefabcd";

    fn manifest_text() -> String {
        format!(
            "Name: zlib\nURL: https://example.org/zlib\nDate: Mon Jan 02 2023\nCommit: {}\nLicense: Zlib\n",
            OLD
        )
    }

    fn dated_rules() -> Vec<SubstitutionRule> {
        rules_for(&commit(Some("Tue Nov 14 2023")), &ManifestConfig::default()).unwrap()
    }

    fn commit(date: Option<&str>) -> CommitInfo {
        CommitInfo {
            date: date.map(str::to_string),
            hash: NEW.to_string(),
        }
    }

    #[test]
    fn test_date_and_commit_rewritten() {
        let rules = dated_rules();
        let result = apply_rules(manifest_text().as_bytes(), &rules);

        let expected = format!(
            "Name: zlib\nURL: https://example.org/zlib\nDate: Tue Nov 14 2023\nCommit: {}\nLicense: Zlib\n",
            NEW
        );
        assert_eq!(result.text, expected.as_bytes());
        assert_eq!(result.total_replaced(), 2);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_hash_only_leaves_date() {
        let text = format!("Date: Mon Jan 02 2023\nRevision: {}\n", OLD);
        let rules = rules_for(&commit(None), &ManifestConfig::default()).unwrap();
        let result = apply_rules(text.as_bytes(), &rules);

        let expected = format!("Date: Mon Jan 02 2023\nRevision: {}\n", NEW);
        assert_eq!(result.text, expected.as_bytes());
        assert_eq!(result.outcomes.len(), 1);
    }

    #[test]
    fn test_non_hex_commit_untouched() {
        let text = b"Commit: main\n";
        let rules = rules_for(&commit(None), &ManifestConfig::default()).unwrap();
        let result = apply_rules(text, &rules);

        assert_eq!(result.text, text);
        assert_eq!(result.total_replaced(), 0);
        assert_eq!(
            result.warnings,
            vec![UpdateWarning::ValueNotRecognized {
                label_line: "Commit: main".to_string()
            }]
        );
    }

    #[test]
    fn test_overlong_hash_untouched() {
        let text = format!("Commit: {}0\n", OLD);
        let rules = rules_for(&commit(None), &ManifestConfig::default()).unwrap();
        assert_eq!(apply_rules(text.as_bytes(), &rules).text, text.as_bytes());
    }

    #[test]
    fn test_indentation_and_spacing_preserved() {
        let text = format!("  Date:\tMon Jan 02 2023\r\n\tCommit:   {}\r\n", OLD);
        let rules = dated_rules();
        let result = apply_rules(text.as_bytes(), &rules);

        let expected = format!("  Date:\tTue Nov 14 2023\r\n\tCommit:   {}\r\n", NEW);
        assert_eq!(result.text, expected.as_bytes());
    }

    #[test]
    fn test_non_utf8_bytes_elsewhere_preserved() {
        let mut text = b"Name: caf\xe9\n".to_vec();
        text.extend_from_slice(format!("Date: Mon Jan 02 2023\nCommit: {}\n", OLD).as_bytes());
        text.extend_from_slice(b"License: \xa9 Zlib\xff\n");
        let result = apply_rules(&text, &dated_rules());

        let mut expected = b"Name: caf\xe9\n".to_vec();
        expected.extend_from_slice(format!("Date: Tue Nov 14 2023\nCommit: {}\n", NEW).as_bytes());
        expected.extend_from_slice(b"License: \xa9 Zlib\xff\n");
        assert_eq!(result.text, expected);
        assert_eq!(result.total_replaced(), 2);
    }

    #[test]
    fn test_non_utf8_date_value_replaced() {
        let text = b"Date: \xe9t\xe9 2023\n";
        let result = apply_rules(text, &dated_rules());
        assert_eq!(result.text, b"Date: Tue Nov 14 2023\n");
    }

    #[test]
    fn test_label_must_start_line() {
        let text = format!("Last Date: Mon Jan 02 2023\nSee Commit: {}\n", OLD);
        let rules = dated_rules();
        let result = apply_rules(text.as_bytes(), &rules);

        assert_eq!(result.text, text.as_bytes());
        assert_eq!(result.warnings.len(), 2);
        assert!(matches!(
            result.warnings[0],
            UpdateWarning::LabelNotFound { .. }
        ));
    }

    #[test]
    fn test_replacement_is_literal() {
        let rule = SubstitutionRule::new(&["Date".to_string()], REST_OF_LINE, "$1 ${0}").unwrap();
        let (text, count) = rule.apply(b"Date: x\n");
        assert_eq!(text, b"Date: $1 ${0}\n");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let rules = dated_rules();
        let first = apply_rules(manifest_text().as_bytes(), &rules);
        let second = apply_rules(&first.text, &rules);
        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(first.text, second.text);
    }

    #[test]
    fn test_invalid_hash_pattern() {
        let manifest = ManifestConfig {
            hash_pattern: "[0-9a-f".to_string(),
            ..ManifestConfig::default()
        };
        assert!(rules_for(&commit(None), &manifest).is_err());
    }
}
