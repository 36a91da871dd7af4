use std::fmt;

/// Non-fatal conditions found while rewriting a manifest.
/// The run still succeeds; these are reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateWarning {
    /// No line carries any of the rule's labels
    LabelNotFound { labels: String },
    /// A labeled line exists but its current value does not match the
    /// rule's pattern, so it was left as is
    ValueNotRecognized { label_line: String },
}

impl fmt::Display for UpdateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateWarning::LabelNotFound { labels } => {
                write!(f, "No '{}:' line found in manifest", labels)
            }
            UpdateWarning::ValueNotRecognized { label_line } => {
                write!(
                    f,
                    "Left '{}' unchanged: value does not look like a commit hash",
                    label_line
                )
            }
        }
    }
}
