use serde::{Deserialize, Serialize};

use crate::error::{ManifestSyncError, Result};

/// Which fields the commit query emits, one per output line.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum QueryFields {
    /// Formatted commit date, then the full hash
    #[default]
    DateAndHash,
    /// Full hash only, for manifests that track a `Revision:`
    HashOnly,
}

impl QueryFields {
    /// Number of output lines this variant requires.
    pub fn line_count(self) -> usize {
        match self {
            QueryFields::DateAndHash => 2,
            QueryFields::HashOnly => 1,
        }
    }
}

fn is_full_hash(value: &str) -> bool {
    value.len() == 40 && value.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Metadata of the latest commit of the vendored checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Formatted commit date, absent in the hash-only variant
    pub date: Option<String>,
    /// The full commit hash
    pub hash: String,
}

impl CommitInfo {
    /// Split raw query output into fields.
    ///
    /// Lines past the ones the variant needs are ignored. A required line
    /// that is missing or blank makes the output malformed.
    pub fn from_query_output(output: &str, fields: QueryFields) -> Result<Self> {
        let lines: Vec<&str> = output.lines().collect();
        let needed = fields.line_count();

        if lines.len() < needed {
            return Err(ManifestSyncError::output(format!(
                "expected {} line(s), got {}",
                needed,
                lines.len()
            )));
        }

        let field = |index: usize, name: &str| -> Result<String> {
            let value = lines[index].trim();
            if value.is_empty() {
                Err(ManifestSyncError::output(format!(
                    "line {} ({}) is empty",
                    index + 1,
                    name
                )))
            } else {
                Ok(value.to_string())
            }
        };

        let info = match fields {
            QueryFields::DateAndHash => CommitInfo {
                date: Some(field(0, "date")?),
                hash: field(1, "hash")?,
            },
            QueryFields::HashOnly => CommitInfo {
                date: None,
                hash: field(0, "hash")?,
            },
        };

        if !is_full_hash(&info.hash) {
            return Err(ManifestSyncError::output(format!(
                "'{}' is not a 40-character lowercase hex commit hash",
                info.hash
            )));
        }
        Ok(info)
    }

    /// Abbreviated hash for display
    pub fn short_hash(&self) -> &str {
        if self.hash.len() > 7 {
            &self.hash[..7]
        } else {
            &self.hash
        }
    }
}
