use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::QueryFields;
use crate::error::{ManifestSyncError, Result};
use crate::git::CommitQuery;

/// Mock query returning canned output without touching any repository
pub struct MockQuery {
    response: std::result::Result<String, String>,
    calls: Mutex<Vec<PathBuf>>,
}

impl MockQuery {
    /// Answer every query with `output`
    pub fn with_output(output: impl Into<String>) -> Self {
        MockQuery {
            response: Ok(output.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail every query with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        MockQuery {
            response: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Source directories the query was asked about, in order
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl CommitQuery for MockQuery {
    fn latest_commit(
        &self,
        source_dir: &Path,
        _fields: QueryFields,
        _date_format: &str,
    ) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(source_dir.to_path_buf());
        }
        self.response.clone().map_err(ManifestSyncError::query)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_returns_output() {
        let query = MockQuery::with_output("a\nb\n");
        let output = query
            .latest_commit(Path::new("src"), QueryFields::DateAndHash, "%Y")
            .unwrap();
        assert_eq!(output, "a\nb\n");
        assert_eq!(query.calls(), vec![PathBuf::from("src")]);
    }

    #[test]
    fn test_mock_failure() {
        let query = MockQuery::failing("exit status 128");
        let err = query
            .latest_commit(Path::new("src"), QueryFields::HashOnly, "%Y")
            .unwrap_err();
        assert_eq!(err.to_string(), "Commit query failed: exit status 128");
    }
}
