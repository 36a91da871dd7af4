use std::path::Path;
use std::process::Command;

use crate::domain::QueryFields;
use crate::error::{ManifestSyncError, Result};
use crate::git::CommitQuery;

/// Commit query that shells out to the `git` executable
#[derive(Debug, Clone)]
pub struct GitCliQuery {
    program: String,
}

impl GitCliQuery {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git binary instead of the one on `PATH`
    pub fn with_program(program: impl Into<String>) -> Self {
        GitCliQuery {
            program: program.into(),
        }
    }

    /// Arguments for `git log` emitting the requested fields.
    pub fn log_args(fields: QueryFields, date_format: &str) -> Vec<String> {
        let mut args = vec![
            "-c".to_string(),
            "log.showSignature=false".to_string(),
            "log".to_string(),
            "-1".to_string(),
        ];
        match fields {
            QueryFields::DateAndHash => {
                args.push(format!("--date=format:{}", date_format));
                args.push("--format=%ad%n%H".to_string());
            }
            QueryFields::HashOnly => args.push("--format=%H".to_string()),
        }
        args
    }
}

impl Default for GitCliQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitQuery for GitCliQuery {
    fn latest_commit(
        &self,
        source_dir: &Path,
        fields: QueryFields,
        date_format: &str,
    ) -> Result<String> {
        let args = Self::log_args(fields, date_format);
        let output = Command::new(&self.program)
            .current_dir(source_dir)
            .args(&args)
            .output()
            .map_err(|e| {
                ManifestSyncError::query(format!(
                    "cannot run {} in '{}': {}",
                    self.program,
                    source_dir.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ManifestSyncError::query(format!(
                "{} {} failed ({}): {}",
                self.program,
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &'static str {
        "git"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_args_date_and_hash() {
        let args = GitCliQuery::log_args(QueryFields::DateAndHash, "%a %b %d %Y");
        assert_eq!(
            args,
            vec![
                "-c",
                "log.showSignature=false",
                "log",
                "-1",
                "--date=format:%a %b %d %Y",
                "--format=%ad%n%H",
            ]
        );
    }

    #[test]
    fn test_log_args_hash_only() {
        let args = GitCliQuery::log_args(QueryFields::HashOnly, "%a %b %d %Y");
        assert_eq!(args.last().map(String::as_str), Some("--format=%H"));
        assert!(!args.iter().any(|a| a.starts_with("--date")));
    }

    #[test]
    fn test_missing_program_is_query_error() {
        let dir = tempfile::tempdir().unwrap();
        let query = GitCliQuery::with_program("definitely-not-a-git-binary");
        let err = query
            .latest_commit(dir.path(), QueryFields::HashOnly, "%Y")
            .unwrap_err();
        assert!(matches!(err, ManifestSyncError::Query(_)));
        assert!(err.to_string().contains("cannot run"));
    }
}
