use std::fmt::Write;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use git2::Repository;

use crate::domain::QueryFields;
use crate::error::{ManifestSyncError, Result};
use crate::git::CommitQuery;

/// In-process commit query backed by libgit2
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2Query;

impl Git2Query {
    pub fn new() -> Self {
        Git2Query
    }
}

/// Format a git timestamp in the committer's own UTC offset, as
/// `git log --date=format:` does.
pub fn format_commit_time(time: git2::Time, date_format: &str) -> Result<String> {
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).ok_or_else(|| {
        ManifestSyncError::query(format!(
            "commit has invalid UTC offset of {} minutes",
            time.offset_minutes()
        ))
    })?;
    let utc = DateTime::from_timestamp(time.seconds(), 0).ok_or_else(|| {
        ManifestSyncError::query(format!(
            "commit timestamp {} is out of range",
            time.seconds()
        ))
    })?;

    let mut formatted = String::new();
    write!(formatted, "{}", utc.with_timezone(&offset).format(date_format)).map_err(|_| {
        ManifestSyncError::query(format!("invalid date format '{}'", date_format))
    })?;
    Ok(formatted)
}

impl CommitQuery for Git2Query {
    fn latest_commit(
        &self,
        source_dir: &Path,
        fields: QueryFields,
        date_format: &str,
    ) -> Result<String> {
        let repo = Repository::discover(source_dir).map_err(|e| {
            ManifestSyncError::query(format!(
                "cannot open repository at '{}': {}",
                source_dir.display(),
                e.message()
            ))
        })?;

        let commit = repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| {
                ManifestSyncError::query(format!(
                    "cannot resolve HEAD in '{}': {}",
                    source_dir.display(),
                    e.message()
                ))
            })?;

        let hash = commit.id().to_string();

        match fields {
            QueryFields::HashOnly => Ok(format!("{}\n", hash)),
            QueryFields::DateAndHash => {
                let date = format_commit_time(commit.author().when(), date_format)?;
                Ok(format!("{}\n{}\n", date, hash))
            }
        }
    }

    fn name(&self) -> &'static str {
        "git2"
    }
}
