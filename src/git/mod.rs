//! Commit query abstraction layer
//!
//! This module provides a trait-based abstraction over the "latest commit"
//! log query, allowing the in-process libgit2 implementation, the `git`
//! executable, and mock implementations for testing to be swapped without
//! touching the update logic.
//!
//! # Overview
//!
//! The primary abstraction is the [CommitQuery] trait. Its implementations:
//!
//! - [repository::Git2Query]: in-process query using the `git2` crate
//! - [cli::GitCliQuery]: runs `git log` in the source directory
//! - [mock::MockQuery]: canned output for tests
//!
//! Every implementation produces the same text shape, one field per line,
//! so callers parse it with [crate::domain::CommitInfo::from_query_output].

pub mod cli;
pub mod mock;
pub mod repository;

pub use cli::GitCliQuery;
pub use mock::MockQuery;
pub use repository::Git2Query;

use std::path::Path;

use crate::config::QueryBackend;
use crate::domain::QueryFields;
use crate::error::Result;

/// Common commit query trait
///
/// ## Error Handling
///
/// Implementations report every failure (missing directory, not a
/// repository, unborn HEAD, non-zero exit of an external tool) as
/// [crate::error::ManifestSyncError::Query] so the failed step is named.
pub trait CommitQuery: Send + Sync {
    /// Query the most recent commit reachable from HEAD of the repository
    /// containing `source_dir`.
    ///
    /// # Arguments
    /// * `source_dir` - Directory inside the vendored checkout
    /// * `fields` - Which fields to emit
    /// * `date_format` - strftime-style pattern for the commit date
    ///
    /// # Returns
    /// * `Ok(String)` - The requested fields, each on its own line, date first
    /// * `Err` - If the query could not be answered
    ///
    /// # Example
    /// ```rust
    /// # use manifest_sync::git::{CommitQuery, MockQuery};
    /// # use manifest_sync::domain::QueryFields;
    /// # use std::path::Path;
    /// let query = MockQuery::with_output("Tue Nov 14 2023\nabc\n");
    /// let output = query.latest_commit(Path::new("src"), QueryFields::DateAndHash, "%a %b %d %Y")?;
    /// assert_eq!(output.lines().count(), 2);
    /// # Ok::<(), manifest_sync::ManifestSyncError>(())
    /// ```
    fn latest_commit(&self, source_dir: &Path, fields: QueryFields, date_format: &str)
        -> Result<String>;

    /// Short name used in status output
    fn name(&self) -> &'static str;
}

/// Build the query implementation selected in configuration.
pub fn query_for(backend: QueryBackend) -> Box<dyn CommitQuery> {
    match backend {
        QueryBackend::Git2 => Box::new(Git2Query::new()),
        QueryBackend::GitCli => Box::new(GitCliQuery::new()),
    }
}
