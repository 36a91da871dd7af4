//! In-place manifest editing
//!
//! The [Substituter] trait rewrites a file with a set of
//! [SubstitutionRule]s and leaves a copy of the original next to it, the
//! way `sed -i<suffix>` does. Removing that copy is the caller's job.

pub mod native;

pub use native::RegexSubstituter;

use std::path::{Path, PathBuf};

use crate::domain::{RewriteResult, SubstitutionRule};
use crate::error::Result;

/// What an in-place substitution left behind
#[derive(Debug, Clone, PartialEq)]
pub struct SubstitutionOutcome {
    /// Copy of the file as it was before the edit
    pub backup: PathBuf,
    /// The rewrite applied to the file
    pub rewrite: RewriteResult,
}

pub trait Substituter: Send + Sync {
    /// Rewrite `path` in place, keeping the original at
    /// [backup_path]`(path, backup_suffix)`.
    fn substitute_in_place(
        &self,
        path: &Path,
        rules: &[SubstitutionRule],
        backup_suffix: &str,
    ) -> Result<SubstitutionOutcome>;
}

/// `README.chromium` + `.bak` -> `README.chromium.bak`
pub fn backup_path(path: &Path, backup_suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(backup_suffix);
    PathBuf::from(name)
}
