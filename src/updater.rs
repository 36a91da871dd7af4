//! Manifest update workflow
//!
//! Ties the commit query and the in-place substituter together:
//! query the latest commit, parse its fields, rewrite the manifest and
//! drop the backup the rewrite left behind. Every failure aborts the run;
//! nothing is retried or rolled back.

use std::fs;
use std::path::Path;

use crate::config::{Config, ManifestConfig};
use crate::domain::{apply_rules, rules_for, CommitInfo, QueryFields, RuleOutcome};
use crate::edit::{RegexSubstituter, Substituter};
use crate::error::{ManifestSyncError, Result};
use crate::git::{query_for, CommitQuery};
use crate::warning::UpdateWarning;

/// Settings for one update, taken from [Config]
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOptions {
    pub fields: QueryFields,
    pub date_format: String,
    pub manifest: ManifestConfig,
}

impl From<&Config> for UpdateOptions {
    fn from(config: &Config) -> Self {
        UpdateOptions {
            fields: config.query.fields,
            date_format: config.query.date_format.clone(),
            manifest: config.manifest.clone(),
        }
    }
}

impl Default for UpdateOptions {
    fn default() -> Self {
        UpdateOptions::from(&Config::default())
    }
}

/// Result of a successful update (or preview)
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    /// The commit the manifest now points at
    pub commit: CommitInfo,
    /// Lines rewritten per rule
    pub outcomes: Vec<RuleOutcome>,
    pub warnings: Vec<UpdateWarning>,
    /// Whether the manifest text changed
    pub changed: bool,
}

/// A computed rewrite that was not written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub report: UpdateReport,
    /// Manifest bytes as read
    pub original: Vec<u8>,
    /// Manifest bytes as they would be written
    pub text: Vec<u8>,
}

pub struct ManifestUpdater {
    query: Box<dyn CommitQuery>,
    substituter: Box<dyn Substituter>,
    options: UpdateOptions,
}

impl ManifestUpdater {
    pub fn new(
        query: Box<dyn CommitQuery>,
        substituter: Box<dyn Substituter>,
        options: UpdateOptions,
    ) -> Self {
        ManifestUpdater {
            query,
            substituter,
            options,
        }
    }

    /// Updater using the configured query backend and the native
    /// substituter.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            query_for(config.query.backend),
            Box::new(RegexSubstituter::new()),
            UpdateOptions::from(config),
        )
    }

    /// Name of the query backend in use
    pub fn query_name(&self) -> &'static str {
        self.query.name()
    }

    /// Query and parse the latest commit of the checkout at `source_dir`.
    pub fn query_commit(&self, source_dir: &Path) -> Result<CommitInfo> {
        let output = self.query.latest_commit(
            source_dir,
            self.options.fields,
            &self.options.date_format,
        )?;
        CommitInfo::from_query_output(&output, self.options.fields)
    }

    /// Point the manifest's `Date:` and `Commit:`/`Revision:` lines at the
    /// latest commit of `source_dir`.
    ///
    /// # Returns
    /// * `Ok(UpdateReport)` - The manifest was rewritten and its backup removed
    /// * `Err` - The first failing step. A [ManifestSyncError::Cleanup] error
    ///   means the manifest was already rewritten.
    pub fn update_manifest(&self, source_dir: &Path, manifest_path: &Path) -> Result<UpdateReport> {
        let commit = self.query_commit(source_dir)?;
        let rules = rules_for(&commit, &self.options.manifest)?;

        let outcome = self.substituter.substitute_in_place(
            manifest_path,
            &rules,
            &self.options.manifest.backup_suffix,
        )?;

        fs::remove_file(&outcome.backup).map_err(|e| {
            ManifestSyncError::cleanup(format!(
                "cannot remove '{}': {}",
                outcome.backup.display(),
                e
            ))
        })?;

        Ok(UpdateReport {
            commit,
            outcomes: outcome.rewrite.outcomes,
            warnings: outcome.rewrite.warnings,
            changed: outcome.rewrite.changed,
        })
    }

    /// Compute what [Self::update_manifest] would write, touching nothing.
    pub fn preview(&self, source_dir: &Path, manifest_path: &Path) -> Result<Preview> {
        let commit = self.query_commit(source_dir)?;
        let rules = rules_for(&commit, &self.options.manifest)?;

        let original = fs::read(manifest_path).map_err(|e| {
            ManifestSyncError::substitution(format!(
                "cannot read '{}': {}",
                manifest_path.display(),
                e
            ))
        })?;
        let rewrite = apply_rules(&original, &rules);

        Ok(Preview {
            report: UpdateReport {
                commit,
                outcomes: rewrite.outcomes,
                warnings: rewrite.warnings,
                changed: rewrite.changed,
            },
            original,
            text: rewrite.text,
        })
    }
}
