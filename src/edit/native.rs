use std::fs;
use std::path::Path;

use crate::domain::{apply_rules, SubstitutionRule};
use crate::edit::{backup_path, SubstitutionOutcome, Substituter};
use crate::error::{ManifestSyncError, Result};

/// In-memory regex substitution, written back to disk
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexSubstituter;

impl RegexSubstituter {
    pub fn new() -> Self {
        RegexSubstituter
    }
}

impl Substituter for RegexSubstituter {
    fn substitute_in_place(
        &self,
        path: &Path,
        rules: &[SubstitutionRule],
        backup_suffix: &str,
    ) -> Result<SubstitutionOutcome> {
        let original = fs::read(path).map_err(|e| {
            ManifestSyncError::substitution(format!("cannot read '{}': {}", path.display(), e))
        })?;

        let rewrite = apply_rules(&original, rules);
        let backup = backup_path(path, backup_suffix);

        fs::write(&backup, &original).map_err(|e| {
            ManifestSyncError::substitution(format!(
                "cannot write backup '{}': {}",
                backup.display(),
                e
            ))
        })?;
        fs::write(path, &rewrite.text).map_err(|e| {
            ManifestSyncError::substitution(format!("cannot write '{}': {}", path.display(), e))
        })?;

        Ok(SubstitutionOutcome { backup, rewrite })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrites_and_keeps_backup() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("README.chromium");
        fs::write(&manifest, b"Name: caf\xe9\nDate: old\n").unwrap();

        let rules = vec![SubstitutionRule::new(
            &["Date".to_string()],
            crate::domain::rule::REST_OF_LINE,
            "new",
        )
        .unwrap()];
        let outcome = RegexSubstituter::new()
            .substitute_in_place(&manifest, &rules, ".bak")
            .unwrap();

        assert_eq!(fs::read(&manifest).unwrap(), b"Name: caf\xe9\nDate: new\n");
        assert_eq!(outcome.backup, dir.path().join("README.chromium.bak"));
        assert_eq!(
            fs::read(&outcome.backup).unwrap(),
            b"Name: caf\xe9\nDate: old\n"
        );
        assert_eq!(outcome.rewrite.total_replaced(), 1);
    }

    #[test]
    fn test_missing_file_is_substitution_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RegexSubstituter::new()
            .substitute_in_place(&dir.path().join("absent"), &[], ".bak")
            .unwrap_err();
        assert!(matches!(err, ManifestSyncError::Substitution(_)));
        assert!(!dir.path().join("absent.bak").exists());
    }
}
