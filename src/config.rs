use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::QueryFields;
use crate::error::{ManifestSyncError, Result};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "manifest-sync.toml";

/// File name looked up in the user configuration directory.
pub const USER_CONFIG_FILE: &str = ".manifest-sync.toml";

/// Represents the complete configuration for manifest-sync.
///
/// Contains the checkout and manifest locations, how the latest commit is
/// queried, and which manifest lines get rewritten.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("src")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("README.chromium")
}

/// Locations of the vendored checkout and its manifest, relative to the
/// working directory unless absolute.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            source_dir: default_source_dir(),
            manifest: default_manifest(),
        }
    }
}

/// Which implementation answers the "latest commit" query.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum QueryBackend {
    /// In-process query through libgit2
    #[default]
    Git2,
    /// Spawns the `git` executable
    GitCli,
}

/// Returns the default strftime pattern: weekday, month, day, year.
fn default_date_format() -> String {
    "%a %b %d %Y".to_string()
}

/// Configuration for the commit query.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct QueryConfig {
    #[serde(default)]
    pub backend: QueryBackend,

    #[serde(default)]
    pub fields: QueryFields,

    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            backend: QueryBackend::default(),
            fields: QueryFields::default(),
            date_format: default_date_format(),
        }
    }
}

fn default_date_labels() -> Vec<String> {
    vec!["Date".to_string()]
}

fn default_hash_labels() -> Vec<String> {
    vec!["Commit".to_string(), "Revision".to_string()]
}

/// Returns the pattern an existing hash value must match to be replaced.
fn default_hash_pattern() -> String {
    r"[0-9a-fA-F]{40}\b".to_string()
}

fn default_backup_suffix() -> String {
    ".bak".to_string()
}

/// Configuration for the manifest rewrite.
///
/// Labels are matched literally at the start of a line (after optional
/// blanks) and must be followed by a colon.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default = "default_date_labels")]
    pub date_labels: Vec<String>,

    #[serde(default = "default_hash_labels")]
    pub hash_labels: Vec<String>,

    #[serde(default = "default_hash_pattern")]
    pub hash_pattern: String,

    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            date_labels: default_date_labels(),
            hash_labels: default_hash_labels(),
            hash_pattern: default_hash_pattern(),
            backup_suffix: default_backup_suffix(),
        }
    }
}

impl Config {
    /// Rejects values that would make the rewrite meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.manifest.backup_suffix.is_empty() {
            return Err(ManifestSyncError::config(
                "backup_suffix must not be empty, the backup would overwrite the manifest",
            ));
        }
        if self.manifest.hash_labels.is_empty() {
            return Err(ManifestSyncError::config("hash_labels must not be empty"));
        }
        if self.query.fields == QueryFields::DateAndHash && self.manifest.date_labels.is_empty() {
            return Err(ManifestSyncError::config(
                "date_labels must not be empty when the date is queried",
            ));
        }
        if self.query.date_format.contains('\n') {
            return Err(ManifestSyncError::config(
                "date_format must not contain a line break",
            ));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `manifest-sync.toml` in current directory
/// 3. `.manifest-sync.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE);
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ManifestSyncError::config(format!("cannot read '{}': {}", path.display(), e))
    })?;
    let config: Config = toml::from_str(&config_str).map_err(|e| {
        ManifestSyncError::config(format!("cannot parse '{}': {}", path.display(), e))
    })?;
    Ok(config)
}
