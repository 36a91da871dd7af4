pub mod config;
pub mod domain;
pub mod edit;
pub mod error;
pub mod git;
pub mod ui;
pub mod updater;
pub mod warning;

pub use error::{ManifestSyncError, Result};
pub use updater::{ManifestUpdater, UpdateOptions, UpdateReport};
