//! User-facing output.
//!
//! All status reporting goes through the functions in [formatter]; the
//! binary never prints directly.

pub mod formatter;

pub use formatter::{
    display_commit_info, display_error, display_preview, display_report, display_status,
    display_success, display_warning,
};
