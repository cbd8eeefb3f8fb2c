//! Database location resolution
//!
//! Priority: explicit `--db` flag (clap also reads `SHOPDESK_DB` from the
//! environment), then the platform user data directory, then the current
//! directory as a last resort.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Default database file name
const DB_FILE: &str = "shop.db";

/// Resolve the database path for this invocation
pub fn database_path(override_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = override_path {
        return path;
    }

    ProjectDirs::from("com", "shopdesk", "shopdesk")
        .map(|dirs| dirs.data_dir().join(DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DB_FILE))
}
