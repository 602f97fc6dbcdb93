//! Path resolution for the bootstrap script
//!
//! The script lives in the repository, not next to the binary, so paths are
//! anchored on the workspace root that this crate was built from.

use common::EnvLookup;
use std::path::{Path, PathBuf};

/// Directory holding the bootstrap script, relative to the repo root
pub const DOCS_DIR: &str = "docs";

/// File name of the bootstrap script
pub const INIT_SQL_FILE: &str = "supabase_init.sql";

/// Env var that overrides the script location
pub const INIT_SQL_ENV: &str = "SUPABASE_INIT_SQL";

/// Get the repository root (the parent of this crate's directory)
pub fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Get the script path under a given repo root
pub fn init_sql_path(root: &Path) -> PathBuf {
    root.join(DOCS_DIR).join(INIT_SQL_FILE)
}

/// Resolve the script path, honoring the `SUPABASE_INIT_SQL` override
pub fn resolve_init_sql(env: &impl EnvLookup) -> PathBuf {
    env.optional(INIT_SQL_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| init_sql_path(&repo_root()))
}
