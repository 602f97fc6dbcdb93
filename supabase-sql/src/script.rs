//! Loading the bootstrap script from disk

use crate::error::BootstrapError;
use std::fs;
use std::path::{Path, PathBuf};

/// The script text, kept opaque. The server is the only thing that parses it.
#[derive(Debug, Clone)]
pub struct SqlScript {
    path: PathBuf,
    text: String,
}

impl SqlScript {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Read the whole file as UTF-8.
///
/// Invalid UTF-8 surfaces as an `InvalidData` I/O error rather than being
/// replaced lossily.
pub fn read_script(path: &Path) -> Result<SqlScript, BootstrapError> {
    let text = fs::read_to_string(path).map_err(|source| BootstrapError::ReadScript {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(SqlScript::new(path, text))
}
