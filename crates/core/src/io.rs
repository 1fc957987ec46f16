//! Output file helpers.

use std::{
    fs::{File, create_dir_all, write},
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// A file produced by the pipeline.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create parent directory if it doesn't exist.
    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            ensure_dir(parent)?;
        }
        Ok(())
    }

    /// Create (or truncate) the file for streaming writes.
    pub fn create(&self) -> Result<File> {
        self.ensure_parent_dir()?;
        File::create(&self.path).map_err(|e| Error::io("Failed to create", &self.path, e))
    }

    /// Write the whole contents, replacing any previous file.
    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<()> {
        self.ensure_parent_dir()?;
        write(&self.path, data).map_err(|e| Error::io("Failed to write", &self.path, e))
    }
}

impl AsRef<Path> for OutputFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Idempotent "make sure this directory exists".
pub fn ensure_dir(dir: &Path) -> Result<()> {
    create_dir_all(dir).map_err(|e| Error::io("Failed to create directory", dir, e))
}

/// Path text as it should appear inside CSS, always `/`-separated.
pub fn css_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
