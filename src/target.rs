//! Where constant files are written, and the file-level I/O around them.
//!
//! [`OutputTarget`] is a plain value: a directory (or "the working directory at
//! write time") plus a file name. A [`ConstantStore`](crate::ConstantStore)
//! keeps one, and [`to_file`](crate::to_file) takes one explicitly.
//!
//! Directories are validated when they are set, not when the file is written.
//! A directory removed between [`OutputTarget::set_directory`] and the write
//! surfaces as an [`Error::Io`] from the write itself.
//!
//! ```rust
//! use constfile::OutputTarget;
//!
//! let target = OutputTarget::default();
//! assert_eq!(target.filename(), "constfile.php");
//! assert!(target.directory().is_none());
//! ```

use crate::grammar::DEFAULT_FILENAME;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output directory and file name for an export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputTarget {
    directory: Option<PathBuf>,
    filename: String,
}

impl Default for OutputTarget {
    fn default() -> Self {
        OutputTarget {
            directory: None,
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl OutputTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a target for `filename` inside an already validated `directory`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DirectoryNotFound`] or [`Error::NotADirectory`].
    pub fn in_directory(directory: impl AsRef<Path>, filename: &str) -> Result<Self> {
        let mut target = Self::new();
        target.set_directory(Some(directory.as_ref()))?;
        target.set_filename(Some(filename));
        Ok(target)
    }

    /// The configured directory, or `None` for "working directory at write time".
    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Resolves and validates the output directory.
    ///
    /// `None` selects the process working directory, resolved now. The stored
    /// path is canonical.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::DirectoryNotFound`] if the path does not exist and
    /// [`Error::NotADirectory`] if it is not a directory.
    pub fn set_directory(&mut self, directory: Option<&Path>) -> Result<()> {
        let resolved = match directory {
            Some(path) => path.to_path_buf(),
            None => working_directory()?,
        };
        self.directory = Some(validate_directory(&resolved)?);
        Ok(())
    }

    /// Sets the file name; `None` or an empty name restores the default.
    pub fn set_filename(&mut self, filename: Option<&str>) {
        self.filename = match filename {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_FILENAME.to_string(),
        };
    }

    /// Unsets the directory and restores the default file name.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The directory a write would go to right now.
    ///
    /// # Errors
    ///
    /// Fails when no directory is configured and the working directory cannot
    /// be determined or is invalid.
    pub fn resolve_directory(&self) -> Result<PathBuf> {
        match &self.directory {
            Some(dir) => Ok(dir.clone()),
            None => validate_directory(&working_directory()?),
        }
    }

    /// Full path of the file a write would produce.
    ///
    /// # Errors
    ///
    /// See [`OutputTarget::resolve_directory`].
    pub fn resolve_path(&self) -> Result<PathBuf> {
        Ok(self.resolve_directory()?.join(&self.filename))
    }
}

fn working_directory() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| Error::io(Path::new("."), e))
}

fn validate_directory(path: &Path) -> Result<PathBuf> {
    let canonical = fs::canonicalize(path).map_err(|_| Error::directory_not_found(path))?;
    if !canonical.is_dir() {
        return Err(Error::not_a_directory(&canonical));
    }
    Ok(canonical)
}

/// Writes `contents` to `path` while holding an exclusive lock on the file.
///
/// The file is truncated only after the lock is acquired. The lock is released
/// when the handle drops, on success and on every error path.
pub(crate) fn write_locked(path: &Path, contents: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    file.lock().map_err(|e| Error::io(path, e))?;
    file.set_len(0).map_err(|e| Error::io(path, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| Error::io(path, e))?;
    file.flush().map_err(|e| Error::io(path, e))?;
    file.unlock().map_err(|e| Error::io(path, e))?;
    Ok(())
}

/// Reads an import file after checking that it exists and is a regular file.
pub(crate) fn read_import(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|_| Error::file_not_found(path))?;
    if !metadata.is_file() {
        return Err(Error::not_a_file(path));
    }
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
    file.lock_shared().map_err(|e| Error::io(path, e))?;
    let mut contents = String::new();
    std::io::Read::read_to_string(&mut file, &mut contents).map_err(|e| Error::io(path, e))?;
    Ok(contents)
}
