//! Filesystem port used by the reconciliation engine
//!
//! The engine never calls `std::fs` directly. It probes and mutates through
//! [`FileSystem`], so callers can substitute the primitives (tests inject
//! failures this way).

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::{Error, Result};

/// Observed state of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Nothing exists at the path
    Missing,
    /// A regular file
    File,
    /// A directory
    Directory,
    /// Something else (fifo, socket, device)
    Other,
    /// The probe itself failed; the message is kept for diagnostics
    Unreadable(String),
}

impl Probe {
    /// Whether the probe confirmed that something exists.
    ///
    /// An unreadable probe does not confirm existence.
    pub fn exists(&self) -> bool {
        matches!(self, Self::File | Self::Directory | Self::Other)
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }
}

/// Blocking filesystem primitives.
pub trait FileSystem {
    /// Inspect `path`, following symlinks.
    fn probe(&self, path: &Path) -> Probe;

    /// Whether something exists at `path`.
    fn exists(&self, path: &Path) -> bool {
        self.probe(path).exists()
    }

    /// Create `path` and all missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Write `contents` to `path`, creating or truncating it.
    ///
    /// `mode` only applies when the file is created.
    fn write_file(&self, path: &Path, contents: &[u8], mode: Option<u32>) -> Result<()>;

    /// Remove the file at `path`.
    fn remove_file(&self, path: &Path) -> Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn probe(&self, path: &Path) -> Probe {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Probe::Directory,
            Ok(meta) if meta.is_file() => Probe::File,
            Ok(_) => Probe::Other,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Probe::Missing,
            Err(e) => Probe::Unreadable(e.to_string()),
        }
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| Error::io(path, e))
    }

    fn write_file(&self, path: &Path, contents: &[u8], mode: Option<u32>) -> Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        apply_mode(&mut options, mode);

        let mut file = options.open(path).map_err(|e| Error::io(path, e))?;
        file.write_all(contents).map_err(|e| Error::io(path, e))?;
        file.sync_all().map_err(|e| Error::io(path, e))?;

        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).map_err(|e| Error::io(path, e))
    }
}

#[cfg(unix)]
fn apply_mode(options: &mut OpenOptions, mode: Option<u32>) {
    use std::os::unix::fs::OpenOptionsExt;

    if let Some(mode) = mode {
        options.mode(mode);
    }
}

#[cfg(not(unix))]
fn apply_mode(_options: &mut OpenOptions, _mode: Option<u32>) {}
