//! [`FaultyFs`]: the real filesystem with selectable failing primitives.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use tpd_fs::{Error, FileSystem, OsFileSystem, Probe, Result};

/// A mutating primitive that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    CreateDir,
    Write,
    Remove,
}

/// Delegates to [`OsFileSystem`] except for primitives set to fail, which
/// fail on every call with the given message.
#[derive(Debug, Default, Clone)]
pub struct FaultyFs {
    failures: HashMap<Op, String>,
}

impl FaultyFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, op: Op, message: impl Into<String>) -> Self {
        self.failures.insert(op, message.into());
        self
    }

    fn check(&self, op: Op, path: &Path) -> Result<()> {
        match self.failures.get(&op) {
            Some(message) => Err(Error::io(path, io::Error::other(message.clone()))),
            None => Ok(()),
        }
    }
}

impl FileSystem for FaultyFs {
    fn probe(&self, path: &Path) -> Probe {
        OsFileSystem.probe(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.check(Op::CreateDir, path)?;
        OsFileSystem.create_dir_all(path)
    }

    fn write_file(&self, path: &Path, contents: &[u8], mode: Option<u32>) -> Result<()> {
        self.check(Op::Write, path)?;
        OsFileSystem.write_file(path, contents, mode)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.check(Op::Remove, path)?;
        OsFileSystem.remove_file(path)
    }
}
