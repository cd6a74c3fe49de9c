//! [`TestRoot`]: a temporary directory to reconcile into.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tpd_core::{ReconcileConfig, Reconciler, SilentGate};

/// A temporary reconciliation root with setup and assertion helpers.
///
/// # Example
///
/// ```rust,no_run
/// use tpd_test_utils::TestRoot;
///
/// let root = TestRoot::new();
/// root.mkdir("existingDir");
/// root.assert_missing("existingDir/text.txt");
/// ```
pub struct TestRoot {
    temp_dir: TempDir,
}

impl Default for TestRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRoot {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::Builder::new()
                .prefix("tpd-filesystem-")
                .tempdir()
                .unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` under the root.
    pub fn join(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.join(relative)).unwrap();
    }

    /// Write a file, creating parents.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.join(relative).exists()
    }

    pub fn assert_file(&self, relative: &str, expected: &str) {
        assert_eq!(self.read(relative), expected, "Unexpected content in {relative}");
    }

    pub fn assert_missing(&self, relative: &str) {
        assert!(!self.exists(relative), "Expected {relative} to be absent");
    }

    /// Non-interactive configuration anchored here.
    pub fn config(&self) -> ReconcileConfig {
        ReconcileConfig::new(self.path()).with_interactive(false)
    }

    /// A non-interactive reconciler on the real filesystem.
    pub fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.config(), Box::new(SilentGate)).unwrap()
    }
}
