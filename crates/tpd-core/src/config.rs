//! Reconciler configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tpd_fs::DocumentStore;

use crate::Result;

/// Settings consumed by the [`Reconciler`](crate::Reconciler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Anchor directory every intent's `baseDir` is resolved against
    pub root: PathBuf,
    /// Whether each non-empty category waits for operator acknowledgment
    pub interactive: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            interactive: true,
        }
    }
}

impl ReconcileConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Load from a TOML, JSON or YAML file.
    ///
    /// Fields missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(DocumentStore::new().load(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interactive_by_default() {
        let config = ReconcileConfig::new("/srv");
        assert!(config.interactive);
        assert_eq!(config.root, PathBuf::from("/srv"));
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let config: ReconcileConfig = serde_json::from_str(r#"{"root": "/srv"}"#).unwrap();
        assert!(config.interactive);
    }
}
