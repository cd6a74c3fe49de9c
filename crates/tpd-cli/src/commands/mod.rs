//! Command implementations for tpd-cli

pub mod apply;
pub mod plan;

pub use apply::run_apply;
pub use plan::run_plan;

use std::path::Path;

use serde::Deserialize;
use tpd_core::{Intent, ReconcileConfig};
use tpd_fs::DocumentStore;

use crate::cli::Target;
use crate::error::Result;

/// Accepted shapes of an intents document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntentDocument {
    List(Vec<Intent>),
    Table { intents: Vec<Intent> },
}

impl IntentDocument {
    fn into_intents(self) -> Vec<Intent> {
        match self {
            Self::List(intents) | Self::Table { intents } => intents,
        }
    }
}

/// Load intents from a JSON, YAML or TOML document.
///
/// TOML has no null, so deletions can only be expressed in JSON or YAML.
pub fn load_intents(path: &Path) -> Result<Vec<Intent>> {
    let document: IntentDocument = DocumentStore::new().load(path)?;
    let intents = document.into_intents();
    tracing::debug!(?path, count = intents.len(), "Loaded intents");
    Ok(intents)
}

/// Configuration file first, then command-line overrides.
pub fn resolve_config(target: &Target) -> Result<ReconcileConfig> {
    let mut config = match &target.config {
        Some(path) => ReconcileConfig::load(path)?,
        None => ReconcileConfig::default(),
    };

    if let Some(root) = &target.root {
        config.root = root.clone();
    }

    Ok(config)
}
