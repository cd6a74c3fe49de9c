//! Reconciliation report

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::plan::Category;
use crate::validate::InvalidIntent;

/// A destination whose action failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub destination: PathBuf,
    pub message: String,
}

/// Outcome of applying a plan.
///
/// Every list is always present, possibly empty. Ignored deletions are not
/// recorded anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub created: Vec<PathBuf>,
    pub failed_to_create: Vec<Failure>,
    pub updated: Vec<PathBuf>,
    pub failed_to_update: Vec<Failure>,
    pub deleted: Vec<PathBuf>,
    pub failed_to_delete: Vec<Failure>,
    /// Classified `reject`, never attempted
    pub rejected: Vec<PathBuf>,
    /// Intents excluded before planning
    pub invalid: Vec<InvalidIntent>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `category`'s action went through for `destination`.
    pub fn record_success(&mut self, category: Category, destination: &Path) {
        let list = match category {
            Category::Create => &mut self.created,
            Category::Update => &mut self.updated,
            Category::Delete => &mut self.deleted,
            Category::Reject => &mut self.rejected,
            Category::Ignore => return,
        };
        list.push(destination.to_path_buf());
    }

    /// Record that `category`'s action failed for `destination`.
    ///
    /// Only mutating categories can fail.
    pub fn record_failure(&mut self, category: Category, destination: &Path, message: impl Into<String>) {
        let list = match category {
            Category::Create => &mut self.failed_to_create,
            Category::Update => &mut self.failed_to_update,
            Category::Delete => &mut self.failed_to_delete,
            Category::Reject | Category::Ignore => return,
        };
        list.push(Failure {
            destination: destination.to_path_buf(),
            message: message.into(),
        });
    }

    /// Number of failed actions across all categories.
    pub fn failure_count(&self) -> usize {
        self.failed_to_create.len() + self.failed_to_update.len() + self.failed_to_delete.len()
    }

    /// Whether every attempted action succeeded.
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}
