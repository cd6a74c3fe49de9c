//! Reconciler
//!
//! Composes validation, classification, confirmation and apply into one
//! call. Everything it builds lives for that call only.

use std::path::{Path, PathBuf};

use tpd_fs::{FileSystem, OsFileSystem};

use crate::apply::Executor;
use crate::config::ReconcileConfig;
use crate::gate::{self, Confirmation, ConfirmationGate};
use crate::intent::Intent;
use crate::observe::{Observer, TracingObserver};
use crate::plan::{ActionPlan, Category, Classifier};
use crate::report::Report;
use crate::validate::{InvalidIntent, Validator};
use crate::{Error, Result};

/// Validation and classification, before anything is confirmed or applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Planned {
    pub plan: ActionPlan,
    pub invalid: Vec<InvalidIntent>,
}

/// How a reconciliation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The plan was applied; per-destination failures are in the report
    Completed(Report),
    /// The operator cancelled at the gate; nothing was applied
    Cancelled { category: Category },
}

impl Outcome {
    pub fn report(&self) -> Option<&Report> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Cancelled { .. } => None,
        }
    }

    pub fn into_report(self) -> Option<Report> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Cancelled { .. } => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Converges a filesystem subtree towards a set of intents.
///
/// Invalid intents are excluded and reported; the valid ones still go
/// through. Nothing guards against the tree changing between
/// classification and apply.
pub struct Reconciler {
    root: PathBuf,
    interactive: bool,
    fs: Box<dyn FileSystem>,
    gate: Box<dyn ConfirmationGate>,
    observer: Box<dyn Observer>,
}

impl Reconciler {
    /// Create a reconciler on the real filesystem, logging through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured root cannot be made absolute.
    pub fn new(config: ReconcileConfig, gate: Box<dyn ConfirmationGate>) -> Result<Self> {
        let root = std::path::absolute(&config.root).map_err(|source| Error::InvalidRoot {
            path: config.root.clone(),
            source,
        })?;

        Ok(Self {
            root: tpd_fs::normalize(&root),
            interactive: config.interactive,
            fs: Box::new(OsFileSystem),
            gate,
            observer: Box::new(TracingObserver),
        })
    }

    pub fn with_filesystem(mut self, fs: Box<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    /// The absolute anchor all intents resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Validate and classify without confirming or touching anything.
    pub fn plan(&self, intents: &[Intent]) -> Planned {
        let validation = Validator::new(self.observer.as_ref()).validate(intents);
        let plan = Classifier::new(&self.root, self.fs.as_ref(), self.observer.as_ref())
            .classify(validation.valid);

        Planned {
            plan,
            invalid: validation.invalid,
        }
    }

    /// Plan, confirm, then apply.
    ///
    /// # Errors
    ///
    /// Only fails if the confirmation gate itself fails. Cancellation is an
    /// [`Outcome`], and per-destination failures are in the report.
    pub fn reconcile(&mut self, intents: &[Intent]) -> Result<Outcome> {
        let Planned { plan, invalid } = self.plan(intents);

        tracing::debug!(
            root = ?self.root,
            planned = plan.len(),
            invalid = invalid.len(),
            "Planned reconciliation"
        );

        if let Confirmation::Cancelled { category } = gate::confirm(&plan, self.interactive, self.gate.as_mut())? {
            return Ok(Outcome::Cancelled { category });
        }

        let mut report = Executor::new(self.fs.as_ref(), self.observer.as_ref()).apply(&plan);
        report.invalid = invalid;

        Ok(Outcome::Completed(report))
    }
}
