//! Reconciliation and apply engine for tpd-filesystem
//!
//! Converges a filesystem subtree towards a declared set of file intents:
//!
//! - **Validation**: raw [`Intent`]s become [`ValidIntent`]s or are reported
//! - **Classification**: each valid intent gets exactly one [`Category`]
//! - **Confirmation**: a [`ConfirmationGate`] sees the plan and may cancel it
//! - **Apply**: mutations run per destination, failures land in the [`Report`]
//!
//! # Architecture
//!
//! ```text
//!   Validator -> Classifier -> confirm() -> Executor -> Report
//!        \___________ Reconciler::reconcile ___________/
//!                          |
//!                       tpd-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use tpd_core::{Intent, Outcome, ReconcileConfig, Reconciler, SilentGate};
//!
//! fn example() -> tpd_core::Result<()> {
//!     let config = ReconcileConfig::new("/srv/site").with_interactive(false);
//!     let mut reconciler = Reconciler::new(config, Box::new(SilentGate))?;
//!
//!     let intents = vec![Intent::write(".", "index.html", "<h1>hi</h1>")];
//!     if let Outcome::Completed(report) = reconciler.reconcile(&intents)? {
//!         println!("created {:?}", report.created);
//!     }
//!     Ok(())
//! }
//! ```

pub mod apply;
pub mod config;
pub mod error;
pub mod gate;
pub mod intent;
pub mod observe;
pub mod plan;
pub mod reconciler;
pub mod report;
pub mod validate;

pub use apply::Executor;
pub use config::ReconcileConfig;
pub use error::{Error, Result};
pub use gate::{Confirmation, ConfirmationGate, Decision, SilentGate, confirm};
pub use intent::{DestinationParams, DestinationSpec, Desired, FILESYSTEM_DESTINATION, Intent, ValidIntent};
pub use observe::{Event, Observer, TracingObserver};
pub use plan::{ActionPlan, Category, Classifier, PlanEntry};
pub use reconciler::{Outcome, Planned, Reconciler};
pub use report::{Failure, Report};
pub use validate::{Defect, InvalidIntent, Validation, Validator};
