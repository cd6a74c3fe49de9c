//! Confirmation gate
//!
//! Sits between planning and applying. Every non-empty category is shown to
//! the gate; in interactive mode each one must also be acknowledged, and a
//! single cancellation stops the whole reconciliation before anything is
//! applied.

use crate::Result;
use crate::plan::{ActionPlan, Category, PlanEntry};

/// An operator's answer to one prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Cancel,
}

/// Outcome of the whole confirmation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Approved,
    /// The operator cancelled while `category` was shown
    Cancelled { category: Category },
}

/// Presentation collaborator.
pub trait ConfirmationGate {
    /// Show one category's destinations and its summary line.
    fn present(&mut self, category: Category, summary: &str, entries: &[PlanEntry]);

    /// Block until the operator continues or cancels.
    ///
    /// Only called in interactive mode, right after `present`.
    fn acknowledge(&mut self, category: Category) -> Result<Decision>;
}

/// Gate that shows nothing and never blocks.
///
/// For embedding contexts with no operator; combine with a non-interactive
/// configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentGate;

impl ConfirmationGate for SilentGate {
    fn present(&mut self, _category: Category, _summary: &str, _entries: &[PlanEntry]) {}

    fn acknowledge(&mut self, _category: Category) -> Result<Decision> {
        Ok(Decision::Proceed)
    }
}

/// Walk the plan's non-empty categories through `gate`.
pub fn confirm(plan: &ActionPlan, interactive: bool, gate: &mut dyn ConfirmationGate) -> Result<Confirmation> {
    for (category, entries) in plan.iter() {
        if entries.is_empty() {
            continue;
        }

        gate.present(category, category.summary(), entries);

        if interactive && gate.acknowledge(category)? == Decision::Cancel {
            tracing::info!(%category, "Reconciliation cancelled at confirmation");
            return Ok(Confirmation::Cancelled { category });
        }
    }

    Ok(Confirmation::Approved)
}
