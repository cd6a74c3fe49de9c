//! [`ScriptedGate`]: a confirmation gate with canned answers.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;

use tpd_core::{Category, ConfirmationGate, Decision, PlanEntry, Result};

/// What the gate was shown for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub category: Category,
    pub summary: String,
    pub entries: Vec<(PathBuf, Option<String>)>,
    pub acknowledged: bool,
}

/// Answers acknowledgments from a script; proceeds once the script runs out.
///
/// Clones share their log, so a test can keep one handle and box the other.
#[derive(Debug, Default, Clone)]
pub struct ScriptedGate {
    answers: Rc<RefCell<VecDeque<Decision>>>,
    log: Rc<RefCell<Vec<Prompt>>>,
}

impl ScriptedGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the prompts, in order, with `answers`.
    pub fn answering(answers: impl IntoIterator<Item = Decision>) -> Self {
        let gate = Self::default();
        gate.answers.borrow_mut().extend(answers);
        gate
    }

    /// Every presentation so far.
    pub fn prompts(&self) -> Vec<Prompt> {
        self.log.borrow().clone()
    }

    /// Categories presented so far, in order.
    pub fn categories(&self) -> Vec<Category> {
        self.log.borrow().iter().map(|prompt| prompt.category).collect()
    }
}

impl ConfirmationGate for ScriptedGate {
    fn present(&mut self, category: Category, summary: &str, entries: &[PlanEntry]) {
        self.log.borrow_mut().push(Prompt {
            category,
            summary: summary.to_string(),
            entries: entries
                .iter()
                .map(|entry| (entry.destination.clone(), entry.message.clone()))
                .collect(),
            acknowledged: false,
        });
    }

    fn acknowledge(&mut self, _category: Category) -> Result<Decision> {
        if let Some(prompt) = self.log.borrow_mut().last_mut() {
            prompt.acknowledged = true;
        }
        Ok(self.answers.borrow_mut().pop_front().unwrap_or(Decision::Proceed))
    }
}
