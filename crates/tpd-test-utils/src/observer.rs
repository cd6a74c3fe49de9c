//! [`RecordingObserver`]: keeps every event it sees.

use std::cell::RefCell;
use std::rc::Rc;

use tpd_core::{Event, Observer};

/// Records each event's display form. Clones share the record.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<String>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    /// Events starting with `prefix`, e.g. `"invalid"` or `"failed"`.
    pub fn matching(&self, prefix: &str) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.starts_with(prefix))
            .cloned()
            .collect()
    }
}

impl Observer for RecordingObserver {
    fn observe(&self, event: &Event<'_>) {
        self.events.borrow_mut().push(event.to_string());
    }
}
