//! Observability port
//!
//! Components report what they decide and do through an [`Observer`] handed
//! to them at construction. Observers are a side channel: nothing they do
//! feeds back into control flow.

use std::fmt;
use std::path::Path;

use tpd_fs::Probe;

use crate::plan::Category;
use crate::validate::InvalidIntent;

/// A diagnostic event.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// An intent failed validation
    InvalidIntent { invalid: &'a InvalidIntent },
    /// A destination was inspected before classification
    Probed { destination: &'a Path, probe: &'a Probe },
    /// An intent was assigned a category
    Classified {
        category: Category,
        destination: &'a Path,
        message: Option<&'a str>,
    },
    /// A planned action succeeded
    Applied { category: Category, destination: &'a Path },
    /// A planned action failed; the batch carries on
    Failed {
        category: Category,
        destination: &'a Path,
        message: &'a str,
    },
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIntent { invalid } => write!(f, "invalid #{}: {}", invalid.index, invalid.describe()),
            Self::Probed { destination, probe } => write!(f, "probed {}: {:?}", destination.display(), probe),
            Self::Classified {
                category,
                destination,
                message,
            } => match message {
                Some(message) => write!(f, "classified {} {}: {}", category, destination.display(), message),
                None => write!(f, "classified {} {}", category, destination.display()),
            },
            Self::Applied { category, destination } => write!(f, "applied {} {}", category, destination.display()),
            Self::Failed {
                category,
                destination,
                message,
            } => write!(f, "failed {} {}: {}", category, destination.display(), message),
        }
    }
}

/// Receives diagnostic events.
pub trait Observer {
    fn observe(&self, event: &Event<'_>);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, event: &Event<'_>) {
        match event {
            Event::InvalidIntent { invalid } => {
                tracing::warn!(
                    index = invalid.index,
                    intent = ?invalid.intent,
                    "Intent is missing one or more properties: {}",
                    invalid.describe()
                );
            }
            Event::Probed { destination, probe } => {
                tracing::trace!(?destination, ?probe, "Checking destination");
            }
            Event::Classified {
                category,
                destination,
                message,
            } => {
                tracing::debug!(%category, ?destination, message = message.unwrap_or(""), "Classified intent");
            }
            Event::Applied { category, destination } => {
                tracing::debug!(%category, ?destination, "Applied");
            }
            Event::Failed {
                category,
                destination,
                message,
            } => {
                tracing::warn!(%category, ?destination, "Failed to apply: {}", message);
            }
        }
    }
}

impl<T: Observer + ?Sized> Observer for &T {
    fn observe(&self, event: &Event<'_>) {
        (**self).observe(event)
    }
}
