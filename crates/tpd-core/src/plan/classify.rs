//! Classification of valid intents against observed filesystem state

use std::path::Path;

use tpd_fs::{FileSystem, Probe};

use super::{ActionPlan, Category, PlanEntry};
use crate::intent::ValidIntent;
use crate::observe::{Event, Observer};

/// Everything classification looks at for one intent.
#[derive(Debug, Clone, Copy)]
pub struct Facts<'a> {
    pub base_exists: bool,
    pub destination: &'a Probe,
    pub deleting: bool,
}

/// The rule that decided an intent's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    MissingBaseDir,
    NothingToDelete,
    Create,
    IsDirectory,
    /// A write onto a fifo, socket or device, which could block forever
    NotRegularFile,
    Delete,
    Update,
}

impl Verdict {
    pub fn category(&self) -> Category {
        match self {
            Self::MissingBaseDir | Self::IsDirectory | Self::NotRegularFile => Category::Reject,
            Self::NothingToDelete => Category::Ignore,
            Self::Create => Category::Create,
            Self::Delete => Category::Delete,
            Self::Update => Category::Update,
        }
    }
}

/// First match wins; the order of these checks is load-bearing.
///
/// An unreadable destination counts as absent.
pub fn judge(facts: Facts<'_>) -> Verdict {
    let destination_exists = facts.destination.exists();

    if !facts.base_exists {
        Verdict::MissingBaseDir
    } else if facts.deleting && !destination_exists {
        Verdict::NothingToDelete
    } else if !destination_exists {
        Verdict::Create
    } else if facts.destination.is_dir() {
        Verdict::IsDirectory
    } else if facts.deleting {
        Verdict::Delete
    } else if *facts.destination != Probe::File {
        Verdict::NotRegularFile
    } else {
        Verdict::Update
    }
}

/// Assigns each valid intent exactly one category.
pub struct Classifier<'a> {
    root: &'a Path,
    fs: &'a dyn FileSystem,
    observer: &'a dyn Observer,
}

impl<'a> Classifier<'a> {
    pub fn new(root: &'a Path, fs: &'a dyn FileSystem, observer: &'a dyn Observer) -> Self {
        Self { root, fs, observer }
    }

    /// Build the plan, in input order, last intent winning per destination.
    pub fn classify(&self, intents: impl IntoIterator<Item = ValidIntent>) -> ActionPlan {
        let mut plan = ActionPlan::new();

        for intent in intents {
            let (category, entry) = self.classify_one(intent);
            if let Some((previous, replaced)) = plan.insert(category, entry) {
                tracing::debug!(
                    destination = ?replaced.destination,
                    %previous,
                    replaced_index = replaced.intent.index,
                    "Later intent overrides earlier one for the same destination"
                );
            }
        }

        plan
    }

    fn classify_one(&self, intent: ValidIntent) -> (Category, PlanEntry) {
        let base_dir = tpd_fs::resolve_base(self.root, &intent.base_dir);
        let destination = tpd_fs::resolve(self.root, &intent.base_dir, &intent.relative_path);

        let probe = self.fs.probe(&destination);
        self.observer.observe(&Event::Probed {
            destination: &destination,
            probe: &probe,
        });

        let verdict = judge(Facts {
            base_exists: self.fs.exists(&base_dir),
            destination: &probe,
            deleting: intent.is_deletion(),
        });
        let category = verdict.category();
        let message = message_for(verdict, &base_dir);

        self.observer.observe(&Event::Classified {
            category,
            destination: &destination,
            message: message.as_deref(),
        });

        (
            category,
            PlanEntry {
                destination,
                intent,
                message,
            },
        )
    }
}

fn message_for(verdict: Verdict, base_dir: &Path) -> Option<String> {
    match verdict {
        Verdict::MissingBaseDir => Some(format!("{} does not exist", base_dir.display())),
        Verdict::NothingToDelete => Some("does not exist".to_string()),
        Verdict::IsDirectory => Some("seems to be a directory".to_string()),
        Verdict::NotRegularFile => Some("is not a regular file".to_string()),
        Verdict::Create | Verdict::Delete | Verdict::Update => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(base_exists: bool, destination: &Probe, deleting: bool) -> Facts<'_> {
        Facts {
            base_exists,
            destination,
            deleting,
        }
    }

    #[test]
    fn missing_base_dir_wins_over_deletion() {
        assert_eq!(judge(facts(false, &Probe::Missing, true)), Verdict::MissingBaseDir);
        assert_eq!(judge(facts(false, &Probe::File, false)), Verdict::MissingBaseDir);
    }

    #[test]
    fn deleting_missing_destination_is_ignored() {
        assert_eq!(judge(facts(true, &Probe::Missing, true)), Verdict::NothingToDelete);
    }

    #[test]
    fn directory_is_rejected_for_both_intents() {
        assert_eq!(judge(facts(true, &Probe::Directory, true)), Verdict::IsDirectory);
        assert_eq!(judge(facts(true, &Probe::Directory, false)), Verdict::IsDirectory);
    }

    #[test]
    fn unreadable_probe_counts_as_absent() {
        let probe = Probe::Unreadable("Permission denied".into());
        assert_eq!(judge(facts(true, &probe, false)), Verdict::Create);
        assert_eq!(judge(facts(true, &probe, true)), Verdict::NothingToDelete);
    }

    #[test]
    fn special_file_can_be_deleted_but_not_written() {
        assert_eq!(judge(facts(true, &Probe::Other, false)), Verdict::NotRegularFile);
        assert_eq!(judge(facts(true, &Probe::Other, true)), Verdict::Delete);
        assert_eq!(
            message_for(Verdict::NotRegularFile, Path::new("/root")).as_deref(),
            Some("is not a regular file")
        );
    }

    #[test]
    fn existing_file_is_updated_or_deleted() {
        assert_eq!(judge(facts(true, &Probe::File, false)), Verdict::Update);
        assert_eq!(judge(facts(true, &Probe::File, true)), Verdict::Delete);
    }
}
