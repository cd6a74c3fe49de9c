//! Action plan
//!
//! Maps each action [`Category`] to the destinations classified into it. A
//! destination appears at most once across the whole plan: the last intent
//! classified for it wins.

mod classify;

pub use classify::{Classifier, Facts, Verdict, judge};

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::intent::ValidIntent;

/// What will happen to a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Never attempted: missing base directory or a directory in the way
    Reject,
    Delete,
    Update,
    Create,
    /// Deleting something already absent
    Ignore,
}

impl Category {
    /// Every category, in presentation and apply order.
    pub const ALL: [Category; 5] = [
        Category::Reject,
        Category::Delete,
        Category::Update,
        Category::Create,
        Category::Ignore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::Create => "create",
            Self::Ignore => "ignore",
        }
    }

    /// The line shown under a category's destinations at the confirmation gate.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Reject => "The above files cannot be created because of missing BaseDir",
            Self::Delete => "The above files will be deleted",
            Self::Update => "The above files content will be updated",
            Self::Create => "The above files will be created",
            Self::Ignore => "The above are ignored because deleting non existent files",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub destination: PathBuf,
    pub intent: ValidIntent,
    /// Why the category was chosen, when that is not obvious
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Intents grouped by category, each group in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPlan {
    buckets: [Vec<PlanEntry>; 5],
    /// Destination to its category and slot in that category's bucket
    index: HashMap<PathBuf, (Category, usize)>,
}

impl ActionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `entry` under `category`, replacing any earlier entry for the
    /// same destination.
    ///
    /// A replacement in the same category keeps the earlier position; one in
    /// a different category moves the destination to the end of `category`.
    /// Returns the replaced entry and the category it was in.
    pub fn insert(&mut self, category: Category, entry: PlanEntry) -> Option<(Category, PlanEntry)> {
        let Some(&(previous_category, slot)) = self.index.get(&entry.destination) else {
            self.push(category, entry);
            return None;
        };

        if previous_category == category {
            let previous = std::mem::replace(&mut self.buckets[category.index()][slot], entry);
            return Some((previous_category, previous));
        }

        let bucket = &mut self.buckets[previous_category.index()];
        let previous = bucket.remove(slot);
        for moved in &bucket[slot..] {
            if let Some(position) = self.index.get_mut(&moved.destination) {
                position.1 -= 1;
            }
        }
        self.push(category, entry);
        Some((previous_category, previous))
    }

    fn push(&mut self, category: Category, entry: PlanEntry) {
        let bucket = &mut self.buckets[category.index()];
        self.index.insert(entry.destination.clone(), (category, bucket.len()));
        bucket.push(entry);
    }

    pub fn entries(&self, category: Category) -> &[PlanEntry] {
        &self.buckets[category.index()]
    }

    /// Destinations of one category, in order.
    pub fn destinations(&self, category: Category) -> Vec<&Path> {
        self.entries(category)
            .iter()
            .map(|entry| entry.destination.as_path())
            .collect()
    }

    /// Every category with its entries, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[PlanEntry])> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.entries(category)))
    }

    /// Where a destination ended up, if anywhere.
    pub fn category_of(&self, destination: &Path) -> Option<Category> {
        self.index.get(destination).map(|(category, _)| *category)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl Serialize for ActionPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Category::ALL.len()))?;
        for (category, entries) in self.iter() {
            map.serialize_entry(category.as_str(), entries)?;
        }
        map.end()
    }
}
