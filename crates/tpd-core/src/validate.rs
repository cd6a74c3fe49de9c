//! Intent validation
//!
//! The boundary between raw [`Intent`]s and the typed [`ValidIntent`]s the
//! rest of the engine accepts.

use std::fmt;

use serde::Serialize;

use crate::intent::{Desired, FILESYSTEM_DESTINATION, Intent, ValidIntent};
use crate::observe::{Event, Observer};

/// Why an intent is structurally incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Defect {
    MissingTemplate,
    MissingDestination,
    WrongDestinationType,
    MissingParams,
    MissingBaseDir,
    MissingRelativePath,
    MissingContent,
}

impl Defect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingTemplate => "missing template",
            Self::MissingDestination => "missing destination",
            Self::WrongDestinationType => "destination type is not tpd-filesystem",
            Self::MissingParams => "missing destination params",
            Self::MissingBaseDir => "missing baseDir",
            Self::MissingRelativePath => "missing filepath",
            Self::MissingContent => "missing rendered content",
        }
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An intent that failed validation, kept whole for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidIntent {
    pub index: usize,
    pub defects: Vec<Defect>,
    pub intent: Intent,
}

impl InvalidIntent {
    /// Defects joined for display.
    pub fn describe(&self) -> String {
        self.defects
            .iter()
            .map(Defect::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Result of splitting intents at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub valid: Vec<ValidIntent>,
    pub invalid: Vec<InvalidIntent>,
}

/// List everything wrong with `intent`. Empty means valid.
pub fn defects(intent: &Intent) -> Vec<Defect> {
    let mut found = Vec::new();

    if intent.template.is_none() {
        found.push(Defect::MissingTemplate);
    }

    match &intent.destination {
        None => found.push(Defect::MissingDestination),
        Some(destination) => {
            if destination.kind.as_deref() != Some(FILESYSTEM_DESTINATION) {
                found.push(Defect::WrongDestinationType);
            }
            match &destination.params {
                None => found.push(Defect::MissingParams),
                Some(params) => {
                    if params.base_dir.as_deref().is_none_or(str::is_empty) {
                        found.push(Defect::MissingBaseDir);
                    }
                    if params.relative_path.as_deref().is_none_or(str::is_empty) {
                        found.push(Defect::MissingRelativePath);
                    }
                }
            }
        }
    }

    if matches!(intent.template, Some(Some(_))) && intent.content.is_none() {
        found.push(Defect::MissingContent);
    }

    found
}

/// Splits intents into valid and invalid, reporting each invalid one.
pub struct Validator<'a> {
    observer: &'a dyn Observer,
}

impl<'a> Validator<'a> {
    pub fn new(observer: &'a dyn Observer) -> Self {
        Self { observer }
    }

    /// The intents failing validation, in input order.
    ///
    /// The observer sees each one once. The input is left untouched; what to
    /// do with the result is the caller's policy.
    pub fn filter_invalid(&self, intents: &[Intent]) -> Vec<InvalidIntent> {
        intents
            .iter()
            .enumerate()
            .filter_map(|(index, intent)| self.check(index, intent).err())
            .collect()
    }

    /// Convert every intent, collecting the invalid ones separately.
    pub fn validate(&self, intents: &[Intent]) -> Validation {
        let mut validation = Validation::default();
        for (index, intent) in intents.iter().enumerate() {
            match self.check(index, intent) {
                Ok(valid) => validation.valid.push(valid),
                Err(invalid) => validation.invalid.push(invalid),
            }
        }
        validation
    }

    fn check(&self, index: usize, intent: &Intent) -> Result<ValidIntent, InvalidIntent> {
        let found = defects(intent);
        if !found.is_empty() {
            let invalid = InvalidIntent {
                index,
                defects: found,
                intent: intent.clone(),
            };
            self.observer.observe(&Event::InvalidIntent { invalid: &invalid });
            return Err(invalid);
        }

        Ok(into_valid(index, intent))
    }
}

/// Only called once `defects` came back empty.
fn into_valid(index: usize, intent: &Intent) -> ValidIntent {
    let params = intent.params().cloned().unwrap_or_default();
    let desired = match (&intent.template, &intent.content) {
        (Some(Some(_)), Some(content)) => Desired::Write {
            content: content.clone(),
        },
        _ => Desired::Delete,
    };

    ValidIntent {
        index,
        base_dir: params.base_dir.unwrap_or_default(),
        relative_path: params.relative_path.unwrap_or_default(),
        desired,
        encoding: params.encoding,
        mode: params.mode,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::TracingObserver;

    #[test]
    fn write_and_delete_builders_are_valid() {
        assert!(defects(&Intent::write(".", "a.txt", "x")).is_empty());
        assert!(defects(&Intent::delete(".", "a.txt")).is_empty());
    }

    #[test]
    fn empty_content_is_valid() {
        assert!(defects(&Intent::write(".", "a.txt", "")).is_empty());
    }

    #[test]
    fn deletion_ignores_stray_content() {
        let mut intent = Intent::delete(".", "a.txt");
        intent.content = Some("leftover".into());

        let valid = Validator::new(&TracingObserver).validate(&[intent]).valid;
        assert!(valid[0].is_deletion());
    }

    #[test]
    fn empty_intent_lists_every_top_level_defect() {
        assert_eq!(
            defects(&Intent::default()),
            vec![Defect::MissingTemplate, Defect::MissingDestination]
        );
    }
}
