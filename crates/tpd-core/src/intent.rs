//! File intents
//!
//! An [`Intent`] is the raw desired-state unit as the template renderer hands
//! it over, field for field. Nothing about it is trusted: every field is
//! optional and validation turns complete intents into [`ValidIntent`]s,
//! which is what the rest of the engine works with.

use serde::{Deserialize, Deserializer, Serialize};

/// Discriminator marking an intent as targeting the filesystem.
pub const FILESYSTEM_DESTINATION: &str = "tpd-filesystem";

/// A declared desired file state, as received.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Source template.
    ///
    /// Absent means the intent is incomplete, `null` declares a deletion and a
    /// name declares a write.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub template: Option<Option<String>>,

    /// Rendered file content
    #[serde(
        default,
        rename = "renderedTemplate",
        alias = "content",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<DestinationSpec>,
}

/// Where an intent should land.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationSpec {
    /// Must equal [`FILESYSTEM_DESTINATION`]
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<DestinationParams>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationParams {
    /// Directory anchor, relative to the reconciliation root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<String>,

    /// Target file, relative to `base_dir`
    #[serde(
        default,
        rename = "filepath",
        alias = "relativePath",
        skip_serializing_if = "Option::is_none"
    )]
    pub relative_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,

    /// Octal permission string, e.g. `"644"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Intent {
    /// An intent writing `content` to `relative_path` under `base_dir`.
    ///
    /// The template name defaults to the relative path.
    pub fn write(
        base_dir: impl Into<String>,
        relative_path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let relative_path = relative_path.into();
        Self {
            template: Some(Some(relative_path.clone())),
            content: Some(content.into()),
            destination: Some(DestinationSpec::filesystem(base_dir.into(), relative_path)),
        }
    }

    /// An intent removing `relative_path` under `base_dir`.
    pub fn delete(base_dir: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            template: Some(None),
            content: None,
            destination: Some(DestinationSpec::filesystem(base_dir.into(), relative_path.into())),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(Some(template.into()));
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.params_mut().encoding = Some(encoding.into());
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.params_mut().mode = Some(mode.into());
        self
    }

    /// Whether the intent declares a deletion.
    pub fn is_deletion(&self) -> bool {
        matches!(self.template, Some(None))
    }

    pub fn params(&self) -> Option<&DestinationParams> {
        self.destination.as_ref()?.params.as_ref()
    }

    fn params_mut(&mut self) -> &mut DestinationParams {
        self.destination
            .get_or_insert_with(DestinationSpec::default)
            .params
            .get_or_insert_with(DestinationParams::default)
    }
}

impl DestinationSpec {
    fn filesystem(base_dir: String, relative_path: String) -> Self {
        Self {
            kind: Some(FILESYSTEM_DESTINATION.to_string()),
            params: Some(DestinationParams {
                base_dir: Some(base_dir),
                relative_path: Some(relative_path),
                encoding: None,
                mode: None,
            }),
        }
    }
}

/// What a valid intent wants at its destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Desired {
    Write { content: String },
    Delete,
}

/// An intent that passed validation.
///
/// Every field the engine needs is guaranteed present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidIntent {
    /// Position in the caller's input sequence
    pub index: usize,
    pub base_dir: String,
    pub relative_path: String,
    pub desired: Desired,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl ValidIntent {
    pub fn is_deletion(&self) -> bool {
        matches!(self.desired, Desired::Delete)
    }

    /// Content to write, `None` for deletions.
    pub fn content(&self) -> Option<&str> {
        match &self.desired {
            Desired::Write { content } => Some(content),
            Desired::Delete => None,
        }
    }
}
