//! Error types for tpd-core
//!
//! Per-destination failures never surface here: they are recorded in the
//! [`Report`](crate::Report). These errors cover the few things that stop a
//! reconciliation from running at all.

use std::path::PathBuf;

/// Result type for tpd-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tpd-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The confirmation prompt itself could not be shown or read
    #[error("Confirmation prompt failed: {source}")]
    Gate {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configured root could not be made absolute
    #[error("Cannot anchor root {path}: {source}")]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error from tpd-fs
    #[error(transparent)]
    Fs(#[from] tpd_fs::Error),
}

impl Error {
    /// Wrap whatever stopped the prompt, keeping it as the error source.
    pub fn gate(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Gate {
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn gate_error_keeps_its_source() {
        let error = Error::gate(std::io::Error::other("not a terminal"));

        assert_eq!(error.to_string(), "Confirmation prompt failed: not a terminal");
        let source = error.source().expect("gate error should carry a source");
        assert!(source.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn gate_error_from_message() {
        assert_eq!(Error::gate("closed").to_string(), "Confirmation prompt failed: closed");
    }
}
