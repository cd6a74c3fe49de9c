//! Error types for tpd-fs

use std::path::PathBuf;

/// Result type for tpd-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tpd-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} document at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported document format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid file mode {value:?}: expected an octal string such as \"644\"")]
    InvalidMode { value: String },

    #[error("Unknown encoding: {name}")]
    UnknownEncoding { name: String },

    #[error("Content is not valid {encoding}: {message}")]
    Encoding { encoding: String, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The underlying failure message, without the path prefix.
    ///
    /// Reports already key failures by destination, so only the cause is kept.
    pub fn reason(&self) -> String {
        match self {
            Self::Io { source, .. } => source.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_strips_path_from_io_errors() {
        let err = Error::io("/tmp/x", std::io::Error::other("Failed to write file"));
        assert_eq!(err.reason(), "Failed to write file");
        assert!(err.to_string().contains("/tmp/x"));
    }

    #[test]
    fn reason_keeps_full_message_for_other_errors() {
        let err = Error::UnknownEncoding {
            name: "klingon".into(),
        };
        assert_eq!(err.reason(), "Unknown encoding: klingon");
    }
}
