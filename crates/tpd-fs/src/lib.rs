//! Filesystem layer for tpd-filesystem
//!
//! Provides anchored path resolution, the filesystem port the reconciliation
//! engine mutates through, write options and format-agnostic document loading.

pub mod config;
pub mod error;
pub mod ops;
pub mod options;
pub mod path;

pub use config::{DocumentStore, Format};
pub use error::{Error, Result};
pub use ops::{FileSystem, OsFileSystem, Probe};
pub use options::{Encoding, WriteOptions, parse_mode};
pub use path::{normalize, resolve, resolve_base};
