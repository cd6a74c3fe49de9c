//! Shared test utilities for the tpd-filesystem workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`root`]: [`TestRoot`] temporary reconciliation root
//! - [`fixtures`]: the standard create/update/delete intent sets
//! - [`fs`]: [`FaultyFs`], a filesystem whose primitives can be made to fail
//! - [`gate`]: [`ScriptedGate`], a confirmation gate with canned answers
//! - [`observer`]: [`RecordingObserver`], which keeps every event it sees

pub mod fixtures;
pub mod fs;
pub mod gate;
pub mod observer;
pub mod root;

pub use fs::{FaultyFs, Op};
pub use gate::{Prompt, ScriptedGate};
pub use observer::RecordingObserver;
pub use root::TestRoot;
