//! gavel-core library.
//!
//! Core of the gavel governance ledger: an append-only event log plus the
//! derived views that answer every question about current governance state
//! by replaying that log.
//!
//! Conventions:
//!
//! - **Errors**: typed `thiserror` enums in the library; `anyhow::Result`
//!   at the binary boundary.
//! - **Logging**: `tracing` macros (`debug!`, `warn!`); subscriber setup
//!   belongs to the binary.

pub mod canon;
pub mod config;
pub mod error;
pub mod event;
pub mod store;
pub mod views;

pub use canon::RenameMap;
pub use config::ProjectConfig;
pub use error::ErrorCode;
pub use event::{Event, EventData, EventKind};
pub use store::{Ledger, StoreError};
pub use views::{ArtifactGraph, ArtifactNode};
