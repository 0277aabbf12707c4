//! Command handlers, one module per subcommand.

pub mod attest;
pub mod edit_hook;
pub mod gate;
pub mod gates;
pub mod init;
pub mod log;
pub mod pending;
pub mod record;
pub mod rename;
pub mod status;

use gavel_core::Ledger;
use gavel_core::config::load_project_config;
use std::path::Path;

/// Open the ledger for a project rooted at `root`, honoring the configured
/// ledger path.
pub fn open_ledger(root: &Path) -> anyhow::Result<Ledger> {
    let config = load_project_config(root)?;
    Ok(Ledger::new(config.ledger_path(root)))
}
