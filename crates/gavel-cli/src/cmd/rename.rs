use crate::cmd::open_ledger;
use crate::output::{OutputMode, render};
use anyhow::Result;
use clap::Args;
use gavel_core::Event;
use std::path::Path;

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Identifier being retired.
    pub old_id: String,

    /// Identifier that replaces it.
    pub new_id: String,

    /// Optional free-form justification.
    #[arg(long)]
    pub reason: Option<String>,
}

/// Execute `gv rename`: append one `artifact_renamed` event. History
/// recorded under the old identifier stays in place; derived views regroup
/// it under the new identifier from now on.
///
/// # Errors
///
/// Fails on any ledger write error.
pub fn run_rename(args: &RenameArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let ledger = open_ledger(project_root)?;
    let event = Event::artifact_renamed(&args.old_id, &args.new_id, args.reason.clone());
    ledger.append(&event)?;

    render(output, &event, |e, w| {
        writeln!(w, "✓ Renamed {} -> {}", e.id, args.new_id)
    })
}
