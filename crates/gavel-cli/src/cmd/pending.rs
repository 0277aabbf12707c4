use crate::cmd::open_ledger;
use crate::output::{OutputMode, render};
use anyhow::Result;
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct PendingArgs {}

/// Execute `gv pending`: list decision records that have no attestation
/// yet. Returns `true` when any are pending; the caller maps that to a
/// nonzero exit code so CI pipelines can gate on attestation.
///
/// # Errors
///
/// Fails on any ledger read error.
pub fn run_pending(_args: &PendingArgs, output: OutputMode, project_root: &Path) -> Result<bool> {
    let ledger = open_ledger(project_root)?;
    let pending = ledger.pending_attestations()?;

    render(output, &pending, |pending: &Vec<String>, w| {
        if pending.is_empty() {
            writeln!(w, "All decision records attested.")?;
            return Ok(());
        }
        writeln!(w, "Pending attestation:")?;
        for id in pending {
            writeln!(w, "  {id}")?;
        }
        Ok(())
    })?;

    Ok(!pending.is_empty())
}
