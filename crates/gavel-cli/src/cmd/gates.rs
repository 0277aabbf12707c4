use crate::cmd::open_ledger;
use crate::output::{OutputMode, render};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Args, Debug)]
pub struct GatesArgs {
    /// Decision record identifier; old identifiers resolve through the
    /// rename history.
    pub id: String,
}

#[derive(Serialize)]
struct GatesResult {
    id: String,
    gates: BTreeMap<u32, String>,
}

/// Execute `gv gates`: print the latest status per gate number for one
/// decision record.
///
/// # Errors
///
/// Fails on any ledger read error.
pub fn run_gates(args: &GatesArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let ledger = open_ledger(project_root)?;
    let result = GatesResult {
        id: ledger.canonical_id(&args.id)?,
        gates: ledger.latest_gate_statuses(&args.id)?,
    };

    render(output, &result, |r, w| {
        if r.gates.is_empty() {
            writeln!(w, "No gate checks recorded for {}.", r.id)?;
            return Ok(());
        }
        writeln!(w, "Gates for {}:", r.id)?;
        for (gate, status) in &r.gates {
            writeln!(w, "  gate {gate}: {status}")?;
        }
        Ok(())
    })
}
