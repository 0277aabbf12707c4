use crate::cmd::open_ledger;
use crate::output::{OutputMode, render};
use anyhow::Result;
use clap::Args;
use gavel_core::Event;
use std::path::Path;

#[derive(Args, Debug)]
pub struct GateArgs {
    /// Identifier of the decision record the gate belongs to.
    pub id: String,

    /// Gate number.
    #[arg(long)]
    pub gate: u32,

    /// Check outcome, e.g. `pass` or `fail`.
    #[arg(long)]
    pub status: String,

    /// Command that was executed for this gate.
    #[arg(long)]
    pub command: String,

    /// Exit code of the executed command.
    #[arg(long)]
    pub returncode: i64,

    /// Optional pointer to supporting evidence (log file, report).
    #[arg(long)]
    pub evidence: Option<String>,
}

/// Execute `gv gate`: append one `gate_checked` event.
///
/// # Errors
///
/// Fails on any ledger write error.
pub fn run_gate(args: &GateArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let ledger = open_ledger(project_root)?;
    let event = Event::gate_checked(
        &args.id,
        args.gate,
        &args.status,
        &args.command,
        args.returncode,
        args.evidence.clone(),
    );
    ledger.append(&event)?;

    render(output, &event, |e, w| {
        writeln!(w, "✓ Gate {} {} for {}", args.gate, args.status, e.id)
    })
}
