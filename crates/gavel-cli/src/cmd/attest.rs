use crate::cmd::open_ledger;
use crate::output::{OutputMode, render};
use anyhow::Result;
use clap::Args;
use gavel_core::Event;
use std::path::Path;

#[derive(Args, Debug)]
pub struct AttestArgs {
    /// Identifier of the artifact being attested.
    pub id: String,

    /// Terminal status, e.g. `completed`.
    #[arg(long)]
    pub status: String,

    /// Actor recording the attestation.
    #[arg(long)]
    pub by: String,

    /// Optional free-form justification.
    #[arg(long)]
    pub reason: Option<String>,
}

/// Execute `gv attest`: append one `attested` event.
///
/// # Errors
///
/// Fails on any ledger write error.
pub fn run_attest(args: &AttestArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let ledger = open_ledger(project_root)?;
    let event = Event::attested(&args.id, &args.status, &args.by, args.reason.clone());
    ledger.append(&event)?;

    render(output, &event, |e, w| {
        writeln!(w, "✓ Attested {} ({}) by {}", e.id, args.status, args.by)
    })
}
