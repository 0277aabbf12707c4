use crate::cmd::open_ledger;
use crate::output::{OutputMode, render};
use anyhow::Result;
use clap::Args;
use gavel_core::{Event, EventKind};
use std::path::Path;

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Only events of this kind, e.g. `gate_checked`.
    #[arg(long)]
    pub kind: Option<String>,

    /// Only events recorded under exactly this identifier. Not
    /// canonicalized: events stay addressable under the id they were
    /// written with, even after a rename.
    #[arg(long)]
    pub id: Option<String>,

    /// Show only the last N matching events.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Execute `gv log`: print recorded events in append order.
///
/// # Errors
///
/// Fails on an unknown `--kind` value or any ledger read error.
pub fn run_log(args: &LogArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<EventKind>)
        .transpose()?;

    let ledger = open_ledger(project_root)?;
    let mut events = ledger.query(kind, args.id.as_deref())?;
    if let Some(limit) = args.limit {
        let skip = events.len().saturating_sub(limit);
        events.drain(..skip);
    }

    render(output, &events, |events: &Vec<Event>, w| {
        if events.is_empty() {
            writeln!(w, "No events recorded.")?;
            return Ok(());
        }
        for event in events {
            writeln!(w, "{event}")?;
        }
        Ok(())
    })
}
