use crate::cmd::open_ledger;
use crate::output::{OutputMode, render};
use anyhow::Result;
use clap::Args;
use gavel_core::ArtifactNode;
use serde::Serialize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only artifacts of this type (`prd`, `constitution`, `obpi`, `adr`).
    #[arg(long)]
    pub artifact_type: Option<String>,
}

#[derive(Serialize)]
struct StatusEntry {
    id: String,
    #[serde(flatten)]
    node: ArtifactNode,
}

/// Execute `gv status`: print the derived artifact graph, one artifact
/// per entry, in creation order.
///
/// # Errors
///
/// Fails on any ledger read error.
pub fn run_status(args: &StatusArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let ledger = open_ledger(project_root)?;
    let graph = ledger.artifact_graph()?;

    let entries: Vec<StatusEntry> = graph
        .iter()
        .filter(|(_, node)| {
            args.artifact_type
                .as_deref()
                .is_none_or(|t| node.artifact_type == t)
        })
        .map(|(id, node)| StatusEntry {
            id: id.to_string(),
            node: node.clone(),
        })
        .collect();

    render(output, &entries, |entries: &Vec<StatusEntry>, w| {
        if entries.is_empty() {
            writeln!(w, "No artifacts recorded.")?;
            return Ok(());
        }
        for entry in entries {
            let node = &entry.node;
            let attested = if node.attested {
                node.attestation_status.as_deref().unwrap_or("attested")
            } else {
                "pending"
            };
            write!(w, "{:<14} {:<12} [{attested}]", entry.id, node.artifact_type)?;
            if let Some(parent) = &node.parent {
                write!(w, " parent={parent}")?;
            }
            if !node.children.is_empty() {
                write!(w, " children={}", node.children.join(","))?;
            }
            writeln!(w)?;
        }
        Ok(())
    })
}
