use crate::cmd::open_ledger;
use crate::output::{OutputMode, render};
use anyhow::Result;
use clap::Subcommand;
use gavel_core::Event;
use std::path::Path;

/// Which creation event to append.
#[derive(Subcommand, Debug)]
pub enum RecordArtifact {
    /// Record creation of a product requirements document.
    Prd {
        /// Artifact identifier, e.g. `PRD-1`.
        id: String,
    },

    /// Record creation of the project constitution.
    Constitution {
        /// Artifact identifier, e.g. `CONST-1`.
        id: String,
    },

    /// Record creation of an outcome-based plan item.
    Obpi {
        /// Artifact identifier, e.g. `OBPI-1`.
        id: String,

        /// Identifier of the governing artifact.
        #[arg(long)]
        parent: String,
    },

    /// Record creation of an architecture decision record.
    Adr {
        /// Artifact identifier, e.g. `ADR-0.1.0`.
        id: String,

        /// Identifier of the governing artifact.
        #[arg(long)]
        parent: String,

        /// Review lane for this decision.
        #[arg(long, default_value = "lite")]
        lane: String,
    },
}

impl RecordArtifact {
    fn to_event(&self) -> Event {
        match self {
            Self::Prd { id } => Event::prd_created(id),
            Self::Constitution { id } => Event::constitution_created(id),
            Self::Obpi { id, parent } => Event::obpi_created(id, parent),
            Self::Adr { id, parent, lane } => Event::adr_created(id, parent, lane),
        }
    }
}

/// Execute `gv record <artifact>`: append one creation event.
///
/// # Errors
///
/// Fails on any ledger write error.
pub fn run_record(artifact: &RecordArtifact, output: OutputMode, project_root: &Path) -> Result<()> {
    let ledger = open_ledger(project_root)?;
    let event = artifact.to_event();
    ledger.append(&event)?;

    render(output, &event, |e, w| {
        writeln!(w, "✓ Recorded {} for {}", e.kind, e.id)
    })
}
