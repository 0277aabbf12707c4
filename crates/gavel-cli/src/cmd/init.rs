use crate::cmd::open_ledger;
use crate::output::{OutputMode, render};
use anyhow::{Context as _, Result};
use clap::Args;
use gavel_core::Event;
use serde::Serialize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Adoption mode recorded in the first event (`greenfield` for a new
    /// project, `brownfield` when adopting governance on existing code).
    #[arg(long, default_value = "greenfield")]
    pub mode: String,

    /// Append another `project_init` even if the ledger already exists.
    #[arg(long)]
    pub force: bool,
}

const CONFIG_TOML: &str = "[ledger]\n\
    path = \".gavel/events.ndjson\"\n\
    \n\
    [artifacts]\n\
    paths = [\"docs/adr/\", \"docs/prd/\", \"docs/obpi/\", \"CONSTITUTION.md\"]\n";

#[derive(Serialize)]
struct InitResult {
    ledger: String,
    mode: String,
}

/// Execute `gv init`: create `.gavel/` with a config template and the
/// ledger file, then record `project_init` as the first event.
///
/// # Errors
///
/// Fails if the ledger already exists (without `--force`) or on any
/// filesystem error.
pub fn run_init(args: &InitArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let ledger = open_ledger(project_root)?;
    if ledger.exists() && !args.force {
        anyhow::bail!(
            "ledger already exists at {}. Use `gv init --force` to record another project_init.",
            ledger.path().display()
        );
    }

    let config_path = project_root.join(".gavel/config.toml");
    if !config_path.exists() {
        std::fs::create_dir_all(project_root.join(".gavel"))
            .with_context(|| "Failed to create .gavel directory")?;
        std::fs::write(&config_path, CONFIG_TOML)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
    }

    let project_id = project_root
        .file_name()
        .map_or_else(|| "project".to_string(), |n| n.to_string_lossy().into_owned());

    ledger.create()?;
    ledger.append(&Event::project_init(project_id, &args.mode))?;

    let result = InitResult {
        ledger: ledger.path().display().to_string(),
        mode: args.mode.clone(),
    };
    render(output, &result, |r, w| {
        writeln!(w, "✓ Initialized governance ledger ({} mode).", r.mode)?;
        writeln!(w)?;
        writeln!(w, "  Ledger: {}", r.ledger)?;
        writeln!(w, "  Config: .gavel/config.toml")?;
        writeln!(w)?;
        writeln!(w, "Next steps:")?;
        writeln!(w, "  gv record prd PRD-1")?;
        writeln!(w, "  gv record adr ADR-0.1.0 --parent OBPI-1 --lane lite")
    })
}
