use crate::cmd::open_ledger;
use crate::output::{OutputMode, render};
use anyhow::Result;
use clap::Args;
use gavel_core::Event;
use gavel_core::config::load_project_config;
use serde::Serialize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct EditHookArgs {
    /// Edited file, relative to the repository root.
    pub path: String,

    /// Optional editing-session identifier to correlate related edits.
    #[arg(long)]
    pub session: Option<String>,
}

#[derive(Serialize)]
struct EditHookResult {
    recorded: bool,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

/// Derive the artifact identifier from the edited file: the file name
/// without its extension (`docs/adr/ADR-0.1.0.md` -> `ADR-0.1.0`).
fn artifact_id_for(path: &str) -> Option<String> {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

/// Execute `gv edit-hook`: append `artifact_edited` when the path is a
/// tracked governance artifact and the ledger exists.
///
/// This runs from editor and agent hooks on every save, so both "path is
/// not tracked" and "ledger not initialized" exit quietly with success
/// and record nothing. A hook must never break a save.
///
/// # Errors
///
/// Fails only on config or ledger I/O errors.
pub fn run_edit_hook(args: &EditHookArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let config = load_project_config(project_root)?;
    let ledger = open_ledger(project_root)?;

    let skipped = |reason: &str| {
        tracing::debug!(path = %args.path, reason, "edit not recorded");
        let result = EditHookResult {
            recorded: false,
            path: args.path.clone(),
            id: None,
        };
        render(output, &result, |_, _| Ok(()))
    };

    if !ledger.exists() {
        return skipped("ledger not initialized");
    }
    if !config.tracks(&args.path) {
        return skipped("path not tracked");
    }
    let Some(id) = artifact_id_for(&args.path) else {
        return skipped("no artifact id derivable");
    };

    ledger.append(&Event::artifact_edited(&id, &args.path, args.session.clone()))?;

    let result = EditHookResult {
        recorded: true,
        path: args.path.clone(),
        id: Some(id),
    };
    render(output, &result, |r, w| {
        match &r.id {
            Some(id) => writeln!(w, "✓ Recorded edit to {id} ({})", r.path),
            None => Ok(()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gavel_core::EventKind;
    use tempfile::TempDir;

    fn hook(root: &Path, path: &str, session: Option<&str>) {
        let args = EditHookArgs {
            path: path.to_string(),
            session: session.map(String::from),
        };
        run_edit_hook(&args, OutputMode::Json, root).expect("edit-hook");
    }

    fn initialized(root: &Path) -> gavel_core::Ledger {
        let ledger = open_ledger(root).expect("open");
        ledger.create().expect("create");
        ledger
    }

    #[test]
    fn tracked_edit_is_recorded_with_derived_id() {
        let root = TempDir::new().expect("temp dir");
        let ledger = initialized(root.path());

        hook(root.path(), "docs/adr/ADR-0.1.0.md", Some("s-42"));

        let events = ledger.read_all().expect("read");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::ArtifactEdited);
        assert_eq!(events[0].id, "ADR-0.1.0");
    }

    #[test]
    fn constitution_file_tracked_by_exact_name() {
        let root = TempDir::new().expect("temp dir");
        let ledger = initialized(root.path());

        hook(root.path(), "CONSTITUTION.md", None);

        let events = ledger.read_all().expect("read");
        assert_eq!(events[0].id, "CONSTITUTION");
    }

    #[test]
    fn untracked_path_records_nothing() {
        let root = TempDir::new().expect("temp dir");
        let ledger = initialized(root.path());

        hook(root.path(), "src/main.rs", None);

        assert!(ledger.read_all().expect("read").is_empty());
    }

    #[test]
    fn uninitialized_ledger_exits_quietly() {
        let root = TempDir::new().expect("temp dir");
        hook(root.path(), "docs/adr/ADR-1.md", None);
        assert!(!root.path().join(".gavel/events.ndjson").exists());
    }

    #[test]
    fn artifact_id_strips_directory_and_extension() {
        assert_eq!(
            artifact_id_for("docs/adr/ADR-0.1.0.md").as_deref(),
            Some("ADR-0.1.0")
        );
        assert_eq!(artifact_id_for("CONSTITUTION.md").as_deref(), Some("CONSTITUTION"));
        assert_eq!(artifact_id_for("docs/prd/main").as_deref(), Some("main"));
    }
}
