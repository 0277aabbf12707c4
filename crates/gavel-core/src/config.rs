use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-level configuration, read from `.gavel/config.toml` at the
/// repository root. Every field has a default; a missing file is the
/// common case and yields the full default configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Ledger file location, relative to the repository root.
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Paths (files or directory prefixes, relative to the repository
    /// root) whose edits the edit hook records.
    #[serde(default = "default_artifact_paths")]
    pub paths: Vec<String>,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            paths: default_artifact_paths(),
        }
    }
}

impl ProjectConfig {
    /// Absolute ledger path for a project rooted at `root`.
    #[must_use]
    pub fn ledger_path(&self, root: &Path) -> PathBuf {
        root.join(&self.ledger.path)
    }

    /// Whether `path` (relative to the repository root) falls under one of
    /// the tracked artifact paths.
    #[must_use]
    pub fn tracks(&self, path: &str) -> bool {
        self.artifacts.paths.iter().any(|tracked| {
            if let Some(prefix) = tracked.strip_suffix('/') {
                path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
            } else {
                path == tracked
            }
        })
    }
}

/// Load the project configuration, falling back to defaults when the file
/// is absent.
///
/// # Errors
///
/// Fails if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".gavel/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from(".gavel/events.ndjson")
}

fn default_artifact_paths() -> Vec<String> {
    vec![
        "docs/adr/".to_string(),
        "docs/prd/".to_string(),
        "docs/obpi/".to_string(),
        "CONSTITUTION.md".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_uses_defaults() {
        let root = TempDir::new().expect("temp dir");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.ledger.path, PathBuf::from(".gavel/events.ndjson"));
        assert_eq!(cfg.artifacts.paths.len(), 4);
        assert_eq!(
            cfg.ledger_path(root.path()),
            root.path().join(".gavel/events.ndjson")
        );
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let root = TempDir::new().expect("temp dir");
        std::fs::create_dir_all(root.path().join(".gavel")).expect("mkdir");
        std::fs::write(
            root.path().join(".gavel/config.toml"),
            "[ledger]\npath = \"history/governance.ndjson\"\n",
        )
        .expect("write config");

        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.ledger.path, PathBuf::from("history/governance.ndjson"));
        assert_eq!(cfg.artifacts.paths.len(), 4, "artifact paths stay default");
    }

    #[test]
    fn malformed_config_is_an_error() {
        let root = TempDir::new().expect("temp dir");
        std::fs::create_dir_all(root.path().join(".gavel")).expect("mkdir");
        std::fs::write(root.path().join(".gavel/config.toml"), "ledger = [not toml")
            .expect("write config");

        assert!(load_project_config(root.path()).is_err());
    }

    #[test]
    fn tracks_matches_directory_prefixes_and_exact_files() {
        let cfg = ProjectConfig::default();
        assert!(cfg.tracks("docs/adr/ADR-0.1.0.md"));
        assert!(cfg.tracks("docs/prd/main.md"));
        assert!(cfg.tracks("CONSTITUTION.md"));
        assert!(!cfg.tracks("docs/adrenaline/notes.md"));
        assert!(!cfg.tracks("src/main.rs"));
        assert!(!cfg.tracks("README.md"));
    }
}
