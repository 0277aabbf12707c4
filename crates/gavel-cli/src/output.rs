//! Shared output layer: every command renders either human text or stable
//! JSON, selected by the global `--json` flag.

use serde::Serialize;
use std::io::{self, Write};

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON, one object or array per invocation.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    #[must_use]
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode, the value is serialized with `serde_json`. In human mode,
/// the provided `human_fn` closure produces the text output.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => human_fn(value, &mut out)?,
    }
    Ok(())
}

/// A structured error with an optional machine code and remediation hint.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable code (e.g. `E3001`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Optional suggestion for how to recover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl CliError {
    /// Build a `CliError` from any command failure, surfacing the store
    /// error code and hint when the chain bottoms out in one.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let store_err = err.downcast_ref::<gavel_core::StoreError>();
        Self {
            message: format!("{err:#}"),
            code: store_err.map(|e| e.code().to_string()),
            hint: store_err.and_then(|e| e.hint()).map(String::from),
        }
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    // stderr being gone is not worth a second error
    let _ = write_error(mode, error, &mut out);
}

fn write_error(mode: OutputMode, error: &CliError, out: &mut dyn Write) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({ "error": error });
            serde_json::to_writer_pretty(&mut *out, &wrapper).map_err(io::Error::other)?;
            writeln!(out)
        }
        OutputMode::Human => {
            match &error.code {
                Some(code) => writeln!(out, "error[{code}]: {}", error.message)?,
                None => writeln!(out, "error: {}", error.message)?,
            }
            if let Some(hint) = &error.hint {
                writeln!(out, "  hint: {hint}")?;
            }
            Ok(())
        }
    }
}
