//! Durable, ordered, append-only persistence of governance events.
//!
//! The ledger is one newline-delimited JSON file, one event per line.
//! Records are never rewritten or deleted; every write is a single append
//! of one line, and every read is a full scan in append order. There is no
//! index, no cache, and no lock: state is always a pure function of the
//! file's contents, and a reader sees the most recently completed write.
//!
//! Two processes appending at the same moment can interleave mid-line and
//! corrupt that line for all future readers. This is a known gap; see the
//! crate documentation before "fixing" it with a lock.

use crate::error::ErrorCode;
use crate::event::{Event, RecordError};
use std::fs::{self, OpenOptions};
use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by the event store.
///
/// A missing ledger file is deliberately **not** an error: `read_all`
/// returns an empty sequence, since "uninitialized" and "empty" are
/// indistinguishable and both valid.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The ledger exists but could not be read (permissions, I/O fault).
    #[error("ledger unreadable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A non-blank line failed to parse. Fails the entire read: corrupted
    /// history must not be silently dropped and presented as complete.
    #[error("corrupt record at {path}:{line}: {source}")]
    Corrupt {
        path: PathBuf,
        /// 1-based line number of the offending record.
        line: usize,
        #[source]
        source: RecordError,
    },

    /// Creating or appending to the ledger failed.
    #[error("ledger write failed at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An event failed to encode for append (should not happen with
    /// factory-constructed events).
    #[error("failed to encode event for append: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Machine-readable code associated with this store error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Unavailable { .. } => ErrorCode::StoreUnavailable,
            Self::Corrupt { .. } => ErrorCode::CorruptRecord,
            Self::Write { .. } => ErrorCode::LedgerWriteFailed,
            Self::Encode { .. } => ErrorCode::InternalUnexpected,
        }
    }

    /// Optional remediation hint for operators and agents.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Handle to the append-only ledger file.
///
/// Holds only the path; no file handle, no in-memory state. Every
/// operation opens, acts, and closes.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Create a handle for the ledger at `path`. Does not touch the
    /// filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file is present.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Idempotently ensure the ledger file and its parent directories
    /// exist. Never truncates an existing file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if directories or the file cannot be
    /// created.
    pub fn create(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }

    /// Append one event as one line. Creates the ledger first if absent.
    ///
    /// Each call is a single discrete write; events are never buffered
    /// into a shared write.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encode`] if the event fails to serialize and
    /// [`StoreError::Write`] on any I/O failure.
    pub fn append(&self, event: &Event) -> Result<(), StoreError> {
        self.create()?;

        let mut line = event
            .to_json_line()
            .map_err(|source| StoreError::Encode { source })?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        file.write_all(line.as_bytes())
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(kind = %event.kind, id = %event.id, "appended event");
        Ok(())
    }

    /// Read the full ordered event sequence, in append order.
    ///
    /// A missing file yields an empty sequence. Blank lines are skipped.
    /// Any non-blank line that fails to parse fails the entire read.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the file exists but cannot
    /// be read, and [`StoreError::Corrupt`] on the first unparseable line.
    pub fn read_all(&self) -> Result<Vec<Event>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Unavailable {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut events = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let event = Event::from_json_line(line).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                line: idx + 1,
                source,
            })?;
            events.push(event);
        }

        tracing::debug!(count = events.len(), "read ledger");
        Ok(events)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
