use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    UnknownEventKind,
    ArtifactNotFound,
    CorruptRecord,
    StoreUnavailable,
    LedgerWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::UnknownEventKind => "E2001",
            Self::ArtifactNotFound => "E2002",
            Self::CorruptRecord => "E3001",
            Self::StoreUnavailable => "E3002",
            Self::LedgerWriteFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Project not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::UnknownEventKind => "Unknown event kind",
            Self::ArtifactNotFound => "Artifact not found",
            Self::CorruptRecord => "Corrupt ledger record",
            Self::StoreUnavailable => "Ledger file unreadable",
            Self::LedgerWriteFailed => "Ledger write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `gv init` to initialize this repository."),
            Self::ConfigParseError => Some("Fix syntax in .gavel/config.toml and retry."),
            Self::UnknownEventKind => Some("Use one of the documented event kinds."),
            Self::ArtifactNotFound => None,
            Self::CorruptRecord => {
                Some("The ledger is append-only history; restore the damaged line from backup or VCS.")
            }
            Self::StoreUnavailable => Some("Check read permissions on the ledger file."),
            Self::LedgerWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
