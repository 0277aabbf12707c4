//! Event kind enum covering the 9 governance event kinds.
//!
//! Each kind corresponds to one lifecycle action on a tracked artifact. The
//! string representation uses the snake_case form stored in the `event`
//! field of every ledger record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The 9 event kinds in the gavel event catalog.
///
/// String representation follows the snake_case convention used in the
/// ledger's newline-delimited JSON format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Initialize a project (records the chosen governance mode).
    ProjectInit,
    /// Create a product requirements document.
    PrdCreated,
    /// Create a project constitution.
    ConstitutionCreated,
    /// Create an outcome-based plan item.
    ObpiCreated,
    /// Create an architecture decision record.
    AdrCreated,
    /// Record an edit to a tracked artifact file.
    ArtifactEdited,
    /// Terminal human sign-off on a decision artifact.
    Attested,
    /// Result of running a numbered verification gate.
    GateChecked,
    /// Rename a tracked artifact to a new identifier.
    ArtifactRenamed,
}

/// Error returned when parsing an unknown event kind string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventKind {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown event kind '{}': expected one of project_init, prd_created, \
             constitution_created, obpi_created, adr_created, artifact_edited, \
             attested, gate_checked, artifact_renamed",
            self.raw
        )
    }
}

impl std::error::Error for UnknownEventKind {}

impl EventKind {
    /// All known event kinds in catalog order.
    pub const ALL: [Self; 9] = [
        Self::ProjectInit,
        Self::PrdCreated,
        Self::ConstitutionCreated,
        Self::ObpiCreated,
        Self::AdrCreated,
        Self::ArtifactEdited,
        Self::Attested,
        Self::GateChecked,
        Self::ArtifactRenamed,
    ];

    /// Return the canonical snake_case string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProjectInit => "project_init",
            Self::PrdCreated => "prd_created",
            Self::ConstitutionCreated => "constitution_created",
            Self::ObpiCreated => "obpi_created",
            Self::AdrCreated => "adr_created",
            Self::ArtifactEdited => "artifact_edited",
            Self::Attested => "attested",
            Self::GateChecked => "gate_checked",
            Self::ArtifactRenamed => "artifact_renamed",
        }
    }

    /// For creation kinds, the artifact type label (`_created` suffix
    /// stripped). `None` for kinds that do not create an artifact node.
    #[must_use]
    pub const fn created_artifact_type(self) -> Option<&'static str> {
        match self {
            Self::PrdCreated => Some("prd"),
            Self::ConstitutionCreated => Some("constitution"),
            Self::ObpiCreated => Some("obpi"),
            Self::AdrCreated => Some("adr"),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "project_init" => Ok(Self::ProjectInit),
            "prd_created" => Ok(Self::PrdCreated),
            "constitution_created" => Ok(Self::ConstitutionCreated),
            "obpi_created" => Ok(Self::ObpiCreated),
            "adr_created" => Ok(Self::AdrCreated),
            "artifact_edited" => Ok(Self::ArtifactEdited),
            "attested" => Ok(Self::Attested),
            "gate_checked" => Ok(Self::GateChecked),
            "artifact_renamed" => Ok(Self::ArtifactRenamed),
            _ => Err(UnknownEventKind { raw: s.to_string() }),
        }
    }
}

// Custom serde: serialize as the snake_case string.
impl Serialize for EventKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_all_kinds() {
        let expected = [
            (EventKind::ProjectInit, "project_init"),
            (EventKind::PrdCreated, "prd_created"),
            (EventKind::ConstitutionCreated, "constitution_created"),
            (EventKind::ObpiCreated, "obpi_created"),
            (EventKind::AdrCreated, "adr_created"),
            (EventKind::ArtifactEdited, "artifact_edited"),
            (EventKind::Attested, "attested"),
            (EventKind::GateChecked, "gate_checked"),
            (EventKind::ArtifactRenamed, "artifact_renamed"),
        ];

        for (kind, s) in expected {
            assert_eq!(kind.to_string(), s);
            assert_eq!(kind.as_str(), s);
        }
    }

    #[test]
    fn fromstr_all_kinds() {
        for kind in EventKind::ALL {
            let parsed: EventKind = kind.as_str().parse().expect("should parse");
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn fromstr_rejects_unknown() {
        let err = "artifact_deleted".parse::<EventKind>().unwrap_err();
        assert_eq!(err.raw, "artifact_deleted");
        assert!(err.to_string().contains("artifact_deleted"));
        assert!(err.to_string().contains("expected one of"));
    }

    #[test]
    fn fromstr_rejects_empty() {
        assert!("".parse::<EventKind>().is_err());
    }

    #[test]
    fn serde_json_roundtrip() {
        for kind in EventKind::ALL {
            let json = serde_json::to_string(&kind).expect("serialize");
            let expected = format!("\"{}\"", kind.as_str());
            assert_eq!(json, expected);

            let deser: EventKind = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(deser, kind);
        }
    }

    #[test]
    fn serde_rejects_unknown_kind() {
        let result = serde_json::from_str::<EventKind>("\"item_created\"");
        assert!(result.is_err());
    }

    #[test]
    fn all_contains_exactly_9_kinds() {
        assert_eq!(EventKind::ALL.len(), 9);
    }

    #[test]
    fn created_artifact_type_only_for_creation_kinds() {
        assert_eq!(EventKind::PrdCreated.created_artifact_type(), Some("prd"));
        assert_eq!(
            EventKind::ConstitutionCreated.created_artifact_type(),
            Some("constitution")
        );
        assert_eq!(EventKind::ObpiCreated.created_artifact_type(), Some("obpi"));
        assert_eq!(EventKind::AdrCreated.created_artifact_type(), Some("adr"));

        assert_eq!(EventKind::ProjectInit.created_artifact_type(), None);
        assert_eq!(EventKind::ArtifactEdited.created_artifact_type(), None);
        assert_eq!(EventKind::Attested.created_artifact_type(), None);
        assert_eq!(EventKind::GateChecked.created_artifact_type(), None);
        assert_eq!(EventKind::ArtifactRenamed.created_artifact_type(), None);
    }

    #[test]
    fn error_display_includes_valid_options() {
        let err = UnknownEventKind { raw: "nope".into() };
        let msg = err.to_string();
        for kind in EventKind::ALL {
            assert!(msg.contains(kind.as_str()), "missing {}", kind.as_str());
        }
    }
}
