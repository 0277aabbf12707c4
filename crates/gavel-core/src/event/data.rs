//! Typed payload data structs for each event kind.
//!
//! Each event kind has a corresponding data struct that defines its
//! kind-specific record fields. Unknown fields are preserved via
//! `#[serde(flatten)]` so records written by newer tooling round-trip
//! losslessly through older readers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::kind::EventKind;

// ---------------------------------------------------------------------------
// EventData — the unified payload enum
// ---------------------------------------------------------------------------

/// Typed payload for an event. The discriminant comes from [`EventKind`],
/// not from the payload itself (it lives in the record's `event` field).
///
/// **Serde note:** `EventData` implements `Serialize` (dispatching to the
/// inner struct) but does **not** implement `Deserialize` directly. Use
/// [`EventData::deserialize_for`] with the known [`EventKind`]. The
/// [`Event`](super::Event) struct handles this in its record decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventData {
    /// Payload for `project_init`.
    ProjectInit(ProjectInitData),
    /// Payload for `prd_created`.
    PrdCreated(CreatedData),
    /// Payload for `constitution_created`.
    ConstitutionCreated(CreatedData),
    /// Payload for `obpi_created`.
    ObpiCreated(CreatedData),
    /// Payload for `adr_created`.
    AdrCreated(AdrCreatedData),
    /// Payload for `artifact_edited`.
    ArtifactEdited(EditedData),
    /// Payload for `attested`.
    Attested(AttestedData),
    /// Payload for `gate_checked`.
    GateChecked(GateCheckedData),
    /// Payload for `artifact_renamed`.
    ArtifactRenamed(RenamedData),
}

impl EventData {
    /// Deserialize the residual record fields into the correct `EventData`
    /// variant based on the event kind.
    ///
    /// This is the primary deserialization entry point since the kind
    /// discriminant lives in the record's `event` field, not in the payload.
    ///
    /// # Errors
    ///
    /// Returns a [`DataParseError`] if the fields do not match the expected
    /// shape for the given event kind.
    pub fn deserialize_for(
        kind: EventKind,
        fields: serde_json::Map<String, Value>,
    ) -> Result<Self, DataParseError> {
        let value = Value::Object(fields);
        let result = match kind {
            EventKind::ProjectInit => {
                serde_json::from_value::<ProjectInitData>(value).map(EventData::ProjectInit)
            }
            EventKind::PrdCreated => {
                serde_json::from_value::<CreatedData>(value).map(EventData::PrdCreated)
            }
            EventKind::ConstitutionCreated => {
                serde_json::from_value::<CreatedData>(value).map(EventData::ConstitutionCreated)
            }
            EventKind::ObpiCreated => {
                serde_json::from_value::<CreatedData>(value).map(EventData::ObpiCreated)
            }
            EventKind::AdrCreated => {
                serde_json::from_value::<AdrCreatedData>(value).map(EventData::AdrCreated)
            }
            EventKind::ArtifactEdited => {
                serde_json::from_value::<EditedData>(value).map(EventData::ArtifactEdited)
            }
            EventKind::Attested => {
                serde_json::from_value::<AttestedData>(value).map(EventData::Attested)
            }
            EventKind::GateChecked => {
                serde_json::from_value::<GateCheckedData>(value).map(EventData::GateChecked)
            }
            EventKind::ArtifactRenamed => {
                serde_json::from_value::<RenamedData>(value).map(EventData::ArtifactRenamed)
            }
        };

        result.map_err(|source| DataParseError { kind, source })
    }

    /// Serialize the payload to a [`serde_json::Value`].
    ///
    /// Always produces a JSON object; its fields are flattened into the
    /// record's top level by the event encoder.
    ///
    /// # Errors
    ///
    /// Returns an error if the inner struct fails to serialize (should not
    /// happen with well-formed data).
    pub fn to_json_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::ProjectInit(d) => serde_json::to_value(d),
            Self::PrdCreated(d) | Self::ConstitutionCreated(d) | Self::ObpiCreated(d) => {
                serde_json::to_value(d)
            }
            Self::AdrCreated(d) => serde_json::to_value(d),
            Self::ArtifactEdited(d) => serde_json::to_value(d),
            Self::Attested(d) => serde_json::to_value(d),
            Self::GateChecked(d) => serde_json::to_value(d),
            Self::ArtifactRenamed(d) => serde_json::to_value(d),
        }
    }

    /// The event kind this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ProjectInit(_) => EventKind::ProjectInit,
            Self::PrdCreated(_) => EventKind::PrdCreated,
            Self::ConstitutionCreated(_) => EventKind::ConstitutionCreated,
            Self::ObpiCreated(_) => EventKind::ObpiCreated,
            Self::AdrCreated(_) => EventKind::AdrCreated,
            Self::ArtifactEdited(_) => EventKind::ArtifactEdited,
            Self::Attested(_) => EventKind::Attested,
            Self::GateChecked(_) => EventKind::GateChecked,
            Self::ArtifactRenamed(_) => EventKind::ArtifactRenamed,
        }
    }
}

impl Serialize for EventData {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::ProjectInit(d) => d.serialize(serializer),
            Self::PrdCreated(d) | Self::ConstitutionCreated(d) | Self::ObpiCreated(d) => {
                d.serialize(serializer)
            }
            Self::AdrCreated(d) => d.serialize(serializer),
            Self::ArtifactEdited(d) => d.serialize(serializer),
            Self::Attested(d) => d.serialize(serializer),
            Self::GateChecked(d) => d.serialize(serializer),
            Self::ArtifactRenamed(d) => d.serialize(serializer),
        }
    }
}

// ---------------------------------------------------------------------------
// DataParseError
// ---------------------------------------------------------------------------

/// Error returned when deserializing an event's kind-specific fields fails.
#[derive(Debug)]
pub struct DataParseError {
    /// The event kind that was being deserialized.
    pub kind: EventKind,
    /// The underlying JSON parse error.
    pub source: serde_json::Error,
}

impl fmt::Display for DataParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} record fields: {}", self.kind, self.source)
    }
}

impl std::error::Error for DataParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

// ---------------------------------------------------------------------------
// Payload structs — one per event kind
// ---------------------------------------------------------------------------

/// Payload for `project_init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInitData {
    /// Governance mode chosen at initialization (e.g. `lite`, `full`).
    pub mode: String,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Payload for the bare creation kinds (`prd_created`, `constitution_created`,
/// `obpi_created`). These carry no kind-specific fields of their own; the
/// governing parent of an OBPI travels in the record's top-level `parent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedData {
    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Payload for `adr_created`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdrCreatedData {
    /// Review lane for this decision record (e.g. `lite`, `standard`).
    pub lane: String,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Payload for `artifact_edited`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditedData {
    /// Filesystem path of the edited artifact.
    pub path: String,

    /// Optional editing-session identifier supplied by the edit hook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Payload for `attested`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestedData {
    /// Attestation status (e.g. `completed`, `rejected`).
    pub status: String,

    /// Actor who signed off.
    pub by: String,

    /// Optional free-form reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Payload for `gate_checked`.
///
/// `gate` and `status` are carried as raw JSON values rather than typed
/// fields: history written by other tools can be noisy here, and the
/// aggregation in [`crate::views`] skips malformed entries instead of
/// failing the whole read. Everything the factory writes is a number and
/// a string respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateCheckedData {
    /// Gate number. Numeric in well-formed records.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub gate: Value,

    /// Gate outcome. A string (e.g. `pass`, `fail`) in well-formed records.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub status: Value,

    /// Command executed to evaluate the gate.
    pub command: String,

    /// Exit code of the gate command.
    pub returncode: i64,

    /// Optional pointer to supporting evidence (log path, report URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Payload for `artifact_renamed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedData {
    /// Identifier the artifact is known by from this event onward.
    pub new_id: String,

    /// Optional free-form reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
