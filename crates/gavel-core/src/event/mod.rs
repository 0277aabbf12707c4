//! Event data model for the gavel governance ledger.
//!
//! This module defines the core `Event` struct, the `EventKind` enum
//! covering all 9 governance event kinds, typed payload data structs, and
//! the record codec used by the append-only store.
//!
//! # Record format
//!
//! Events are stored as newline-delimited JSON, one flattened object per
//! line:
//!
//! ```text
//! {"schema":"gavel/1","event":"adr_created","id":"ADR-0.1.0","ts":"...","parent":"OBPI-1","lane":"lite"}
//! ```
//!
//! `schema`, `event`, `id` and `ts` are present on every record; `parent`
//! only on kinds that have a governing parent; all kind-specific fields sit
//! at the top level (not nested) so external tools can read them directly.

pub mod data;
pub mod kind;

pub use data::{
    AdrCreatedData, AttestedData, CreatedData, DataParseError, EditedData, EventData,
    GateCheckedData, ProjectInitData, RenamedData,
};
pub use kind::{EventKind, UnknownEventKind};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The record format version written into every event.
///
/// Readers are lenient about other values (best-effort parse with a
/// warning); writers always emit this one.
pub const SCHEMA: &str = "gavel/1";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while encoding or decoding a ledger record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The line was valid JSON but not a JSON object.
    #[error("record is not a JSON object")]
    NotAnObject,

    /// A required record field was missing or not a string.
    #[error("record field '{0}' missing or not a string")]
    BadField(&'static str),

    /// The `event` field named a kind outside the catalog.
    #[error(transparent)]
    UnknownKind(#[from] UnknownEventKind),

    /// The kind-specific fields did not match the expected shape.
    #[error(transparent)]
    Payload(#[from] DataParseError),

    /// The line failed to parse as JSON at all.
    #[error("record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A single immutable event in the governance ledger.
///
/// Events are constructed through the per-kind factory functions
/// ([`Event::prd_created`], [`Event::gate_checked`], ...) which enforce the
/// field shape each kind carries, and are never mutated after construction:
/// the store only ever appends them.
///
/// The `ts` field is informational. Derived views order strictly by append
/// position in the log; wall clocks of different writers are not trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Record format version; [`SCHEMA`] on everything we write.
    pub schema: String,

    /// Which lifecycle action this event records.
    pub kind: EventKind,

    /// Identifier of the subject artifact *at the time of the event*.
    /// Later renames do not rewrite history; canonicalization happens at
    /// query time via [`crate::canon::RenameMap`].
    pub id: String,

    /// ISO-8601 UTC timestamp, defaulted to "now" at construction.
    pub ts: String,

    /// Identifier of the governing parent artifact, for kinds that have one
    /// (`obpi_created`, `adr_created`).
    pub parent: Option<String>,

    /// Kind-specific payload.
    pub data: EventData,
}

impl Event {
    fn now_ts() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn new(kind: EventKind, id: impl Into<String>, parent: Option<String>, data: EventData) -> Self {
        Self {
            schema: SCHEMA.to_string(),
            kind,
            id: id.into(),
            ts: Self::now_ts(),
            parent,
            data,
        }
    }

    // -- factories, one per kind --------------------------------------------

    /// Record project initialization with the chosen governance mode.
    #[must_use]
    pub fn project_init(id: impl Into<String>, mode: impl Into<String>) -> Self {
        Self::new(
            EventKind::ProjectInit,
            id,
            None,
            EventData::ProjectInit(ProjectInitData {
                mode: mode.into(),
                extra: BTreeMap::new(),
            }),
        )
    }

    /// Record creation of a product requirements document.
    #[must_use]
    pub fn prd_created(id: impl Into<String>) -> Self {
        Self::new(
            EventKind::PrdCreated,
            id,
            None,
            EventData::PrdCreated(CreatedData::default()),
        )
    }

    /// Record creation of a project constitution.
    #[must_use]
    pub fn constitution_created(id: impl Into<String>) -> Self {
        Self::new(
            EventKind::ConstitutionCreated,
            id,
            None,
            EventData::ConstitutionCreated(CreatedData::default()),
        )
    }

    /// Record creation of an outcome-based plan item under `parent`.
    #[must_use]
    pub fn obpi_created(id: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::new(
            EventKind::ObpiCreated,
            id,
            Some(parent.into()),
            EventData::ObpiCreated(CreatedData::default()),
        )
    }

    /// Record creation of an architecture decision record under `parent`,
    /// in the given review lane.
    #[must_use]
    pub fn adr_created(
        id: impl Into<String>,
        parent: impl Into<String>,
        lane: impl Into<String>,
    ) -> Self {
        Self::new(
            EventKind::AdrCreated,
            id,
            Some(parent.into()),
            EventData::AdrCreated(AdrCreatedData {
                lane: lane.into(),
                extra: BTreeMap::new(),
            }),
        )
    }

    /// Record an edit to a tracked artifact file.
    #[must_use]
    pub fn artifact_edited(
        id: impl Into<String>,
        path: impl Into<String>,
        session: Option<String>,
    ) -> Self {
        Self::new(
            EventKind::ArtifactEdited,
            id,
            None,
            EventData::ArtifactEdited(EditedData {
                path: path.into(),
                session,
                extra: BTreeMap::new(),
            }),
        )
    }

    /// Record a human attestation on a decision artifact.
    #[must_use]
    pub fn attested(
        id: impl Into<String>,
        status: impl Into<String>,
        by: impl Into<String>,
        reason: Option<String>,
    ) -> Self {
        Self::new(
            EventKind::Attested,
            id,
            None,
            EventData::Attested(AttestedData {
                status: status.into(),
                by: by.into(),
                reason,
                extra: BTreeMap::new(),
            }),
        )
    }

    /// Record the outcome of running a numbered verification gate.
    #[must_use]
    pub fn gate_checked(
        id: impl Into<String>,
        gate: u32,
        status: impl Into<String>,
        command: impl Into<String>,
        returncode: i64,
        evidence: Option<String>,
    ) -> Self {
        Self::new(
            EventKind::GateChecked,
            id,
            None,
            EventData::GateChecked(GateCheckedData {
                gate: Value::from(gate),
                status: Value::String(status.into()),
                command: command.into(),
                returncode,
                evidence,
                extra: BTreeMap::new(),
            }),
        )
    }

    /// Record a rename of `id` to `new_id`.
    #[must_use]
    pub fn artifact_renamed(
        id: impl Into<String>,
        new_id: impl Into<String>,
        reason: Option<String>,
    ) -> Self {
        Self::new(
            EventKind::ArtifactRenamed,
            id,
            None,
            EventData::ArtifactRenamed(RenamedData {
                new_id: new_id.into(),
                reason,
                extra: BTreeMap::new(),
            }),
        )
    }

    /// Replace the construction-time timestamp. Mainly for tests and for
    /// replaying externally captured history.
    #[must_use]
    pub fn with_ts(mut self, ts: impl Into<String>) -> Self {
        self.ts = ts.into();
        self
    }

    // -- record codec -------------------------------------------------------

    /// Encode this event as a flattened JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload fails to serialize (should not
    /// happen with well-formed data).
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        let mut map = serde_json::Map::new();
        map.insert("schema".into(), Value::String(self.schema.clone()));
        map.insert("event".into(), Value::String(self.kind.as_str().into()));
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert("ts".into(), Value::String(self.ts.clone()));
        if let Some(parent) = &self.parent {
            map.insert("parent".into(), Value::String(parent.clone()));
        }
        if let Value::Object(fields) = self.data.to_json_value()? {
            for (key, value) in fields {
                map.insert(key, value);
            }
        }
        Ok(Value::Object(map))
    }

    /// Encode this event as a single JSON line (no trailing newline).
    ///
    /// JSON string escaping guarantees the one-line invariant: a literal
    /// newline in any field value is escaped, never emitted raw.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload fails to serialize.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_value()?)
    }

    /// Decode an event from a flattened JSON object.
    ///
    /// A `schema` value other than [`SCHEMA`] is accepted best-effort with
    /// a warning; rejecting old or future records outright would make the
    /// whole ledger unreadable after a format bump.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] describing the first field that failed.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        let Value::Object(mut map) = value else {
            return Err(RecordError::NotAnObject);
        };

        let schema = take_string(&mut map, "schema")?;
        let kind: EventKind = take_string(&mut map, "event")?.parse()?;
        let id = take_string(&mut map, "id")?;
        let ts = take_string(&mut map, "ts")?;
        let parent = match map.remove("parent") {
            None => None,
            Some(Value::String(s)) => Some(s),
            Some(_) => return Err(RecordError::BadField("parent")),
        };

        if schema != SCHEMA {
            tracing::warn!(schema = %schema, id = %id, "record schema differs from writer schema");
        }

        let data = EventData::deserialize_for(kind, map)?;

        Ok(Self {
            schema,
            kind,
            id,
            ts,
            parent,
            data,
        })
    }

    /// Decode an event from one ledger line.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the line is not valid JSON or does not
    /// match the record shape.
    pub fn from_json_line(line: &str) -> Result<Self, RecordError> {
        let value: Value = serde_json::from_str(line)?;
        Self::from_value(value)
    }
}

fn take_string(
    map: &mut serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<String, RecordError> {
    match map.remove(field) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(RecordError::BadField(field)),
    }
}

impl Serialize for Event {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.ts,
            self.kind,
            self.id,
            // Abbreviated payload display
            match &self.data {
                EventData::ProjectInit(d) => format!("mode: {}", d.mode),
                EventData::PrdCreated(_)
                | EventData::ConstitutionCreated(_)
                | EventData::ObpiCreated(_) => self
                    .parent
                    .as_ref()
                    .map_or_else(String::new, |p| format!("parent: {p}")),
                EventData::AdrCreated(d) => format!("lane: {}", d.lane),
                EventData::ArtifactEdited(d) => format!("path: {}", d.path),
                EventData::Attested(d) => format!("{} by {}", d.status, d.by),
                EventData::GateChecked(d) => match d.status.as_str() {
                    Some(status) => format!("gate {}: {status}", d.gate),
                    None => format!("gate {}: {}", d.gate, d.status),
                },
                EventData::ArtifactRenamed(d) => format!("-> {}", d.new_id),
            }
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn all_kind_samples() -> Vec<Event> {
        vec![
            Event::project_init("demo", "lite"),
            Event::prd_created("PRD-1"),
            Event::constitution_created("CONST-1"),
            Event::obpi_created("OBPI-1", "PRD-1"),
            Event::adr_created("ADR-0.1.0", "OBPI-1", "lite"),
            Event::artifact_edited("ADR-0.1.0", "docs/adr/0.1.0.md", Some("sess-9".into())),
            Event::attested("ADR-0.1.0", "completed", "user", None),
            Event::gate_checked("ADR-0.1.0", 2, "pass", "cargo test", 0, None),
            Event::artifact_renamed("ADR-0.1.0", "ADR-0.2.0", Some("renumbered".into())),
        ]
    }

    #[test]
    fn factories_set_schema_and_kind() {
        for event in all_kind_samples() {
            assert_eq!(event.schema, SCHEMA);
            assert_eq!(event.kind, event.data.kind());
            assert!(!event.ts.is_empty());
        }
    }

    #[test]
    fn parent_only_on_parented_kinds() {
        for event in all_kind_samples() {
            match event.kind {
                EventKind::ObpiCreated | EventKind::AdrCreated => {
                    assert!(event.parent.is_some(), "{} should carry parent", event.kind);
                }
                _ => assert!(event.parent.is_none(), "{} should not carry parent", event.kind),
            }
        }
    }

    #[test]
    fn timestamp_is_utc_iso8601() {
        let event = Event::prd_created("PRD-1");
        assert!(event.ts.ends_with('Z'), "ts not UTC: {}", event.ts);
        assert!(
            chrono::DateTime::parse_from_rfc3339(&event.ts).is_ok(),
            "ts not parseable: {}",
            event.ts
        );
    }

    #[test]
    fn record_has_required_fields_flattened() {
        let event = Event::adr_created("ADR-0.1.0", "OBPI-1", "lite");
        let value = event.to_value().expect("encode");
        let obj = value.as_object().expect("object");

        assert_eq!(obj["schema"], json!("gavel/1"));
        assert_eq!(obj["event"], json!("adr_created"));
        assert_eq!(obj["id"], json!("ADR-0.1.0"));
        assert_eq!(obj["parent"], json!("OBPI-1"));
        // lane is at the top level, not nested under a payload key
        assert_eq!(obj["lane"], json!("lite"));
        assert!(obj.contains_key("ts"));
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let event = Event::attested("ADR-0.1.0", "completed", "user", None);
        let line = event.to_json_line().expect("encode");
        assert!(!line.contains("reason"), "absent reason leaked: {line}");
        assert!(!line.contains("parent"), "absent parent leaked: {line}");
    }

    #[test]
    fn roundtrip_all_kinds() {
        for event in all_kind_samples() {
            let line = event.to_json_line().expect("encode");
            let deser = Event::from_json_line(&line)
                .unwrap_or_else(|e| panic!("decode {} failed: {e}", event.kind));
            assert_eq!(event, deser, "roundtrip failed for {}", event.kind);
        }
    }

    #[test]
    fn roundtrip_with_optionals_present() {
        let events = vec![
            Event::artifact_edited("PRD-1", "docs/prd/main.md", Some("sess-1".into())),
            Event::attested("ADR-1", "rejected", "alice", Some("missing evidence".into())),
            Event::gate_checked("ADR-1", 3, "fail", "make lint", 2, Some("logs/lint.txt".into())),
            Event::artifact_renamed("A", "B", Some("typo".into())),
        ];
        for event in events {
            let line = event.to_json_line().expect("encode");
            let deser = Event::from_json_line(&line).expect("decode");
            assert_eq!(event, deser);
        }
    }

    #[test]
    fn unknown_top_level_fields_roundtrip() {
        let line = r#"{"schema":"gavel/1","event":"prd_created","id":"PRD-1","ts":"2026-01-01T00:00:00Z","reviewer":"bob"}"#;
        let event = Event::from_json_line(line).expect("decode");
        let EventData::PrdCreated(inner) = &event.data else {
            panic!("wrong variant");
        };
        assert_eq!(inner.extra.get("reviewer"), Some(&json!("bob")));

        let reserialized = event.to_json_line().expect("encode");
        assert!(reserialized.contains("\"reviewer\":\"bob\""));
    }

    #[test]
    fn one_line_invariant_holds_with_newlines_in_fields() {
        let event = Event::attested("ADR-1", "completed", "user", Some("line one\nline two".into()));
        let line = event.to_json_line().expect("encode");
        assert!(!line.contains('\n'), "raw newline in record: {line}");

        let deser = Event::from_json_line(&line).expect("decode");
        assert_eq!(event, deser);
    }

    #[test]
    fn foreign_schema_is_accepted_leniently() {
        let line = r#"{"schema":"gavel/9","event":"prd_created","id":"PRD-1","ts":"2026-01-01T00:00:00Z"}"#;
        let event = Event::from_json_line(line).expect("best-effort decode");
        assert_eq!(event.schema, "gavel/9");
    }

    #[test]
    fn missing_required_field_fails() {
        let line = r#"{"schema":"gavel/1","event":"prd_created","ts":"2026-01-01T00:00:00Z"}"#;
        let err = Event::from_json_line(line).unwrap_err();
        assert!(matches!(err, RecordError::BadField("id")));
    }

    #[test]
    fn unknown_kind_fails() {
        let line = r#"{"schema":"gavel/1","event":"artifact_archived","id":"X","ts":"2026-01-01T00:00:00Z"}"#;
        let err = Event::from_json_line(line).unwrap_err();
        assert!(matches!(err, RecordError::UnknownKind(_)));
    }

    #[test]
    fn non_object_fails() {
        let err = Event::from_json_line("[1,2,3]").unwrap_err();
        assert!(matches!(err, RecordError::NotAnObject));
    }

    #[test]
    fn garbage_fails_as_json_error() {
        let err = Event::from_json_line("not json at all").unwrap_err();
        assert!(matches!(err, RecordError::Json(_)));
    }

    #[test]
    fn serde_trait_impls_match_codec() {
        let event = Event::gate_checked("ADR-1", 1, "pass", "true", 0, None);
        let via_serde = serde_json::to_string(&event).expect("serialize");
        let via_codec = event.to_json_line().expect("encode");
        assert_eq!(via_serde, via_codec);

        let back: Event = serde_json::from_str(&via_serde).expect("deserialize");
        assert_eq!(back, event);
    }

    #[test]
    fn display_does_not_panic_for_any_kind() {
        for event in all_kind_samples() {
            let shown = event.to_string();
            assert!(shown.contains(event.kind.as_str()));
        }
    }

    #[test]
    fn with_ts_overrides_timestamp() {
        let event = Event::prd_created("PRD-1").with_ts("2020-05-05T05:05:05Z");
        assert_eq!(event.ts, "2020-05-05T05:05:05Z");
    }
}
