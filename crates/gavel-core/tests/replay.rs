//! End-to-end replay tests: full governance lifecycles written through the
//! public API and verified by rebuilding every derived view from the file.

use gavel_core::event::{Event, EventKind, SCHEMA};
use gavel_core::store::{Ledger, StoreError};
use tempfile::TempDir;

fn project() -> (TempDir, Ledger) {
    let dir = TempDir::new().expect("temp dir");
    let ledger = Ledger::new(dir.path().join(".gavel/events.ndjson"));
    (dir, ledger)
}

fn append_all(ledger: &Ledger, events: &[Event]) {
    for event in events {
        ledger.append(event).expect("append");
    }
}

#[test]
fn full_lifecycle_replays_into_consistent_views() {
    let (_dir, ledger) = project();

    append_all(
        &ledger,
        &[
            Event::project_init("demo", "greenfield"),
            Event::constitution_created("CONST-1"),
            Event::prd_created("PRD-1"),
            Event::obpi_created("OBPI-1", "PRD-1"),
            Event::adr_created("ADR-0.1.0", "OBPI-1", "lite"),
            Event::artifact_edited("ADR-0.1.0", "docs/adr/ADR-0.1.0.md", Some("s-42".into())),
            Event::gate_checked("ADR-0.1.0", 1, "pass", "make lint", 0, None),
            Event::gate_checked("ADR-0.1.0", 2, "fail", "make test", 1, None),
            Event::gate_checked(
                "ADR-0.1.0",
                2,
                "pass",
                "make test",
                0,
                Some("logs/gate2.txt".into()),
            ),
            Event::attested("ADR-0.1.0", "completed", "reviewer", Some("all gates green".into())),
        ],
    );

    // The log itself
    let events = ledger.read_all().expect("read");
    assert_eq!(events.len(), 10);
    assert!(events.iter().all(|e| e.schema == SCHEMA));

    // Graph: PRD-1 -> OBPI-1 -> ADR-0.1.0, attested
    let graph = ledger.artifact_graph().expect("graph");
    assert_eq!(graph.len(), 4);
    assert_eq!(
        graph.get("PRD-1").expect("prd").children,
        vec!["OBPI-1"]
    );
    assert_eq!(
        graph.get("OBPI-1").expect("obpi").children,
        vec!["ADR-0.1.0"]
    );
    let adr = graph.get("ADR-0.1.0").expect("adr");
    assert!(adr.attested);
    assert_eq!(adr.attestation_status.as_deref(), Some("completed"));
    assert_eq!(adr.attested_by.as_deref(), Some("reviewer"));

    // Gates: latest by append order per gate number
    let gates = ledger.latest_gate_statuses("ADR-0.1.0").expect("gates");
    assert_eq!(gates.get(&1).map(String::as_str), Some("pass"));
    assert_eq!(gates.get(&2).map(String::as_str), Some("pass"));

    // Nothing left pending
    assert!(ledger.pending_attestations().expect("pending").is_empty());
}

#[test]
fn rename_mid_history_regroups_everything_under_the_new_id() {
    let (_dir, ledger) = project();

    append_all(
        &ledger,
        &[
            Event::obpi_created("OBPI-1", "PRD-1"),
            Event::adr_created("ADR-draft", "OBPI-1", "lite"),
            Event::gate_checked("ADR-draft", 1, "pass", "make lint", 0, None),
            Event::artifact_renamed("ADR-draft", "ADR-0.1.0", Some("version assigned".into())),
            Event::gate_checked("ADR-0.1.0", 2, "pass", "make test", 0, None),
            Event::attested("ADR-0.1.0", "completed", "reviewer", None),
        ],
    );

    assert_eq!(ledger.canonical_id("ADR-draft").expect("canon"), "ADR-0.1.0");

    // The graph only knows the canonical identity
    let graph = ledger.artifact_graph().expect("graph");
    assert!(graph.get("ADR-draft").is_none());
    let adr = graph.get("ADR-0.1.0").expect("adr");
    assert!(adr.attested);
    assert_eq!(
        graph.get("OBPI-1").expect("obpi").children,
        vec!["ADR-0.1.0"]
    );

    // Gate history merges across the rename, queried from either side
    for id in ["ADR-draft", "ADR-0.1.0"] {
        let gates = ledger.latest_gate_statuses(id).expect("gates");
        assert_eq!(gates.len(), 2, "queried via {id}");
    }

    // Literal queries keep the original strings
    let draft_events = ledger.query(None, Some("ADR-draft")).expect("query");
    assert_eq!(draft_events.len(), 3);
    assert_eq!(
        ledger
            .latest_event("ADR-draft")
            .expect("latest")
            .expect("some")
            .kind,
        EventKind::ArtifactRenamed
    );
}

#[test]
fn replay_is_deterministic_across_rereads() {
    let (_dir, ledger) = project();
    append_all(
        &ledger,
        &[
            Event::adr_created("ADR-1", "OBPI-1", "lite"),
            Event::adr_created("ADR-2", "OBPI-1", "lite"),
            Event::artifact_renamed("ADR-1", "ADR-1r", None),
        ],
    );

    let first = ledger.pending_attestations().expect("pending");
    for _ in 0..3 {
        assert_eq!(ledger.pending_attestations().expect("pending"), first);
    }
    assert_eq!(first, vec!["ADR-1r", "ADR-2"]);
}

#[test]
fn views_never_mutate_the_ledger() {
    let (_dir, ledger) = project();
    append_all(
        &ledger,
        &[
            Event::prd_created("PRD-1"),
            Event::adr_created("ADR-1", "OBPI-1", "lite"),
        ],
    );

    let before = std::fs::read_to_string(ledger.path()).expect("raw");
    let _ = ledger.artifact_graph().expect("graph");
    let _ = ledger.latest_gate_statuses("ADR-1").expect("gates");
    let _ = ledger.pending_attestations().expect("pending");
    let after = std::fs::read_to_string(ledger.path()).expect("raw");
    assert_eq!(before, after);
}

#[test]
fn hand_written_history_from_another_writer_replays() {
    // Another tool may have produced the ledger; only the record shape
    // matters, not who wrote it.
    let (_dir, ledger) = project();
    ledger.create().expect("create");
    let raw = concat!(
        "{\"schema\":\"gavel/1\",\"event\":\"project_init\",\"id\":\"proj\",\"ts\":\"2026-01-01T00:00:00Z\",\"mode\":\"brownfield\"}\n",
        "{\"schema\":\"gavel/1\",\"event\":\"adr_created\",\"id\":\"ADR-1\",\"ts\":\"2026-01-02T00:00:00Z\",\"parent\":\"OBPI-1\",\"lane\":\"full\",\"unknown_field\":42}\n",
        "{\"schema\":\"gavel/1\",\"event\":\"gate_checked\",\"id\":\"ADR-1\",\"ts\":\"2026-01-03T00:00:00Z\",\"gate\":1,\"status\":\"pass\",\"command\":\"pytest\",\"returncode\":0}\n",
    );
    std::fs::write(ledger.path(), raw).expect("write");

    let events = ledger.read_all().expect("read");
    assert_eq!(events.len(), 3);

    let graph = ledger.artifact_graph().expect("graph");
    assert_eq!(graph.get("ADR-1").expect("adr").artifact_type, "adr");

    let gates = ledger.latest_gate_statuses("ADR-1").expect("gates");
    assert_eq!(gates.get(&1).map(String::as_str), Some("pass"));

    // Appending after foreign history keeps working
    ledger
        .append(&Event::attested("ADR-1", "completed", "reviewer", None))
        .expect("append");
    assert!(ledger.pending_attestations().expect("pending").is_empty());
}

#[test]
fn corrupt_history_blocks_every_view() {
    let (_dir, ledger) = project();
    append_all(&ledger, &[Event::prd_created("PRD-1")]);
    let mut raw = std::fs::read_to_string(ledger.path()).expect("raw");
    raw.push_str("{\"schema\":\"gavel/1\",\"event\":\"attested\",\"id\":\"PRD-1\"\n");
    std::fs::write(ledger.path(), &raw).expect("rewrite");

    let err = ledger.artifact_graph().unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { line: 2, .. }), "got {err}");
}
