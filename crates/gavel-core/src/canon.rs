//! Rename-chain canonicalization of artifact identifiers.
//!
//! Artifacts may be renamed over their lifetime, and every canonical view
//! must group history by the identity an artifact resolves to *today*, not
//! by the surface string a record happened to be written under. The rename
//! map is rebuilt from the full event sequence on every derivation; it is
//! never cached across calls.

use crate::event::{Event, EventData};
use std::collections::{HashMap, HashSet};

/// Mapping of old identifier to the identifier that replaced it.
///
/// Built by scanning every `artifact_renamed` event in append order. When
/// the same old id is renamed more than once across history, the later
/// event wins for that old id.
#[derive(Debug, Clone, Default)]
pub struct RenameMap {
    map: HashMap<String, String>,
}

impl RenameMap {
    /// Build the map from the full event sequence, in append order.
    #[must_use]
    pub fn from_events(events: &[Event]) -> Self {
        let mut map = HashMap::new();
        for event in events {
            if let EventData::ArtifactRenamed(d) = &event.data {
                map.insert(event.id.clone(), d.new_id.clone());
            }
        }
        Self { map }
    }

    /// Resolve `id` to the identifier currently in effect.
    ///
    /// Follows map entries to a fixed point. A visited set guards against
    /// rename cycles: resolution stops deterministically at the first
    /// repeated identifier and returns it. Cycle length is bounded by the
    /// number of distinct ids ever renamed, so this never loops.
    #[must_use]
    pub fn resolve(&self, id: &str) -> String {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut current = id;
        while let Some(next) = self.map.get(current) {
            if !visited.insert(current) {
                break;
            }
            current = next.as_str();
        }
        current.to_string()
    }

    /// Whether `id` has been renamed away at some point in history.
    #[must_use]
    pub fn is_renamed(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    /// Number of distinct old ids with a rename entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no renames have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
