// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Saving committed positions between page loads.
//!
//! Each element's last committed style is stored as JSON under
//! `bb-position-{node_id}` in a key/value [`PositionStore`], the shape of a
//! browser's `localStorage`.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use stagehand_transform::StyleSnapshot;
use tracing::{debug, warn};

use crate::controller::CommitOutcome;
use crate::error::PersistError;

/// Prefix of every storage key.
pub const STORAGE_PREFIX: &str = "bb-position-";

/// The storage key of `node_id`.
#[must_use]
pub fn storage_key(node_id: &str) -> String {
    format!("{STORAGE_PREFIX}{node_id}")
}

/// A committed position as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPosition {
    /// The element's id on the page.
    pub node_id: String,
    /// The committed declared style.
    pub position: StyleSnapshot,
    /// When it was saved, in milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// What produced the record, e.g. `"bounding-box"`.
    pub source: String,
}

impl SavedPosition {
    /// Source tag of records produced by the editor.
    pub const EDITOR_SOURCE: &'static str = "bounding-box";

    /// The record for a commit, or `None` if the session was aborted.
    #[must_use]
    pub fn from_commit(node_id: &str, outcome: &CommitOutcome, timestamp_ms: u64) -> Option<Self> {
        match outcome {
            CommitOutcome::Committed { style, .. } => Some(Self {
                node_id: node_id.to_owned(),
                position: style.clone(),
                timestamp_ms,
                source: Self::EDITOR_SOURCE.to_owned(),
            }),
            CommitOutcome::Aborted => None,
        }
    }
}

/// A string key/value store.
pub trait PositionStore {
    /// The value under `key`.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);
    /// Deletes `key`.
    fn remove(&mut self, key: &str);
}

/// A [`PositionStore`] in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PositionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Stores `saved` under its node's key.
pub fn save_position<S: PositionStore + ?Sized>(
    store: &mut S,
    saved: &SavedPosition,
) -> Result<(), PersistError> {
    let json = serde_json::to_string(saved)?;
    store.set(&storage_key(&saved.node_id), json);
    debug!(node_id = %saved.node_id, "position saved");
    Ok(())
}

/// Loads the saved position of `node_id`.
///
/// A corrupt entry is logged and reads as nothing saved.
pub fn load_position<S: PositionStore + ?Sized>(store: &S, node_id: &str) -> Option<SavedPosition> {
    let json = store.get(&storage_key(node_id))?;
    match serde_json::from_str(&json) {
        Ok(saved) => Some(saved),
        Err(error) => {
            warn!(node_id, %error, "ignoring unreadable saved position");
            None
        }
    }
}

/// Forgets the saved position of `node_id`.
pub fn clear_position<S: PositionStore + ?Sized>(store: &mut S, node_id: &str) {
    store.remove(&storage_key(node_id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_transform::TransformModel;
    use stagehand_units::UnitSystem;

    fn committed() -> CommitOutcome {
        let style = StyleSnapshot {
            position: "absolute".into(),
            left: "40%".into(),
            top: "78.125%".into(),
            width: "25%".into(),
            height: "25%".into(),
            transform: "translate(-50%, -50%) scale(1.4, 1.25)".into(),
            z_index: String::new(),
        };
        CommitOutcome::Committed {
            transform: TransformModel::extract_from(&style, kurbo::Size::new(1000.0, 800.0)),
            unit: UnitSystem::Percent,
            style,
        }
    }

    #[test]
    fn saved_positions_load_back() {
        let mut store = MemoryStore::new();
        let saved = SavedPosition::from_commit("hero", &committed(), 1_700_000_000_000).unwrap();
        save_position(&mut store, &saved).unwrap();
        assert!(store.get("bb-position-hero").is_some(), "stored under the prefixed key");
        assert_eq!(load_position(&store, "hero"), Some(saved), "round trip");
        clear_position(&mut store, "hero");
        assert!(store.is_empty(), "cleared");
    }

    #[test]
    fn stored_json_uses_page_field_names() {
        let mut store = MemoryStore::new();
        let saved = SavedPosition::from_commit("hero", &committed(), 5).unwrap();
        save_position(&mut store, &saved).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&store.get("bb-position-hero").unwrap()).unwrap();
        assert_eq!(json["nodeId"], "hero", "node id");
        assert_eq!(json["position"]["left"], "40%", "left");
        assert_eq!(json["position"]["zIndex"], "", "z-index");
        assert_eq!(json["source"], "bounding-box", "source");
    }

    #[test]
    fn corrupt_entries_read_as_missing() {
        let mut store = MemoryStore::new();
        store.set(&storage_key("hero"), "{ not json".to_owned());
        assert_eq!(load_position(&store, "hero"), None, "corrupt");
        assert_eq!(load_position(&store, "villain"), None, "absent");
    }

    #[test]
    fn aborted_sessions_are_not_saved() {
        assert_eq!(
            SavedPosition::from_commit("hero", &CommitOutcome::Aborted, 0),
            None,
            "nothing to save"
        );
    }
}
