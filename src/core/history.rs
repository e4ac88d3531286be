//! Append-only store of decode attempts.

use std::rc::Rc;

use crate::config::DECODE_HISTORY_KEY;
use crate::models::{HistoryEntry, HistoryQuery, SortOrder};
use crate::utils::storage::{self, Storage};

/// Decode history with a persisted mirror.
///
/// `append` is the only writer and rewrites the whole persisted list.
/// Persistence failures are logged and otherwise ignored, so the store keeps
/// working in memory.
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    storage: Rc<dyn Storage>,
}

impl HistoryStore {
    /// Load the persisted list. Missing or unreadable data yields an empty store.
    pub fn load(storage: Rc<dyn Storage>) -> Self {
        let entries: Vec<HistoryEntry> =
            storage::load_json(storage.as_ref(), DECODE_HISTORY_KEY).unwrap_or_default();
        log::debug!("loaded {} history entries", entries.len());
        Self { entries, storage }
    }

    /// Append an attempt, stamping `decoded_at` with `now_ms`.
    ///
    /// Timestamps never go backwards: a clock that moved back is clamped to
    /// the previous entry's time.
    pub fn append(&mut self, mut entry: HistoryEntry, now_ms: u64) -> &HistoryEntry {
        let floor = self.entries.last().map_or(0, |e| e.decoded_at);
        entry.decoded_at = now_ms.max(floor);
        self.entries.push(entry);

        if let Err(e) = storage::save_json(self.storage.as_ref(), DECODE_HISTORY_KEY, &self.entries)
        {
            log::warn!("decode history not persisted: {e}");
        }

        &self.entries[self.entries.len() - 1]
    }

    /// Filter by status, then search, then sort by `decoded_at` (stable).
    pub fn query(&self, query: &HistoryQuery) -> Vec<HistoryEntry> {
        let needle = query.search.trim().to_lowercase();

        let mut results: Vec<HistoryEntry> = self
            .entries
            .iter()
            .filter(|e| query.filter.accepts(e.status))
            .filter(|e| needle.is_empty() || e.matches(&needle))
            .cloned()
            .collect();

        match query.order {
            SortOrder::Newest => results.sort_by(|a, b| b.decoded_at.cmp(&a.decoded_at)),
            SortOrder::Oldest => results.sort_by(|a, b| a.decoded_at.cmp(&b.decoded_at)),
        }
        results
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
