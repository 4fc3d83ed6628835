use crate::models::HistoryEntry;
use crate::storage::{self, HISTORY_KEY, KeyValueStore};
use tracing::debug;

/// Every food ever entered, unique by name ignoring case.
#[derive(Debug, Default)]
pub struct FoodHistory {
    entries: Vec<HistoryEntry>,
}

impl FoodHistory {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            entries: storage::load(store, HISTORY_KEY).unwrap_or_default(),
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn contains(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.entries
            .iter()
            .any(|entry| entry.name.to_lowercase() == needle)
    }

    /// Records a submitted food unless its name is already known. A known
    /// entry keeps the calories it was first recorded with.
    pub fn upsert(&mut self, store: &mut dyn KeyValueStore, name: &str, kcal: f64) -> bool {
        if self.contains(name) {
            return false;
        }
        self.entries.push(HistoryEntry {
            name: name.to_string(),
            kcal,
        });
        storage::save(store, HISTORY_KEY, &self.entries);
        debug!("history gained {name}");
        true
    }

    pub fn delete(&mut self, store: &mut dyn KeyValueStore, index: usize) -> Option<HistoryEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        storage::save(store, HISTORY_KEY, &self.entries);
        Some(removed)
    }
}
