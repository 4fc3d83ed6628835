use crate::models::DailyLogEntry;
use crate::storage::{self, DAILY_LOGS_KEY, KeyValueStore};
use chrono::NaiveDate;
use tracing::info;

/// Summaries of past sessions, one per confirmed reset.
#[derive(Debug, Default)]
pub struct DailyLog {
    entries: Vec<DailyLogEntry>,
}

impl DailyLog {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            entries: storage::load(store, DAILY_LOGS_KEY).unwrap_or_default(),
        }
    }

    pub fn entries(&self) -> &[DailyLogEntry] {
        &self.entries
    }

    pub fn append(&mut self, store: &mut dyn KeyValueStore, date: NaiveDate, total: f64) {
        let entry = DailyLogEntry {
            date: format_log_date(date),
            total,
        };
        info!("archived {} with {} kcal", entry.date, entry.total);
        self.entries.push(entry);
        storage::save(store, DAILY_LOGS_KEY, &self.entries);
    }

    pub fn delete(&mut self, store: &mut dyn KeyValueStore, index: usize) -> Option<DailyLogEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        storage::save(store, DAILY_LOGS_KEY, &self.entries);
        Some(removed)
    }
}

/// "Monday, Jan 5": weekday, abbreviated month, day of month. No year.
pub fn format_log_date(date: NaiveDate) -> String {
    date.format("%A, %b %-d").to_string()
}
