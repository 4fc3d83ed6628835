use crate::archive::DailyLog;
use crate::history::FoodHistory;
use crate::models::{DailyLogEntry, FoodItem, HistoryEntry, SnapshotResponse, Totals};
use crate::session::{Session, parse_number};
use crate::storage::KeyValueStore;
use chrono::{Local, NaiveDate};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The user declined; nothing changed.
    Declined,
    /// The session was cleared; `archived` says whether a log entry was written.
    Cleared { archived: bool },
}

/// Owns the session, the food history and the daily log, and writes every
/// change through to its store.
pub struct Tracker<S> {
    store: S,
    session: Session,
    history: FoodHistory,
    logs: DailyLog,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn load(store: S) -> Self {
        let session = Session::load(&store);
        let history = FoodHistory::load(&store);
        let logs = DailyLog::load(&store);
        Self {
            store,
            session,
            history,
            logs,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn items(&self) -> &[FoodItem] {
        self.session.items()
    }

    pub fn goal(&self) -> Option<f64> {
        self.session.goal()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn daily_logs(&self) -> &[DailyLogEntry] {
        self.logs.entries()
    }

    pub fn totals(&self) -> Totals {
        self.session.totals()
    }

    pub fn set_goal(&mut self, text: &str) -> bool {
        self.session.set_goal(&mut self.store, text)
    }

    /// Adds a submitted food and records it in the history. Returns `None`
    /// without touching anything when the name is blank or the calories are
    /// not a number.
    pub fn add_item(&mut self, name: &str, kcal_text: &str) -> Option<FoodItem> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let kcal = parse_number(kcal_text)?;

        let item = self.session.add(&mut self.store, name, kcal);
        self.history.upsert(&mut self.store, name, kcal);
        Some(item)
    }

    pub fn delete_item(&mut self, id: i64) -> bool {
        self.session.delete(&mut self.store, id)
    }

    /// Logs a history entry again under a fresh id. The history is left as is.
    pub fn quick_add(&mut self, index: usize) -> Option<FoodItem> {
        let entry = self.history.get(index)?.clone();
        Some(self.session.add(&mut self.store, &entry.name, entry.kcal))
    }

    pub fn delete_history(&mut self, index: usize) -> Option<HistoryEntry> {
        self.history.delete(&mut self.store, index)
    }

    pub fn delete_log(&mut self, index: usize) -> Option<DailyLogEntry> {
        self.logs.delete(&mut self.store, index)
    }

    pub fn reset(&mut self, confirmed: bool) -> ResetOutcome {
        self.reset_on(Local::now().date_naive(), confirmed)
    }

    pub fn reset_on(&mut self, today: NaiveDate, confirmed: bool) -> ResetOutcome {
        if !confirmed {
            return ResetOutcome::Declined;
        }

        let archived = !self.session.is_empty();
        if archived {
            let total = self.session.totals().total;
            self.logs.append(&mut self.store, today, total);
        }
        self.session.clear(&mut self.store);
        info!("session reset (archived: {archived})");

        ResetOutcome::Cleared { archived }
    }

    pub fn snapshot(&self) -> SnapshotResponse {
        let Totals { total, remaining } = self.totals();
        SnapshotResponse {
            items: self.items().to_vec(),
            goal: self.goal(),
            total,
            remaining,
            history: self.history().to_vec(),
            daily_logs: self.daily_logs().to_vec(),
        }
    }
}
