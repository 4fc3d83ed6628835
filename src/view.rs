use std::collections::BTreeSet;

/// Transient page flags. None of this is persisted.
#[derive(Debug, Default)]
pub struct ViewState {
    pub goal_draft: String,
    pub show_history: bool,
    pub show_logs: bool,
    active_item: Option<i64>,
    history_deletes: BTreeSet<usize>,
    log_deletes: BTreeSet<usize>,
}

impl ViewState {
    pub fn active_item(&self) -> Option<i64> {
        self.active_item
    }

    /// Activates `id`, or deactivates it when it is already the active item.
    pub fn toggle_item(&mut self, id: i64) {
        self.active_item = if self.active_item == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn item_removed(&mut self, id: i64) {
        if self.active_item == Some(id) {
            self.active_item = None;
        }
    }

    pub fn toggle_history_panel(&mut self) {
        self.show_history = !self.show_history;
    }

    pub fn toggle_log_panel(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub fn history_delete_visible(&self, index: usize) -> bool {
        self.history_deletes.contains(&index)
    }

    pub fn toggle_history_delete(&mut self, index: usize) {
        toggle(&mut self.history_deletes, index);
    }

    pub fn history_removed(&mut self, index: usize) {
        shift_after_removal(&mut self.history_deletes, index);
    }

    pub fn log_delete_visible(&self, index: usize) -> bool {
        self.log_deletes.contains(&index)
    }

    pub fn toggle_log_delete(&mut self, index: usize) {
        toggle(&mut self.log_deletes, index);
    }

    pub fn log_removed(&mut self, index: usize) {
        shift_after_removal(&mut self.log_deletes, index);
    }

    /// Drops the flags tied to the session. Panel and row toggles of the
    /// history and log lists are kept.
    pub fn session_reset(&mut self) {
        self.goal_draft.clear();
        self.active_item = None;
    }
}

fn toggle(set: &mut BTreeSet<usize>, index: usize) {
    if !set.remove(&index) {
        set.insert(index);
    }
}

// Flags follow their rows when an earlier row disappears.
fn shift_after_removal(set: &mut BTreeSet<usize>, removed: usize) {
    *set = set
        .iter()
        .filter(|&&index| index != removed)
        .map(|&index| if index > removed { index - 1 } else { index })
        .collect();
}
