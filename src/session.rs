use crate::models::{FoodItem, Totals};
use crate::storage::{self, GOAL_KEY, ITEMS_KEY, KeyValueStore};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

/// Today's items and the optional goal.
#[derive(Debug, Default)]
pub struct Session {
    items: Vec<FoodItem>,
    goal: Option<f64>,
    last_id: i64,
}

// Older stores kept the goal as the raw input text.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredGoal {
    Number(f64),
    Text(String),
}

impl Session {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let items: Vec<FoodItem> = storage::load(store, ITEMS_KEY).unwrap_or_default();
        let goal = match storage::load(store, GOAL_KEY) {
            Some(StoredGoal::Number(goal)) => Some(goal),
            Some(StoredGoal::Text(text)) => parse_number(&text),
            None => None,
        };
        let last_id = items.iter().map(|item| item.id).max().unwrap_or(0);
        debug!("loaded session with {} items, goal {:?}", items.len(), goal);

        Self {
            items,
            goal,
            last_id,
        }
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn goal(&self) -> Option<f64> {
        self.goal
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn totals(&self) -> Totals {
        let total = self.items.iter().map(|item| item.kcal).sum();
        Totals {
            total,
            remaining: self.goal.map(|goal| goal - total),
        }
    }

    /// Sets the goal once. Empty or non-numeric text, or an existing goal, is a no-op.
    pub fn set_goal(&mut self, store: &mut dyn KeyValueStore, text: &str) -> bool {
        if self.goal.is_some() {
            return false;
        }
        let Some(goal) = parse_number(text) else {
            return false;
        };

        self.goal = Some(goal);
        storage::save(store, GOAL_KEY, &goal);
        info!("daily goal set to {goal} kcal");
        true
    }

    pub fn add(&mut self, store: &mut dyn KeyValueStore, name: &str, kcal: f64) -> FoodItem {
        let item = FoodItem {
            id: self.mint_id(),
            name: name.to_string(),
            kcal,
        };
        self.items.push(item.clone());
        storage::save(store, ITEMS_KEY, &self.items);
        debug!("added item {} ({} kcal)", item.name, item.kcal);
        item
    }

    pub fn delete(&mut self, store: &mut dyn KeyValueStore, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return false;
        }
        storage::save(store, ITEMS_KEY, &self.items);
        true
    }

    /// Drops items and goal, in memory and in the store.
    pub fn clear(&mut self, store: &mut dyn KeyValueStore) {
        self.items.clear();
        self.goal = None;
        store.remove(ITEMS_KEY);
        store.remove(GOAL_KEY);
    }

    // Millisecond timestamps, bumped past the previous id when two land together.
    fn mint_id(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

/// Parses a calorie or goal input. Blank, non-numeric and non-finite text yields `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}
