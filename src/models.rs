use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: i64,
    pub name: String,
    pub kcal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    pub kcal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLogEntry {
    pub date: String,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total: f64,
    pub remaining: Option<f64>,
}

/// Form body of the goal control. Kept as text so an empty submission is a no-op.
#[derive(Debug, Deserialize)]
pub struct GoalRequest {
    #[serde(default, deserialize_with = "text_or_number")]
    pub goal: String,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub kcal: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub items: Vec<FoodItem>,
    pub goal: Option<f64>,
    pub total: f64,
    pub remaining: Option<f64>,
    pub history: Vec<HistoryEntry>,
    pub daily_logs: Vec<DailyLogEntry>,
}

/// Accepts either the raw text of an input field or a JSON number.
fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(value) => value.to_string(),
    })
}
