use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, error, warn};

pub const ITEMS_KEY: &str = "items";
pub const GOAL_KEY: &str = "goal";
pub const HISTORY_KEY: &str = "calorie-history";
pub const DAILY_LOGS_KEY: &str = "daily-logs";

/// Whole-value key-value persistence.
///
/// Calls never fail from the caller's point of view. Implementations log what
/// goes wrong and carry on, and an entry that cannot be read is simply absent.
pub trait KeyValueStore: Send {
    fn read(&self, key: &str) -> Option<Value>;
    fn write(&mut self, key: &str, value: Value);
    fn remove(&mut self, key: &str);
}

/// Reads `key` and decodes it as `T`, treating a malformed value as absent.
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let value = store.read(key)?;
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            warn!("ignoring malformed value under '{key}': {err}");
            None
        }
    }
}

pub fn save<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_value(value) {
        Ok(value) => store.write(key, value),
        Err(err) => error!("failed to encode value for '{key}': {err}"),
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read(&self, key: &str) -> Option<Value> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: Value) {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// A store mirrored to a single JSON object file, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path);
        debug!("opened store at {} with {} keys", path.display(), entries.len());
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let payload = match serde_json::to_vec_pretty(&self.entries) {
            Ok(payload) => payload,
            Err(err) => {
                error!("failed to encode store: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, payload) {
            error!("failed to write store {}: {err}", self.path.display());
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }
}

fn read_entries(path: &Path) -> Map<String, Value> {
    match fs::read(path) {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse store file: {err}");
                Map::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(err) => {
            error!("failed to read store file: {err}");
            Map::new()
        }
    }
}
