pub mod app;
pub mod archive;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod models;
pub mod session;
pub mod state;
pub mod storage;
pub mod tracker;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use tracker::{ResetOutcome, Tracker};
