use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: resolve_port(env::var("PORT").ok().as_deref()),
            data_path: resolve_data_path(env::var("APP_DATA_PATH").ok()),
        }
    }
}

fn resolve_port(value: Option<&str>) -> u16 {
    let Some(value) = value else {
        return DEFAULT_PORT;
    };
    value.trim().parse::<u16>().unwrap_or_else(|_| {
        warn!("PORT '{value}' is not a valid port, using {DEFAULT_PORT}");
        DEFAULT_PORT
    })
}

fn resolve_data_path(value: Option<String>) -> PathBuf {
    value
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}
