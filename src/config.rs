//! Server configuration, read from the environment with local defaults.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub scores_path: PathBuf,
    pub decks_dir: PathBuf,
    pub card_library_path: PathBuf,
    pub mascots_dir: PathBuf,
}

const DEFAULT_PORT: u16 = 3000;

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("Invalid PORT value {:?} ({}), using {}", raw, e, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        let path = |key: &str, default: &str| PathBuf::from(lookup(key).unwrap_or_else(|| default.into()));

        Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            scores_path: path("SCORES_PATH", "scores.json"),
            decks_dir: path("DECKS_DIR", "decks"),
            card_library_path: path("CARD_LIBRARY_PATH", "cardLibrary.json"),
            mascots_dir: path("MASCOTS_DIR", "mascots"),
        }
    }
}
