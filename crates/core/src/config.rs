//! Runtime configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory.
//!
//! - `PROMPT_REPO_DB`: database file path
//! - `PROMPT_REPO_MAX_CONNECTIONS`: pool size (default 5)
//! - `PROMPT_REPO_BUSY_TIMEOUT_MS`: SQLite busy timeout (default 5000)

use std::{path::PathBuf, time::Duration};

use crate::errors::{PromptRepoError, Result};

pub const DB_PATH_VAR: &str = "PROMPT_REPO_DB";
pub const MAX_CONNECTIONS_VAR: &str = "PROMPT_REPO_MAX_CONNECTIONS";
pub const BUSY_TIMEOUT_VAR: &str = "PROMPT_REPO_BUSY_TIMEOUT_MS";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path:         PathBuf,
    pub max_connections: u32,
    pub busy_timeout:    Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path:         default_db_path(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout:    Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        }
    }
}

impl Config {
    /// Load configuration from `.env` and the process environment
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup(DB_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(MAX_CONNECTIONS_VAR) {
            let value: u32 = parse_var(MAX_CONNECTIONS_VAR, &raw)?;
            if value == 0 {
                return Err(PromptRepoError::ConfigError(format!(
                    "{} must be at least 1",
                    MAX_CONNECTIONS_VAR
                )));
            }
            config.max_connections = value;
        }

        if let Some(raw) = lookup(BUSY_TIMEOUT_VAR) {
            let ms: u64 = parse_var(BUSY_TIMEOUT_VAR, &raw)?;
            config.busy_timeout = Duration::from_millis(ms);
        }

        Ok(config)
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        PromptRepoError::ConfigError(format!("{} has invalid value '{}'", key, raw))
    })
}

/// `<data dir>/prompt-repo/prompts.db`, falling back to the working directory
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("prompt-repo"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("prompts.db")
}
