use serde::Deserialize;
use std::fmt;

pub const DB_PATH: &str = "DB_PATH";
pub const DB_HOST: &str = "DB_HOST";
pub const DB_PASSWORD: &str = "DB_PASSWORD";

pub const DEFAULT_DB_PATH: &str = "users.db";
pub const DEFAULT_DB_HOST: &str = "localhost";

/// User store configuration
///
/// Only `db_path` selects the connection target. `db_host` and `db_password`
/// are carried for deployments that share an environment with networked
/// databases; the SQLite backend ignores them.
#[derive(Clone, PartialEq, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_db_host")]
    pub db_host: String,
    #[serde(default)]
    pub db_password: Option<String>,
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_db_host() -> String {
    DEFAULT_DB_HOST.to_string()
}

impl StoreConfig {
    /// Create a config pointing at the given database file
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            db_host: default_db_host(),
            db_password: None,
        }
    }

    /// Read `DB_PATH`, `DB_HOST` and `DB_PASSWORD` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            db_path: lookup(DB_PATH).unwrap_or_else(default_db_path),
            db_host: lookup(DB_HOST).unwrap_or_else(default_db_host),
            db_password: lookup(DB_PASSWORD),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("db_path", &self.db_path)
            .field("db_host", &self.db_host)
            .field("db_password", &self.db_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
