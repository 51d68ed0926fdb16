//! Process configuration, read from environment variables.
//!
//! | Variable           | Default         | Description                    |
//! |--------------------|-----------------|--------------------------------|
//! | `LIBRARY_PORT`     | `5000`          | HTTP listen port               |
//! | `LIBRARY_DATABASE` | `database.json` | Path of the JSON datastore     |
//! | `LIBRARY_LOG`      | `info`          | tracing filter directive       |

use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub database: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`, falling back to defaults for absent or unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: parse_or(lookup("LIBRARY_PORT"), 5000),
            database: lookup("LIBRARY_DATABASE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("database.json")),
            log_level: lookup("LIBRARY_LOG").unwrap_or_else(|| "info".to_owned()),
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
