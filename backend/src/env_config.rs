//! Environment configuration for the server binary.
//!
//! Reads `GRIDGUESS_PORT`, `GRIDGUESS_DB_PATH`, `GRIDGUESS_RETENTION`,
//! `GRIDGUESS_RESTART_DELAY_MS` and `RUST_LOG`. Unparseable values fall back
//! to their defaults with a warning.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::constants::*;
use crate::types::RetentionPolicy;

/// Install the global `tracing` subscriber. Filter from `RUST_LOG`, default `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn parse_or_default<T: std::str::FromStr>(var: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(s) => s.trim().parse().unwrap_or_else(|_| {
            warn!(var, value = %s, "unparseable value, using default");
            default
        }),
    }
}

/// Read `GRIDGUESS_PORT` (default 9000).
pub fn server_port() -> u16 {
    parse_or_default("GRIDGUESS_PORT", std::env::var("GRIDGUESS_PORT").ok(), DEFAULT_PORT)
}

/// Read `GRIDGUESS_DB_PATH` (default `data/gridguess.sqlite3`).
pub fn database_path() -> PathBuf {
    std::env::var("GRIDGUESS_DB_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

/// Read `GRIDGUESS_RETENTION`: `accumulate` (default) or `replace`.
pub fn retention_policy() -> RetentionPolicy {
    retention_from(std::env::var("GRIDGUESS_RETENTION").ok())
}

fn retention_from(raw: Option<String>) -> RetentionPolicy {
    match raw {
        None => RetentionPolicy::default(),
        Some(s) => RetentionPolicy::parse(&s).unwrap_or_else(|| {
            warn!(value = %s, "unknown GRIDGUESS_RETENTION, using accumulate");
            RetentionPolicy::default()
        }),
    }
}

/// Read `GRIDGUESS_RESTART_DELAY_MS` (default 2000). Zero disables the pause.
pub fn restart_delay() -> Duration {
    Duration::from_millis(parse_or_default(
        "GRIDGUESS_RESTART_DELAY_MS",
        std::env::var("GRIDGUESS_RESTART_DELAY_MS").ok(),
        DEFAULT_RESTART_DELAY_MS,
    ))
}
