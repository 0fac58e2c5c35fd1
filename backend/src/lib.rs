//! # Grid Guess
//!
//! A web-served number guessing game. Each round shows a grid of 182 cells
//! (`grid-1`..`grid-182`), each holding a distinct number from `[100, 999)`,
//! and asks the player to find one of them.
//!
//! | Module | Role |
//! |--------|------|
//! | [`grid`] | Generate a round: two independent shuffles (values, labels) zipped by position, plus a secret drawn from the values |
//! | [`storage`] | [`storage::RoundStore`] trait with SQLite and in-memory backends |
//! | [`verifier`] | Coerce a guess to an integer, compare with the stored secret, clear the store |
//! | [`render`] | HTML page for a round |
//! | [`server`] | Axum router wiring the above to `/`, `/restart`, `/check` |
//! | [`env_config`] | Environment variables and tracing setup |
//!
//! Round lifecycle: `NoSecret → SecretPersisted (save) → Cleared (verify)`.

pub mod constants;
pub mod env_config;
pub mod error;
pub mod grid;
pub mod render;
pub mod server;
pub mod storage;
pub mod types;
pub mod verifier;
