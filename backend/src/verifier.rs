//! Guess checking against the stored secret.

use serde_json::Value;
use tracing::info;

use crate::error::GameError;
use crate::storage::RoundStore;
use crate::types::GuessOutcome;

/// Coerce a submitted JSON value to an integer guess.
///
/// Accepts integers, finite floats (truncated toward zero) and strings holding
/// a base-10 integer. Everything else is [`GameError::InvalidInput`].
pub fn parse_guess(value: &Value) -> Result<i64, GameError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            let t = n.as_f64().map(f64::trunc).unwrap_or(f64::NAN);
            if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
                Ok(t as i64)
            } else {
                Err(GameError::InvalidInput(format!("{n} is out of range")))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| GameError::InvalidInput(format!("{s:?} is not an integer"))),
        other => Err(GameError::InvalidInput(format!("expected a number, got {other}"))),
    }
}

/// Compare `guess` with the stored secret, then clear the store.
///
/// An empty store yields [`GuessOutcome::Incorrect`]. The store is cleared
/// whatever the outcome.
pub fn verify(store: &dyn RoundStore, guess: i64) -> Result<GuessOutcome, GameError> {
    // Read and clear in one step so concurrent checks cannot both match.
    let secret = store.take()?;
    let outcome = match secret {
        Some(s) if s == guess => GuessOutcome::Correct,
        _ => GuessOutcome::Incorrect,
    };
    info!(guess, had_secret = secret.is_some(), outcome = outcome.as_str(), "guess verified");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryRoundStore, SqliteRoundStore};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use crate::types::RetentionPolicy;
    use serde_json::json;

    #[test]
    fn test_correct_then_cleared() {
        let store = MemoryRoundStore::new(RetentionPolicy::Accumulate);
        store.save(503).unwrap();
        assert_eq!(verify(&store, 503).unwrap(), GuessOutcome::Correct);
        assert!(store.is_empty().unwrap());
        assert_eq!(verify(&store, 503).unwrap(), GuessOutcome::Incorrect);
    }

    #[test]
    fn test_wrong_guess_still_clears() {
        let store = MemoryRoundStore::new(RetentionPolicy::Accumulate);
        store.save(503).unwrap();
        assert_eq!(verify(&store, 504).unwrap(), GuessOutcome::Incorrect);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_empty_store_is_incorrect() {
        let store = MemoryRoundStore::new(RetentionPolicy::Accumulate);
        for guess in [0, 100, 503, 998, -1] {
            assert_eq!(verify(&store, guess).unwrap(), GuessOutcome::Incorrect);
        }
    }

    #[test]
    fn test_accumulated_rounds_check_newest() {
        let store = MemoryRoundStore::new(RetentionPolicy::Accumulate);
        store.save(111).unwrap();
        store.save(222).unwrap();
        assert_eq!(verify(&store, 222).unwrap(), GuessOutcome::Correct);
        assert!(store.is_empty().unwrap());
    }

    /// Two threads race to check the same saved secret.
    fn race_same_guess(store: Arc<dyn RoundStore>, rounds: usize) {
        for _ in 0..rounds {
            store.save(503).unwrap();
            let barrier = Arc::new(Barrier::new(2));
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let store = Arc::clone(&store);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        verify(store.as_ref(), 503).unwrap()
                    })
                })
                .collect();
            let correct = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|o| *o == GuessOutcome::Correct)
                .count();
            assert_eq!(correct, 1, "saved secret must verify correct exactly once");
            assert!(store.is_empty().unwrap());
        }
    }

    #[test]
    fn test_concurrent_checks_match_once_sqlite() {
        let store = Arc::new(SqliteRoundStore::open_in_memory(RetentionPolicy::Accumulate).unwrap());
        race_same_guess(store, 500);
    }

    #[test]
    fn test_concurrent_checks_match_once_memory() {
        let store = Arc::new(MemoryRoundStore::new(RetentionPolicy::Accumulate));
        race_same_guess(store, 500);
    }

    #[test]
    fn test_concurrent_save_survives_check() {
        let store: Arc<dyn RoundStore> =
            Arc::new(SqliteRoundStore::open_in_memory(RetentionPolicy::Accumulate).unwrap());
        for _ in 0..500 {
            store.clear().unwrap();
            store.save(503).unwrap();
            let barrier = Arc::new(Barrier::new(2));
            let checker = {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    verify(store.as_ref(), 503).unwrap()
                })
            };
            barrier.wait();
            store.save(777).unwrap();
            let outcome = checker.join().unwrap();
            // A check that matched the old round ran before the new save, so
            // the new secret must still be there.
            if outcome == GuessOutcome::Correct {
                assert_eq!(store.read().unwrap(), Some(777));
            }
        }
    }

    #[test]
    fn test_parse_guess_accepts_int_like() {
        assert_eq!(parse_guess(&json!(503)).unwrap(), 503);
        assert_eq!(parse_guess(&json!(-7)).unwrap(), -7);
        assert_eq!(parse_guess(&json!(503.9)).unwrap(), 503);
        assert_eq!(parse_guess(&json!(-2.5)).unwrap(), -2);
        assert_eq!(parse_guess(&json!("503")).unwrap(), 503);
        assert_eq!(parse_guess(&json!(" 42 ")).unwrap(), 42);
    }

    #[test]
    fn test_parse_guess_rejects_garbage() {
        for bad in [
            json!("abc"),
            json!("5.5"),
            json!(""),
            json!(true),
            json!(null),
            json!([503]),
            json!({ "n": 503 }),
            json!(1e300),
        ] {
            let err = parse_guess(&bad).unwrap_err();
            assert!(matches!(err, GameError::InvalidInput(_)), "{bad}");
        }
    }
}
