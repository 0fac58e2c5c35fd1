//! Round generation: a shuffled label-to-value grid plus the secret.
//!
//! Values and labels are permuted independently and then zipped by position.
//! A single combined shuffle would pair them differently, so the two
//! permutations stay separate.

use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::constants::*;
use crate::types::{Cell, Grid, Round};

/// Draw [`GRID_SIZE`] distinct values from `[VALUE_MIN, VALUE_MAX)` and shuffle them.
pub fn draw_values<R: Rng + ?Sized>(rng: &mut R) -> Vec<u32> {
    let mut values: Vec<u32> = index::sample(rng, VALUE_SPAN, GRID_SIZE)
        .into_iter()
        .map(|i| VALUE_MIN + i as u32)
        .collect();
    values.shuffle(rng);
    values
}

/// Labels `grid-1`..`grid-182` in a random order.
pub fn shuffled_labels<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let mut labels: Vec<String> = (1..=GRID_SIZE).map(cell_label).collect();
    labels.shuffle(rng);
    labels
}

/// Generate one round. Pure apart from the random source.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Round {
    let values = draw_values(rng);
    let labels = shuffled_labels(rng);

    // Uniform pick over the value set, independent of the permutations.
    let secret = values[rng.random_range(0..values.len())];

    let cells = labels
        .into_iter()
        .zip(values)
        .map(|(label, value)| Cell { label, value })
        .collect();

    Round {
        grid: Grid::from_cells(cells),
        secret,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_generate_shape() {
        let mut rng = SmallRng::seed_from_u64(7);
        let round = generate(&mut rng);
        assert_eq!(round.grid.len(), GRID_SIZE);

        let values: HashSet<u32> = round.grid.values().collect();
        assert_eq!(values.len(), GRID_SIZE);
        assert!(values.iter().all(|v| (VALUE_MIN..VALUE_MAX).contains(v)));

        let labels: HashSet<&str> = round.grid.labels().collect();
        let expected: HashSet<String> = (1..=GRID_SIZE).map(cell_label).collect();
        assert_eq!(labels.len(), GRID_SIZE);
        assert!(expected.iter().all(|l| labels.contains(l.as_str())));

        assert!(round.grid.contains_value(round.secret));
    }

    #[test]
    fn test_same_seed_same_round() {
        let a = generate(&mut SmallRng::seed_from_u64(42));
        let b = generate(&mut SmallRng::seed_from_u64(42));
        assert_eq!(a.grid.cells(), b.grid.cells());
        assert_eq!(a.secret, b.secret);
    }

    #[test]
    fn test_labels_are_shuffled() {
        // 182! orderings; a seeded run landing on the identity would be a broken shuffle.
        let mut rng = SmallRng::seed_from_u64(3);
        let labels = shuffled_labels(&mut rng);
        let identity: Vec<String> = (1..=GRID_SIZE).map(cell_label).collect();
        assert_ne!(labels, identity);
    }
}
