//! Tournament selection.
//!
//! Each tournament samples `k` distinct contestants and keeps the fittest.
//! Repeating the tournament once per slot builds a same-size mating pool.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::seq::index;
use rand::Rng;

/// Runs one tournament and returns the winner's index.
///
/// Samples `min(k, n)` distinct indices (at least one) uniformly from
/// `0..fitness.len()`. Higher fitness wins; on ties the contestant drawn
/// first is kept.
///
/// # Complexity
/// O(k) per tournament
///
/// # Panics
/// Panics if `fitness` is empty.
pub fn tournament<R: Rng + ?Sized>(fitness: &[f64], k: usize, rng: &mut R) -> usize {
    let n = fitness.len();
    assert!(n > 0, "cannot select from empty population");
    let k = k.clamp(1, n);

    let mut contestants = index::sample(rng, n, k).into_iter();
    let mut best_idx = contestants
        .next()
        .expect("tournament samples at least one contestant");
    for idx in contestants {
        if fitness[idx] > fitness[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// Fills a pool of `fitness.len()` winner indices, one tournament per slot.
pub fn tournament_pool<R: Rng + ?Sized>(fitness: &[f64], k: usize, rng: &mut R) -> Vec<usize> {
    (0..fitness.len())
        .map(|_| tournament(fitness, k, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_full_tournament_always_picks_best() {
        // k == n with distinct sampling means every index competes.
        let fitness = [0.1, 0.2, 0.9, 0.05];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            assert_eq!(tournament(&fitness, 4, &mut rng), 2);
        }
    }

    #[test]
    fn test_tournament_favors_best() {
        let fitness = [0.1, 0.2, 0.9, 0.05];
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            counts[tournament(&fitness, 2, &mut rng)] += 1;
        }
        // Index 2 wins every pair it is in: P = 1 - C(3,2)/C(4,2) = 0.5
        assert!(
            counts[2] > 4500,
            "expected best to win ~50% of the time, got {counts:?}"
        );
        // The worst never wins a pair.
        assert_eq!(counts[3], 0);
    }

    #[test]
    fn test_tournament_size_1_is_uniform() {
        let fitness = [0.1, 0.2, 0.9, 0.05];
        let mut rng = StdRng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[tournament(&fitness, 1, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 2000, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_ties_keep_first_drawn() {
        let fitness = [0.0; 5];
        let mut rng = StdRng::seed_from_u64(3);

        // All zero: the winner is whichever index was drawn first, so every
        // index should show up across many tournaments.
        let mut seen = [false; 5];
        for _ in 0..1000 {
            seen[tournament(&fitness, 3, &mut rng)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_oversized_k_is_clamped() {
        let fitness = [0.3, 0.7];
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(tournament(&fitness, 10, &mut rng), 1);
    }

    #[test]
    fn test_pool_has_population_size() {
        let fitness = [0.1, 0.0, 0.4, 0.2, 0.3];
        let mut rng = StdRng::seed_from_u64(42);
        let pool = tournament_pool(&fitness, 3, &mut rng);
        assert_eq!(pool.len(), 5);
        assert!(pool.iter().all(|&i| i < 5));
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = StdRng::seed_from_u64(42);
        tournament(&[], 3, &mut rng);
    }
}
