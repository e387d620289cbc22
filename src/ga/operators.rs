//! Genetic operators for waypoint chromosomes.
//!
//! Unlike permutation encodings, waypoint genes are free node indices:
//! any value in `0..node_count` may appear any number of times. That keeps
//! the operators simple and always closed over valid chromosomes.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: swap tails after one random cut point
//!
//! # Mutation Operators
//!
//! - [`reset_mutation`]: redraw each gene independently with a fixed probability
//!
//! # Path Helpers
//!
//! - [`collapse_repeats`]: drop consecutive duplicate nodes from a path

use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover.
///
/// Picks a cut point in `[1, len - 1]` and swaps the tails of the two
/// parents. Parents of different lengths are cut at a point valid for the
/// shorter one.
///
/// Parents with fewer than two genes have no interior cut point and are
/// returned unchanged.
///
/// # Complexity
/// O(n) time, no extra allocation beyond the tail swap
pub fn single_point_crossover<R: Rng + ?Sized>(
    mut parent1: Vec<usize>,
    mut parent2: Vec<usize>,
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len().min(parent2.len());
    if n < 2 {
        return (parent1, parent2);
    }

    let point = rng.random_range(1..n);
    let tail1 = parent1.split_off(point);
    let tail2 = parent2.split_off(point);
    parent1.extend(tail2);
    parent2.extend(tail1);
    (parent1, parent2)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Reset mutation: each gene is independently replaced by a random node in
/// `0..node_count` with probability `rate`.
///
/// A rate of `0.0` never touches the chromosome.
///
/// # Complexity
/// O(n)
pub fn reset_mutation<R: Rng + ?Sized>(
    chromosome: &mut [usize],
    node_count: usize,
    rate: f64,
    rng: &mut R,
) {
    if rate <= 0.0 || node_count == 0 {
        return;
    }
    for gene in chromosome.iter_mut() {
        if rng.random_range(0.0..1.0) < rate {
            *gene = rng.random_range(0..node_count);
        }
    }
}

// ============================================================================
// Path helpers
// ============================================================================

/// Removes consecutive duplicate nodes, keeping the first of each run.
///
/// ```
/// use u_pathga::ga::operators::collapse_repeats;
///
/// assert_eq!(collapse_repeats(&[0, 3, 3, 2, 4, 4]), vec![0, 3, 2, 4]);
/// ```
pub fn collapse_repeats(path: &[usize]) -> Vec<usize> {
    let mut out = path.to_vec();
    out.dedup();
    out
}

// ============================================================================
// Tests
// ============================================================================
