//! Parent selection strategies.
//!
//! Selection reads a scored population (chromosomes plus an index-aligned
//! fitness slice) and picks one parent. It never modifies the population;
//! [`Selection::select`] returns a copy of the chosen chromosome and
//! [`Selection::select_index`] returns its position.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::chromosome::Chromosome;
use super::types::Direction;
use rand::seq::index;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_bitga::ga::{Chromosome, Direction, Selection};
/// use u_bitga::random::create_rng;
///
/// let population: Vec<Chromosome> = ["00", "01", "11"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let fitness = [0.0, 0.0, 5.0];
/// let mut rng = create_rng(42);
///
/// // Only one individual carries weight on the wheel.
/// let parent = Selection::Roulette.select(&population, &fitness, Direction::Maximize, &mut rng);
/// assert_eq!(parent.to_string(), "11");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: sample `k` distinct individuals, keep the best.
    ///
    /// `k` larger than the population is clamped to the population size.
    /// Works in either direction.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Maximization only: the probability of picking individual `i` is
    /// `f_i / sum(f)`. Negative and NaN scores carry zero weight. When the
    /// total weight is zero or not finite, falls back to a uniform pick.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent and returns a copy of it.
    ///
    /// # Panics
    /// Panics if `population` is empty or `fitness` is not index-aligned
    /// with it.
    pub fn select<R: Rng>(
        &self,
        population: &[Chromosome],
        fitness: &[f64],
        direction: Direction,
        rng: &mut R,
    ) -> Chromosome {
        population[self.select_index(population, fitness, direction, rng)].clone()
    }

    /// Selects a parent and returns its index in `population`.
    ///
    /// # Panics
    /// Panics if `population` is empty or `fitness` is not index-aligned
    /// with it.
    pub fn select_index<R: Rng>(
        &self,
        population: &[Chromosome],
        fitness: &[f64],
        direction: Direction,
        rng: &mut R,
    ) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );
        assert_eq!(
            population.len(),
            fitness.len(),
            "fitness must be index-aligned with population"
        );

        match self {
            Selection::Tournament(k) => tournament(fitness, *k, direction, rng),
            Selection::Roulette => roulette(fitness, rng),
        }
    }
}

/// Tournament selection: sample k distinct indices, return the best.
///
/// Ties go to the contestant drawn first.
fn tournament<R: Rng>(fitness: &[f64], k: usize, direction: Direction, rng: &mut R) -> usize {
    let n = fitness.len();
    let k = k.clamp(1, n);

    let mut contestants = index::sample(rng, n, k).into_iter();
    let mut best_idx = contestants
        .next()
        .expect("tournament samples at least one contestant");
    for idx in contestants {
        if direction.is_better(fitness[idx], fitness[best_idx]) {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection over raw (maximization) fitness.
///
/// Draws `threshold` uniformly in `[0, total)` and returns the first
/// individual whose cumulative weight exceeds it.
fn roulette<R: Rng>(fitness: &[f64], rng: &mut R) -> usize {
    let n = fitness.len();
    if n == 1 {
        return 0;
    }

    let weight = |f: f64| if f > 0.0 { f } else { 0.0 };
    let total: f64 = fitness.iter().map(|&f| weight(f)).sum();

    if !(total > 0.0 && total.is_finite()) {
        tracing::trace!(total, "degenerate roulette wheel, selecting uniformly");
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last_weighted = 0;
    for (i, &f) in fitness.iter().enumerate() {
        let w = weight(f);
        if w == 0.0 {
            continue;
        }
        cumulative += w;
        last_weighted = i;
        if cumulative > threshold {
            return i;
        }
    }

    last_weighted // floating-point fallback
}
