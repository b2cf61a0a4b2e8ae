//! Bit-string genetic operators.
//!
//! Initialization, crossover, mutation, and elitism for [`Chromosome`]
//! populations. All operators are value-semantic: they read their inputs
//! and return new chromosomes.
//!
//! # Crossover Operators
//!
//! - [`crossover`]: one- or two-point recombination with random cuts
//! - [`single_point_at`], [`two_point_at`]: the same with explicit cuts
//!
//! # Mutation Operators
//!
//! - [`mutate`]: independent per-gene bit flip
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - De Jong (1975), "An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems" (elitist strategies)

use super::chromosome::Chromosome;
use super::types::Direction;
use crate::error::ConfigError;
use rand::seq::index;
use rand::Rng;

// ============================================================================
// Parameters
// ============================================================================

/// Number of cut points used by [`crossover`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverPoints {
    /// One cut; children swap tails.
    #[default]
    One,
    /// Two cuts; children swap the middle segment.
    Two,
}

impl TryFrom<usize> for CrossoverPoints {
    type Error = ConfigError;

    fn try_from(points: usize) -> Result<Self, Self::Error> {
        match points {
            1 => Ok(CrossoverPoints::One),
            2 => Ok(CrossoverPoints::Two),
            other => Err(ConfigError::InvalidCrossoverPoints(other)),
        }
    }
}

/// Per-gene mutation probability, guaranteed to lie in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use u_bitga::ga::MutationRate;
///
/// assert!(MutationRate::new(0.01).is_ok());
/// assert!(MutationRate::new(1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationRate(f64);

impl MutationRate {
    /// Validates and wraps a probability.
    pub fn new(rate: f64) -> Result<Self, ConfigError> {
        if (0.0..=1.0).contains(&rate) {
            Ok(Self(rate))
        } else {
            Err(ConfigError::MutationRateOutOfRange(rate))
        }
    }

    /// The wrapped probability.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for MutationRate {
    type Error = ConfigError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        Self::new(rate)
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Creates `size` random chromosomes of `length` genes each.
///
/// Every gene is drawn independently and uniformly from {0, 1}.
pub fn init_population<R: Rng>(
    size: usize,
    length: usize,
    rng: &mut R,
) -> Result<Vec<Chromosome>, ConfigError> {
    if size == 0 {
        return Err(ConfigError::ZeroPopulation);
    }
    if length == 0 {
        return Err(ConfigError::ZeroChromosomeLength);
    }
    Ok(random_population(size, length, rng))
}

/// Unchecked form of [`init_population`] for callers that already
/// validated the shape.
pub(crate) fn random_population<R: Rng>(size: usize, length: usize, rng: &mut R) -> Vec<Chromosome> {
    (0..size).map(|_| Chromosome::random(length, rng)).collect()
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Recombines two parents into exactly two children.
///
/// Cut points are drawn from `[1, L-1]`, so a cut never falls on a
/// sequence boundary:
///
/// - [`CrossoverPoints::One`]: one cut `c`; `child1 = p1[..c] ++ p2[c..]`.
/// - [`CrossoverPoints::Two`]: two distinct cuts `c1 < c2`; the children
///   swap the segment `[c1, c2)`.
///
/// With `L == 2` only one interior cut exists and two-point crossover
/// degrades to one-point. With `L == 1` the children are copies of the
/// parents.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    points: CrossoverPoints,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return (parent1.clone(), parent2.clone());
    }

    match points {
        CrossoverPoints::Two if n >= 3 => {
            let mut cuts = index::sample(rng, n - 1, 2).into_vec();
            cuts.sort_unstable();
            two_point_at(parent1, parent2, cuts[0] + 1, cuts[1] + 1)
        }
        CrossoverPoints::Two => {
            tracing::trace!(length = n, "two-point crossover on length 2, using one cut");
            single_point_at(parent1, parent2, rng.random_range(1..n))
        }
        CrossoverPoints::One => single_point_at(parent1, parent2, rng.random_range(1..n)),
    }
}

/// One-point crossover at an explicit cut.
///
/// `cut == 0` or `cut == L` yields copies of the parents (swapped for 0).
///
/// # Panics
/// Panics if the parents have different lengths or `cut > L`.
pub fn single_point_at(
    parent1: &Chromosome,
    parent2: &Chromosome,
    cut: usize,
) -> (Chromosome, Chromosome) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(cut <= n, "cut point {cut} out of range for length {n}");

    let (a, b) = (parent1.genes(), parent2.genes());
    let child1 = a[..cut].iter().chain(&b[cut..]).copied().collect();
    let child2 = b[..cut].iter().chain(&a[cut..]).copied().collect();
    (child1, child2)
}

/// Two-point crossover at explicit cuts `c1 <= c2`.
///
/// The children swap the segment `[c1, c2)`. Coinciding cuts leave an
/// empty segment, so the children are copies of their respective parents.
///
/// # Panics
/// Panics if the parents have different lengths or the cuts do not satisfy
/// `c1 <= c2 <= L`.
pub fn two_point_at(
    parent1: &Chromosome,
    parent2: &Chromosome,
    c1: usize,
    c2: usize,
) -> (Chromosome, Chromosome) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(
        c1 <= c2 && c2 <= n,
        "cut points ({c1}, {c2}) out of range for length {n}"
    );

    let build = |outer: &[bool], inner: &[bool]| -> Chromosome {
        outer[..c1]
            .iter()
            .chain(&inner[c1..c2])
            .chain(&outer[c2..])
            .copied()
            .collect()
    };

    let (a, b) = (parent1.genes(), parent2.genes());
    (build(a, b), build(b, a))
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Flips each gene independently with probability `rate`.
///
/// A rate of 0 returns an identical chromosome without drawing from `rng`;
/// a rate of 1 returns the bitwise complement.
pub fn mutate<R: Rng>(chromosome: &Chromosome, rate: MutationRate, rng: &mut R) -> Chromosome {
    let p = rate.get();
    if p == 0.0 {
        return chromosome.clone();
    }
    chromosome
        .genes()
        .iter()
        .map(|&g| if rng.random_bool(p) { !g } else { g })
        .collect()
}

// ============================================================================
// Elitism
// ============================================================================

/// Returns copies of the `k` best individuals, best first.
///
/// Ordering follows `direction`; ties keep population order (stable sort).
/// `k == 0` returns an empty vector and `k` larger than the population
/// returns everyone.
///
/// # Panics
/// Panics if `fitness` is not index-aligned with `population`.
pub fn elitism(
    population: &[Chromosome],
    fitness: &[f64],
    k: usize,
    direction: Direction,
) -> Vec<Chromosome> {
    assert_eq!(
        population.len(),
        fitness.len(),
        "fitness must be index-aligned with population"
    );
    elite_indices(fitness, k, direction)
        .into_iter()
        .map(|i| population[i].clone())
        .collect()
}

/// Indices of the `k` best fitness values, best first, ties in index order.
pub fn elite_indices(fitness: &[f64], k: usize, direction: Direction) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }
    let mut order: Vec<usize> = (0..fitness.len()).collect();
    order.sort_by(|&a, &b| direction.compare(fitness[a], fitness[b]));
    order.truncate(k);
    order
}

// ============================================================================
// Tests
// ============================================================================
