//! Core trait definitions for the GA engine.
//!
//! [`FitnessEvaluator`] is the contract between the generic engine and a
//! concrete problem. Each evaluator declares its own optimization
//! [`Direction`], which is what lets selection and elitism stay
//! direction-agnostic.

use super::chromosome::Chromosome;
use std::cmp::Ordering;

/// Optimization sense of a fitness function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Higher fitness is better.
    #[default]
    Maximize,
    /// Lower fitness is better.
    Minimize,
}

impl Direction {
    /// The worst possible fitness in this direction.
    pub fn worst(self) -> f64 {
        match self {
            Direction::Maximize => f64::NEG_INFINITY,
            Direction::Minimize => f64::INFINITY,
        }
    }

    /// Orders two fitness values so that the better one compares `Less`.
    ///
    /// NaN ranks as [`worst`](Self::worst), which makes this a total order
    /// suitable for sorting.
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        let a = self.sanitize(a);
        let b = self.sanitize(b);
        match self {
            Direction::Maximize => b.total_cmp(&a),
            Direction::Minimize => a.total_cmp(&b),
        }
    }

    /// Returns `true` if `a` is strictly better than `b`.
    pub fn is_better(self, a: f64, b: f64) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Index of the best value, first-seen on ties. `None` if empty.
    pub fn best_index(self, fitness: &[f64]) -> Option<usize> {
        let mut iter = fitness.iter().enumerate();
        let (mut best, mut best_value) = iter.next().map(|(i, &f)| (i, f))?;
        for (i, &f) in iter {
            if self.is_better(f, best_value) {
                best = i;
                best_value = f;
            }
        }
        Some(best)
    }

    fn sanitize(self, value: f64) -> f64 {
        if value.is_nan() {
            self.worst()
        } else {
            // -0.0 + 0.0 == +0.0, so signed zeros tie
            value + 0.0
        }
    }
}

/// Scores chromosomes for one optimization problem.
///
/// Implementations must be pure: the score may depend only on the
/// chromosome and the evaluator's own fixed configuration. The driver
/// recomputes every score each generation and may call
/// [`evaluate`](Self::evaluate) from several threads when parallel
/// evaluation is enabled.
///
/// # Implementing
///
/// ```
/// use u_bitga::ga::{Chromosome, Direction, FitnessEvaluator};
///
/// struct OneMax;
///
/// impl FitnessEvaluator for OneMax {
///     fn direction(&self) -> Direction {
///         Direction::Maximize
///     }
///
///     fn evaluate(&self, chromosome: &Chromosome) -> f64 {
///         chromosome.count_ones() as f64
///     }
/// }
///
/// let c: Chromosome = "1101".parse().unwrap();
/// assert_eq!(OneMax.evaluate(&c), 3.0);
/// ```
pub trait FitnessEvaluator: Send + Sync {
    /// Whether higher or lower scores are better.
    fn direction(&self) -> Direction;

    /// Computes the fitness of a chromosome.
    ///
    /// Constraint violations should be expressed as a penalty score
    /// (for example zero under maximization), not as a panic.
    fn evaluate(&self, chromosome: &Chromosome) -> f64;

    /// Chromosome length this evaluator is defined for, if fixed.
    ///
    /// When `Some`, the driver rejects configurations whose
    /// `chromosome_length` differs.
    fn chromosome_length(&self) -> Option<usize> {
        None
    }

    /// A problem-specific metric recorded next to the best fitness of
    /// each generation (mean item weight, decoded real value, ...).
    fn auxiliary(&self, _chromosome: &Chromosome) -> Option<f64> {
        None
    }
}
