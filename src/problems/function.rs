//! Scalar function minimization over a bit-encoded interval.

use crate::error::ConfigError;
use crate::ga::{bits_to_real, Chromosome, Direction, FitnessEvaluator};

/// Minimizes `objective(x)` for `x` in `[lower, upper]`.
///
/// A chromosome of `num_bits` genes is decoded with [`bits_to_real`], so
/// the search resolution is `(upper - lower) / (2^num_bits - 1)`.
///
/// # Examples
///
/// ```
/// use u_bitga::ga::{Chromosome, FitnessEvaluator};
/// use u_bitga::problems::FunctionMinimization;
///
/// let problem = FunctionMinimization::cubic();
/// assert_eq!(problem.decode(&Chromosome::zeros(16)), -10.0);
/// // f(-10) = -1000 + 60 + 14
/// assert_eq!(problem.evaluate(&Chromosome::zeros(16)), -926.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FunctionMinimization {
    lower: f64,
    upper: f64,
    num_bits: usize,
    objective: fn(f64) -> f64,
}

impl FunctionMinimization {
    /// Creates a minimization problem.
    ///
    /// Fails unless both bounds are finite, `lower < upper`, and
    /// `1 <= num_bits <= 64`.
    pub fn new(
        lower: f64,
        upper: f64,
        num_bits: usize,
        objective: fn(f64) -> f64,
    ) -> Result<Self, ConfigError> {
        let valid = lower.is_finite()
            && upper.is_finite()
            && lower < upper
            && (1..=64).contains(&num_bits);
        if !valid {
            return Err(ConfigError::InvalidDomain {
                lower,
                upper,
                num_bits,
            });
        }
        Ok(Self {
            lower,
            upper,
            num_bits,
            objective,
        })
    }

    /// `x^3 - 6x + 14` on `[-10, 10]` with 16 bits.
    pub fn cubic() -> Self {
        Self {
            lower: -10.0,
            upper: 10.0,
            num_bits: 16,
            objective: cubic,
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Decodes a chromosome into `x`.
    pub fn decode(&self, chromosome: &Chromosome) -> f64 {
        bits_to_real(chromosome.genes(), self.lower, self.upper)
    }

    /// Evaluates the objective at `x` directly.
    pub fn objective(&self, x: f64) -> f64 {
        (self.objective)(x)
    }
}

fn cubic(x: f64) -> f64 {
    x.powi(3) - 6.0 * x + 14.0
}

impl FitnessEvaluator for FunctionMinimization {
    fn direction(&self) -> Direction {
        Direction::Minimize
    }

    fn evaluate(&self, chromosome: &Chromosome) -> f64 {
        self.objective(self.decode(chromosome))
    }

    fn chromosome_length(&self) -> Option<usize> {
        Some(self.num_bits)
    }

    fn auxiliary(&self, chromosome: &Chromosome) -> Option<f64> {
        Some(self.decode(chromosome))
    }
}
