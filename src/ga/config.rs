//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the generational loop.

use super::operators::{CrossoverPoints, MutationRate};
use super::selection::Selection;
use crate::error::ConfigError;

/// Configuration for the Genetic Algorithm.
///
/// Controls population shape, operator parameters, elitism, selection
/// strategy, the fixed generation count, and parallelism.
///
/// # Defaults
///
/// ```
/// use u_bitga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 150);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bitga::ga::{CrossoverPoints, GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(10)
///     .with_chromosome_length(16)
///     .with_crossover_points(CrossoverPoints::Two)
///     .with_elite_size(1)
///     .with_selection(Selection::Tournament(3))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Number of genes per chromosome.
    pub chromosome_length: usize,

    /// Number of generations to run. There is no early exit.
    pub generations: usize,

    /// Per-gene probability of a bit flip (0.0–1.0).
    pub mutation_rate: f64,

    /// One- or two-point crossover.
    pub crossover_points: CrossoverPoints,

    /// Number of best individuals copied unchanged into the next generation.
    pub elite_size: usize,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Whether to evaluate fitness in parallel.
    ///
    /// Only takes effect when the crate is built with the `parallel`
    /// feature. Results do not depend on this flag.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 150,
            chromosome_length: 10,
            generations: 100,
            mutation_rate: 0.01,
            crossover_points: CrossoverPoints::One,
            elite_size: 0,
            selection: Selection::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the chromosome length.
    pub fn with_chromosome_length(mut self, n: usize) -> Self {
        self.chromosome_length = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the per-gene mutation rate.
    ///
    /// Out-of-range values are reported by [`validate`](Self::validate),
    /// not clamped.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the number of crossover cut points.
    pub fn with_crossover_points(mut self, points: CrossoverPoints) -> Self {
        self.crossover_points = points;
        self
    }

    /// Sets the elite size (0 disables elitism).
    pub fn with_elite_size(mut self, k: usize) -> Self {
        self.elite_size = k;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The mutation rate as a validated probability.
    pub fn mutation(&self) -> Result<MutationRate, ConfigError> {
        MutationRate::new(self.mutation_rate)
    }

    /// Validates the configuration.
    ///
    /// Checks run in field order; the first violation is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        if self.chromosome_length == 0 {
            return Err(ConfigError::ZeroChromosomeLength);
        }
        if self.generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        self.mutation()?;
        if self.elite_size > self.population_size {
            return Err(ConfigError::EliteExceedsPopulation {
                elite: self.elite_size,
                population: self.population_size,
            });
        }
        if self.selection == Selection::Tournament(0) {
            return Err(ConfigError::ZeroTournamentSize);
        }
        Ok(())
    }
}
