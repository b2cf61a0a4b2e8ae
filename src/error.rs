//! Configuration errors.
//!
//! The engine has a single error category: configuration that cannot
//! describe a valid run. Every variant is detected before the first
//! generation starts. Infeasible solutions are not errors (they score
//! zero) and a degenerate roulette wheel is handled inside selection.

/// A configuration that cannot drive a GA run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be at least 1")]
    ZeroPopulation,

    #[error("chromosome_length must be at least 1")]
    ZeroChromosomeLength,

    #[error("generations must be at least 1")]
    ZeroGenerations,

    #[error("mutation rate must be between 0.0 and 1.0, got: {0}")]
    MutationRateOutOfRange(f64),

    #[error("crossover must use 1 or 2 cut points, got: {0}")]
    InvalidCrossoverPoints(usize),

    #[error("elite_size ({elite}) exceeds population_size ({population})")]
    EliteExceedsPopulation { elite: usize, population: usize },

    #[error("tournament size must be at least 1")]
    ZeroTournamentSize,

    #[error("roulette selection requires a maximizing fitness evaluator")]
    RouletteRequiresMaximization,

    #[error("evaluator expects chromosomes of length {expected}, configuration says {configured}")]
    ChromosomeLengthMismatch { expected: usize, configured: usize },

    #[error("invalid decoding domain: lower={lower}, upper={upper}, num_bits={num_bits}")]
    InvalidDomain {
        lower: f64,
        upper: f64,
        num_bits: usize,
    },
}
