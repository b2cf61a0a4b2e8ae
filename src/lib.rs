//! Bit-string genetic algorithm engine.
//!
//! Evolves a population of fixed-length bit strings against a
//! user-supplied fitness function:
//!
//! - **Selection**: roulette wheel (fitness-proportionate) or tournament
//! - **Crossover**: one- or two-point recombination
//! - **Mutation**: independent per-gene bit flips
//! - **Elitism**: the best individuals survive unchanged
//!
//! The driver runs a fixed number of generations and records the best
//! individual of each one. Every random draw goes through an explicit,
//! seedable generator ([`random::create_rng`]), so runs are reproducible.
//!
//! # Example
//!
//! ```
//! use u_bitga::ga::{GaConfig, GaRunner, Selection};
//! use u_bitga::problems::KnapsackProblem;
//!
//! let problem = KnapsackProblem::classic();
//! let config = GaConfig::default()
//!     .with_generations(20)
//!     .with_selection(Selection::Roulette)
//!     .with_seed(42);
//!
//! let result = GaRunner::run(&problem, &config).unwrap();
//! assert_eq!(result.generations(), 20);
//! ```
//!
//! # Architecture
//!
//! The engine ([`ga`]) knows nothing about concrete problems. The
//! knapsack and function-minimization evaluators in [`problems`] are
//! ordinary [`ga::FitnessEvaluator`] implementations.

pub mod error;
pub mod ga;
pub mod problems;
pub mod random;

pub use error::ConfigError;
