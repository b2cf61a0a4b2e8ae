//! Bit-string Genetic Algorithm engine.
//!
//! A generic GA over fixed-length bit strings. Users define their problem
//! by implementing [`FitnessEvaluator`], which scores a [`Chromosome`]
//! and declares whether higher or lower scores win.
//!
//! # Core Traits
//!
//! - [`FitnessEvaluator`]: Problem definition: scoring and direction
//! - [`Reporter`]: Consumer of per-generation summaries
//!
//! # Key Types
//!
//! - [`Chromosome`]: Fixed-length bit vector
//! - [`GaConfig`]: Algorithm parameters (population, operators, elitism)
//! - [`Evolution`]: Step-by-step driver state machine
//! - [`GaRunner`]: Runs the driver to termination
//! - [`GaResult`]: Per-generation [`GenerationSummary`] log
//!
//! # Submodules
//!
//! - [`operators`]: Initialization, one/two-point crossover, bit-flip mutation, elitism
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod chromosome;
mod config;
pub mod operators;
mod report;
mod runner;
mod selection;
mod types;

pub use chromosome::{bits_to_real, Chromosome, ParseChromosomeError};
pub use config::GaConfig;
pub use operators::{CrossoverPoints, MutationRate};
pub use report::{write_report, write_summary, Reporter, TextReporter, TracingReporter};
pub use runner::{Evolution, GaResult, GaRunner, GenerationSummary, Phase};
pub use selection::Selection;
pub use types::{Direction, FitnessEvaluator};
