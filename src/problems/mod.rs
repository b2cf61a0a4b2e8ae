//! Reference fitness evaluators.
//!
//! Two classic bit-string problems built on [`FitnessEvaluator`]:
//!
//! - [`KnapsackProblem`]: 0/1 knapsack, maximize value under a weight cap
//! - [`FunctionMinimization`]: minimize a scalar function over a bounded
//!   interval encoded as an unsigned bit string
//!
//! [`FitnessEvaluator`]: crate::ga::FitnessEvaluator

mod function;
mod knapsack;

pub use function::FunctionMinimization;
pub use knapsack::{Item, KnapsackProblem};
