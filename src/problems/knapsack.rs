//! 0/1 knapsack.

use crate::ga::{Chromosome, Direction, FitnessEvaluator};

/// An item that may be packed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub weight: f64,
    pub value: f64,
}

impl Item {
    pub const fn new(weight: f64, value: f64) -> Self {
        Self { weight, value }
    }
}

/// Gene `i` set means item `i` is packed.
///
/// Fitness is the total value of the packed items, or 0 when their total
/// weight exceeds the capacity. Overweight chromosomes stay in the
/// population; they are merely never preferred over a feasible one.
///
/// # Examples
///
/// ```
/// use u_bitga::ga::{Chromosome, FitnessEvaluator};
/// use u_bitga::problems::KnapsackProblem;
///
/// let problem = KnapsackProblem::classic();
/// let c: Chromosome = "0000011000".parse().unwrap();
/// assert_eq!(problem.evaluate(&c), 350.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackProblem {
    pub items: Vec<Item>,
    pub capacity: f64,
}

impl KnapsackProblem {
    pub fn new(items: Vec<Item>, capacity: f64) -> Self {
        Self { items, capacity }
    }

    /// Ten items, capacity 100.
    pub fn classic() -> Self {
        let table = [
            (2.0, 10.0),
            (4.0, 30.0),
            (6.0, 300.0),
            (8.0, 10.0),
            (8.0, 30.0),
            (8.0, 300.0),
            (12.0, 50.0),
            (25.0, 75.0),
            (50.0, 100.0),
            (100.0, 400.0),
        ];
        Self::new(
            table.iter().map(|&(w, v)| Item::new(w, v)).collect(),
            100.0,
        )
    }

    /// Number of items (and chromosome length).
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total weight and value of the packed items.
    pub fn totals(&self, chromosome: &Chromosome) -> (f64, f64) {
        chromosome
            .ones_indices()
            .filter_map(|i| self.items.get(i))
            .fold((0.0, 0.0), |(w, v), item| (w + item.weight, v + item.value))
    }

    /// Returns `true` if the packed items fit.
    pub fn is_feasible(&self, chromosome: &Chromosome) -> bool {
        self.totals(chromosome).0 <= self.capacity
    }

    /// Mean weight of the packed items; 0 if none are packed or the
    /// selection is overweight.
    pub fn mean_weight(&self, chromosome: &Chromosome) -> f64 {
        let (weight, _) = self.totals(chromosome);
        let count = chromosome.count_ones();
        if weight > self.capacity || count == 0 {
            0.0
        } else {
            weight / count as f64
        }
    }
}

impl FitnessEvaluator for KnapsackProblem {
    fn direction(&self) -> Direction {
        Direction::Maximize
    }

    fn evaluate(&self, chromosome: &Chromosome) -> f64 {
        let (weight, value) = self.totals(chromosome);
        if weight > self.capacity {
            0.0
        } else {
            value
        }
    }

    fn chromosome_length(&self) -> Option<usize> {
        Some(self.items.len())
    }

    fn auxiliary(&self, chromosome: &Chromosome) -> Option<f64> {
        Some(self.mean_weight(chromosome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{GaConfig, GaRunner, Selection};

    fn chromo(s: &str) -> Chromosome {
        s.parse().expect("valid bit string")
    }

    #[test]
    fn test_feasible_selection_scores_value() {
        let problem = KnapsackProblem::classic();
        // items 5 and 6: weights 8 + 12, values 300 + 50
        let c = chromo("0000011000");
        assert_eq!(problem.totals(&c), (20.0, 350.0));
        assert_eq!(problem.evaluate(&c), 350.0);
        assert_eq!(problem.auxiliary(&c), Some(10.0));
    }

    #[test]
    fn test_overweight_scores_zero() {
        let problem = KnapsackProblem::classic();
        let all = Chromosome::ones(10);
        assert_eq!(problem.totals(&all).0, 223.0);
        assert!(!problem.is_feasible(&all));
        assert_eq!(problem.evaluate(&all), 0.0);
        assert_eq!(problem.mean_weight(&all), 0.0);
    }

    #[test]
    fn test_capacity_is_inclusive() {
        let problem = KnapsackProblem::classic();
        // item 9 alone weighs exactly 100
        let c = chromo("0000000001");
        assert!(problem.is_feasible(&c));
        assert_eq!(problem.evaluate(&c), 400.0);
    }

    #[test]
    fn test_empty_selection() {
        let problem = KnapsackProblem::classic();
        let none = Chromosome::zeros(10);
        assert_eq!(problem.evaluate(&none), 0.0);
        assert_eq!(problem.mean_weight(&none), 0.0);
    }

    #[test]
    fn test_declares_length() {
        assert_eq!(KnapsackProblem::classic().chromosome_length(), Some(10));
        assert_eq!(KnapsackProblem::classic().item_count(), 10);
    }

    #[test]
    fn test_roulette_run_finds_good_packing() {
        let problem = KnapsackProblem::classic();
        let config = GaConfig::default()
            .with_selection(Selection::Roulette)
            .with_seed(42);

        let result = GaRunner::run(&problem, &config).unwrap();
        assert_eq!(result.generations(), 100);

        let best = result.best_overall().unwrap();
        assert!(problem.is_feasible(&best.best));
        // The optimum is 830 (every item except 7 and 9).
        assert!(best.best_fitness >= 790.0, "got {}", best.best_fitness);
        assert!(best.best_fitness <= 830.0);
    }
}
