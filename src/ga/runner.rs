//! Generational driver.
//!
//! [`Evolution`] is the driver state machine:
//!
//! ```text
//! Initializing → Evaluating → Breeding → Replaced ─┬→ Evaluating (next generation)
//!                                                  └→ Terminated
//! ```
//!
//! Every generation is evaluated in full before any parent is selected
//! from it, and each evaluation records one [`GenerationSummary`].
//! [`GaRunner`] drives an [`Evolution`] to termination and returns the
//! summary log as a [`GaResult`].

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::operators::{crossover, elitism, mutate, random_population, MutationRate};
use super::report::Reporter;
use super::selection::Selection;
use super::types::{Direction, FitnessEvaluator};
use crate::error::ConfigError;
use crate::random::{rng_from_seed, GaRng};
use rand::Rng;
use tracing::instrument;

/// Driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Configuration validated, population not yet created.
    Initializing,
    /// Population ready to be scored.
    Evaluating,
    /// Scores recorded, next generation not yet bred.
    Breeding,
    /// Next generation bred, not yet swapped in.
    Replaced,
    /// Configured generation count reached.
    Terminated,
}

/// Best individual of one evaluated generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationSummary {
    /// Zero-based generation index.
    pub generation: usize,

    /// Fitness of [`best`](Self::best).
    pub best_fitness: f64,

    /// Best chromosome of the generation (first-seen on ties).
    pub best: Chromosome,

    /// Problem-specific metric from [`FitnessEvaluator::auxiliary`].
    pub auxiliary: Option<f64>,
}

/// Result of a GA run: one summary per generation, in order.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Optimization sense the run used.
    pub direction: Direction,

    /// Summary of every generation, indexed by generation.
    pub summaries: Vec<GenerationSummary>,
}

impl GaResult {
    /// Number of generations executed.
    pub fn generations(&self) -> usize {
        self.summaries.len()
    }

    /// Best summary across the whole run, earliest on ties.
    pub fn best_overall(&self) -> Option<&GenerationSummary> {
        self.summaries.iter().reduce(|best, s| {
            if self.direction.is_better(s.best_fitness, best.best_fitness) {
                s
            } else {
                best
            }
        })
    }

    /// Summary of the last generation.
    pub fn last(&self) -> Option<&GenerationSummary> {
        self.summaries.last()
    }

    /// Best fitness of each generation.
    pub fn fitness_history(&self) -> Vec<f64> {
        self.summaries.iter().map(|s| s.best_fitness).collect()
    }
}

/// Step-by-step generational driver.
///
/// Owns the population, the index-aligned fitness record, the
/// next-generation buffer, and the random source. All random draws happen
/// on the calling thread, so a seeded run is reproducible regardless of
/// parallel evaluation.
///
/// # Examples
///
/// ```
/// use u_bitga::ga::{Chromosome, Direction, Evolution, FitnessEvaluator, GaConfig, Phase};
///
/// struct OneMax;
///
/// impl FitnessEvaluator for OneMax {
///     fn direction(&self) -> Direction { Direction::Maximize }
///     fn evaluate(&self, c: &Chromosome) -> f64 { c.count_ones() as f64 }
/// }
///
/// let config = GaConfig::default()
///     .with_population_size(6)
///     .with_chromosome_length(8)
///     .with_generations(2)
///     .with_seed(1);
/// let mut evolution = Evolution::new(&OneMax, &config).unwrap();
/// assert_eq!(evolution.phase(), Phase::Initializing);
///
/// while evolution.step().is_some() {}
/// assert_eq!(evolution.phase(), Phase::Terminated);
/// assert_eq!(evolution.summaries().len(), 2);
/// ```
pub struct Evolution<'a, E: FitnessEvaluator + ?Sized, R: Rng = GaRng> {
    evaluator: &'a E,
    config: GaConfig,
    mutation: MutationRate,
    direction: Direction,
    rng: R,
    phase: Phase,
    generation: usize,
    population: Vec<Chromosome>,
    fitness: Vec<f64>,
    next_generation: Vec<Chromosome>,
    summaries: Vec<GenerationSummary>,
}

impl<'a, E: FitnessEvaluator + ?Sized> Evolution<'a, E, GaRng> {
    /// Creates a driver using the RNG seeded from `config.seed`.
    pub fn new(evaluator: &'a E, config: &GaConfig) -> Result<Self, ConfigError> {
        Self::with_rng(evaluator, config, rng_from_seed(config.seed))
    }
}

impl<'a, E: FitnessEvaluator + ?Sized, R: Rng> Evolution<'a, E, R> {
    /// Creates a driver with an explicit random source.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(evaluator: &'a E, config: &GaConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mutation = config.mutation()?;
        let direction = evaluator.direction();

        if config.selection == Selection::Roulette && direction == Direction::Minimize {
            return Err(ConfigError::RouletteRequiresMaximization);
        }
        if let Some(expected) = evaluator.chromosome_length() {
            if expected != config.chromosome_length {
                return Err(ConfigError::ChromosomeLengthMismatch {
                    expected,
                    configured: config.chromosome_length,
                });
            }
        }

        Ok(Self {
            evaluator,
            config: config.clone(),
            mutation,
            direction,
            rng,
            phase: Phase::Initializing,
            generation: 0,
            population: Vec::new(),
            fitness: Vec::new(),
            next_generation: Vec::new(),
            summaries: Vec::with_capacity(config.generations),
        })
    }

    /// Current state.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the current generation.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Optimization sense taken from the evaluator.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current population (empty before initialization).
    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    /// Fitness of the current population.
    ///
    /// Index-aligned with [`population`](Self::population) while the
    /// driver is in [`Phase::Breeding`] or [`Phase::Replaced`]; empty
    /// otherwise.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Next-generation buffer, filled while in [`Phase::Replaced`].
    pub fn next_generation(&self) -> &[Chromosome] {
        &self.next_generation
    }

    /// Summaries recorded so far.
    pub fn summaries(&self) -> &[GenerationSummary] {
        &self.summaries
    }

    /// Performs one state transition and returns the new state.
    ///
    /// Calling this in [`Phase::Terminated`] is a no-op.
    pub fn advance(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Initializing => {
                self.initialize();
                Phase::Evaluating
            }
            Phase::Evaluating => {
                self.evaluate();
                Phase::Breeding
            }
            Phase::Breeding => {
                self.breed();
                Phase::Replaced
            }
            Phase::Replaced => {
                self.replace();
                if self.generation >= self.config.generations {
                    Phase::Terminated
                } else {
                    Phase::Evaluating
                }
            }
            Phase::Terminated => Phase::Terminated,
        };
        self.phase
    }

    /// Finishes the current generation (evaluate, breed, replace) and
    /// returns its summary, or `None` once terminated.
    pub fn step(&mut self) -> Option<&GenerationSummary> {
        if self.phase == Phase::Initializing {
            self.advance();
        }
        if self.phase == Phase::Terminated {
            return None;
        }
        while !matches!(self.advance(), Phase::Evaluating | Phase::Terminated) {}
        self.summaries.last()
    }

    /// Consumes the driver and returns the recorded summaries.
    pub fn into_result(self) -> GaResult {
        GaResult {
            direction: self.direction,
            summaries: self.summaries,
        }
    }

    fn initialize(&mut self) {
        self.population = random_population(
            self.config.population_size,
            self.config.chromosome_length,
            &mut self.rng,
        );
    }

    fn evaluate(&mut self) {
        self.fitness = evaluate_population(self.evaluator, &self.population, self.config.parallel);

        let best_idx = self
            .direction
            .best_index(&self.fitness)
            .expect("population is never empty after initialization");
        let best = self.population[best_idx].clone();
        let summary = GenerationSummary {
            generation: self.generation,
            best_fitness: self.fitness[best_idx],
            auxiliary: self.evaluator.auxiliary(&best),
            best,
        };

        tracing::debug!(
            generation = summary.generation,
            best_fitness = summary.best_fitness,
            "generation evaluated"
        );
        self.summaries.push(summary);
    }

    fn breed(&mut self) {
        let n = self.config.population_size;
        let mut next = elitism(
            &self.population,
            &self.fitness,
            self.config.elite_size,
            self.direction,
        );
        next.reserve(n + 1 - next.len());

        while next.len() < n {
            let p1 = self.select();
            let p2 = self.select();
            let (c1, c2) = crossover(
                &self.population[p1],
                &self.population[p2],
                self.config.crossover_points,
                &mut self.rng,
            );
            next.push(mutate(&c1, self.mutation, &mut self.rng));
            next.push(mutate(&c2, self.mutation, &mut self.rng));
        }
        next.truncate(n);

        self.next_generation = next;
    }

    fn select(&mut self) -> usize {
        self.config.selection.select_index(
            &self.population,
            &self.fitness,
            self.direction,
            &mut self.rng,
        )
    }

    fn replace(&mut self) {
        self.population = std::mem::take(&mut self.next_generation);
        self.fitness.clear();
        self.generation += 1;
    }
}

/// Executes the GA generational loop.
///
/// # Usage
///
/// ```ignore
/// let problem = KnapsackProblem::classic();
/// let config = GaConfig::default().with_selection(Selection::Roulette).with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_overall());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA for `config.generations` generations.
    pub fn run<E: FitnessEvaluator + ?Sized>(
        evaluator: &E,
        config: &GaConfig,
    ) -> Result<GaResult, ConfigError> {
        Self::run_with_reporter(evaluator, config, &mut |_: &GenerationSummary| {})
    }

    /// Runs the GA, handing each summary to `reporter` as soon as it is
    /// recorded.
    #[instrument(
        level = "info",
        skip_all,
        fields(
            population = config.population_size,
            length = config.chromosome_length,
            generations = config.generations
        )
    )]
    pub fn run_with_reporter<E, P>(
        evaluator: &E,
        config: &GaConfig,
        reporter: &mut P,
    ) -> Result<GaResult, ConfigError>
    where
        E: FitnessEvaluator + ?Sized,
        P: Reporter + ?Sized,
    {
        let mut evolution = Evolution::new(evaluator, config)?;
        tracing::info!(direction = ?evolution.direction(), "starting GA run");

        while let Some(summary) = evolution.step() {
            reporter.report(summary);
        }

        let result = evolution.into_result();
        if let Some(best) = result.best_overall() {
            tracing::info!(
                generation = best.generation,
                best_fitness = best.best_fitness,
                "GA run finished"
            );
        }
        Ok(result)
    }
}

/// Scores every chromosome, preserving population order.
#[cfg(feature = "parallel")]
fn evaluate_population<E: FitnessEvaluator + ?Sized>(
    evaluator: &E,
    population: &[Chromosome],
    parallel: bool,
) -> Vec<f64> {
    use rayon::prelude::*;

    if parallel {
        population
            .par_iter()
            .map(|c| evaluator.evaluate(c))
            .collect()
    } else {
        population.iter().map(|c| evaluator.evaluate(c)).collect()
    }
}

/// Scores every chromosome, preserving population order.
#[cfg(not(feature = "parallel"))]
fn evaluate_population<E: FitnessEvaluator + ?Sized>(
    evaluator: &E,
    population: &[Chromosome],
    _parallel: bool,
) -> Vec<f64> {
    population.iter().map(|c| evaluator.evaluate(c)).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::operators::CrossoverPoints;

    // ---- OneMax: maximize the number of set bits ----

    struct OneMax;

    impl FitnessEvaluator for OneMax {
        fn direction(&self) -> Direction {
            Direction::Maximize
        }

        fn evaluate(&self, c: &Chromosome) -> f64 {
            c.count_ones() as f64
        }

        fn auxiliary(&self, c: &Chromosome) -> Option<f64> {
            Some(c.count_ones() as f64 / c.len() as f64)
        }
    }

    // ---- ZeroMax: minimize the number of set bits ----

    struct ZeroMax;

    impl FitnessEvaluator for ZeroMax {
        fn direction(&self) -> Direction {
            Direction::Minimize
        }

        fn evaluate(&self, c: &Chromosome) -> f64 {
            c.count_ones() as f64
        }
    }

    // ---- Every chromosome infeasible ----

    struct AllInfeasible;

    impl FitnessEvaluator for AllInfeasible {
        fn direction(&self) -> Direction {
            Direction::Maximize
        }

        fn evaluate(&self, _c: &Chromosome) -> f64 {
            0.0
        }

        fn chromosome_length(&self) -> Option<usize> {
            Some(6)
        }
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(20)
            .with_chromosome_length(16)
            .with_generations(30)
            .with_mutation_rate(0.02)
            .with_seed(42)
    }

    #[test]
    fn test_onemax_convergence() {
        let config = GaConfig::default()
            .with_population_size(50)
            .with_chromosome_length(20)
            .with_generations(100)
            .with_elite_size(2)
            .with_seed(42);

        let result = GaRunner::run(&OneMax, &config).unwrap();
        let best = result.best_overall().unwrap();
        assert!(
            best.best_fitness >= 18.0,
            "expected fitness >= 18 for 20-bit OneMax, got {}",
            best.best_fitness
        );
    }

    #[test]
    fn test_zeromax_minimization() {
        let config = small_config().with_elite_size(1).with_generations(60);
        let result = GaRunner::run(&ZeroMax, &config).unwrap();
        let best = result.best_overall().unwrap();
        assert!(best.best_fitness <= 2.0, "got {}", best.best_fitness);
    }

    #[test]
    fn test_one_summary_per_generation() {
        let result = GaRunner::run(&OneMax, &small_config()).unwrap();
        assert_eq!(result.generations(), 30);
        for (i, s) in result.summaries.iter().enumerate() {
            assert_eq!(s.generation, i);
            assert_eq!(s.best.len(), 16);
            assert_eq!(s.best_fitness, s.best.count_ones() as f64);
            assert_eq!(s.auxiliary, Some(s.best_fitness / 16.0));
        }
    }

    #[test]
    fn test_single_generation_reports_initial_best() {
        for evaluator in [&OneMax as &dyn FitnessEvaluator, &ZeroMax] {
            let config = small_config().with_generations(1);
            let mut evolution = Evolution::new(evaluator, &config).unwrap();
            assert_eq!(evolution.advance(), Phase::Evaluating);

            let initial: Vec<f64> = evolution
                .population()
                .iter()
                .map(|c| evaluator.evaluate(c))
                .collect();
            let expected = match evaluator.direction() {
                Direction::Maximize => initial.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                Direction::Minimize => initial.iter().cloned().fold(f64::INFINITY, f64::min),
            };

            while evolution.step().is_some() {}
            let result = evolution.into_result();
            assert_eq!(result.generations(), 1);
            assert_eq!(result.summaries[0].best_fitness, expected);
        }
    }

    #[test]
    fn test_phase_sequence() {
        let config = small_config().with_generations(2);
        let mut evolution = Evolution::new(&OneMax, &config).unwrap();

        let mut phases = vec![evolution.phase()];
        while evolution.phase() != Phase::Terminated {
            phases.push(evolution.advance());
        }
        assert_eq!(
            phases,
            vec![
                Phase::Initializing,
                Phase::Evaluating,
                Phase::Breeding,
                Phase::Replaced,
                Phase::Evaluating,
                Phase::Breeding,
                Phase::Replaced,
                Phase::Terminated,
            ]
        );
        assert_eq!(evolution.advance(), Phase::Terminated);
        assert!(evolution.step().is_none());
    }

    #[test]
    fn test_population_size_constant_with_odd_sizes() {
        for (n, elite) in [(7, 0), (7, 2), (1, 0), (1, 1), (10, 10), (9, 4)] {
            let config = small_config()
                .with_population_size(n)
                .with_elite_size(elite)
                .with_generations(5);
            let mut evolution = Evolution::new(&OneMax, &config).unwrap();
            while evolution.phase() != Phase::Terminated {
                evolution.advance();
                assert!(
                    evolution.population().len() == n,
                    "population {} != {n} in {:?}",
                    evolution.population().len(),
                    evolution.phase()
                );
                assert!(evolution.population().iter().all(|c| c.len() == 16));
                if evolution.phase() == Phase::Breeding {
                    assert_eq!(evolution.fitness().len(), n);
                }
                if evolution.phase() == Phase::Replaced {
                    assert_eq!(evolution.next_generation().len(), n);
                }
            }
        }
    }

    #[test]
    fn test_elites_copied_unmodified() {
        let config = small_config().with_elite_size(3).with_mutation_rate(1.0);
        let mut evolution = Evolution::new(&OneMax, &config).unwrap();

        for _ in 0..5 {
            while evolution.advance() != Phase::Breeding {}
            let expected = elitism(
                evolution.population(),
                evolution.fitness(),
                3,
                Direction::Maximize,
            );
            assert_eq!(evolution.advance(), Phase::Replaced);
            assert_eq!(&evolution.next_generation()[..3], expected.as_slice());
        }
    }

    #[test]
    fn test_elitism_never_loses_best() {
        let config = small_config().with_elite_size(1).with_mutation_rate(0.2);
        let result = GaRunner::run(&OneMax, &config).unwrap();
        for window in result.fitness_history().windows(2) {
            assert!(
                window[1] >= window[0],
                "best fitness regressed with elitism: {} < {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = small_config().with_crossover_points(CrossoverPoints::Two);
        let a = GaRunner::run(&OneMax, &config).unwrap();
        let b = GaRunner::run(&OneMax, &config).unwrap();
        assert_eq!(a.summaries, b.summaries);
    }

    #[test]
    fn test_parallel_flag_does_not_change_results() {
        let sequential = GaRunner::run(&OneMax, &small_config()).unwrap();
        let parallel = GaRunner::run(&OneMax, &small_config().with_parallel(true)).unwrap();
        assert_eq!(sequential.summaries, parallel.summaries);
    }

    #[test]
    fn test_all_infeasible_with_roulette() {
        let config = small_config()
            .with_chromosome_length(6)
            .with_selection(Selection::Roulette)
            .with_generations(5);
        let result = GaRunner::run(&AllInfeasible, &config).unwrap();
        assert_eq!(result.generations(), 5);
        assert!(result.summaries.iter().all(|s| s.best_fitness == 0.0));
        // First-seen wins on ties.
        assert_eq!(result.best_overall().unwrap().generation, 0);
    }

    #[test]
    fn test_roulette_rejected_for_minimization() {
        let config = small_config().with_selection(Selection::Roulette);
        assert_eq!(
            GaRunner::run(&ZeroMax, &config).unwrap_err(),
            ConfigError::RouletteRequiresMaximization
        );
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let config = small_config().with_chromosome_length(7);
        assert_eq!(
            GaRunner::run(&AllInfeasible, &config).unwrap_err(),
            ConfigError::ChromosomeLengthMismatch {
                expected: 6,
                configured: 7
            }
        );
    }

    #[test]
    fn test_invalid_config_rejected_before_start() {
        let config = small_config().with_mutation_rate(2.0);
        assert!(matches!(
            Evolution::new(&OneMax, &config),
            Err(ConfigError::MutationRateOutOfRange(_))
        ));
    }

    #[test]
    fn test_reporter_sees_every_summary() {
        let mut seen = Vec::new();
        let result = GaRunner::run_with_reporter(&OneMax, &small_config(), &mut |s: &GenerationSummary| {
            seen.push(s.generation)
        })
        .unwrap();
        assert_eq!(seen, (0..result.generations()).collect::<Vec<_>>());
    }

    #[test]
    fn test_explicit_rng() {
        let config = small_config();
        let mut a = Evolution::with_rng(&OneMax, &config, crate::random::create_rng(5)).unwrap();
        let mut b = Evolution::with_rng(&OneMax, &config, crate::random::create_rng(5)).unwrap();
        while a.step().is_some() {}
        while b.step().is_some() {}
        assert_eq!(a.summaries(), b.summaries());
    }
}
