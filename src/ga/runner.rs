//! GA generational loop execution.
//!
//! [`GeneticEngine`] orchestrates the complete search:
//! initialization → evaluation → selection → crossover → mutation →
//! evaluation → reduction → repeat.

use super::config::AlgorithmConfig;
use super::fitness::FitnessEvaluator;
use super::operators::collapse_repeats;
use super::population::PopulationManager;
use super::types::{GenerationObserver, GenerationSnapshot, GenerationStats, NoopObserver};
use crate::error::{ConfigurationError, Result};
use crate::network::NetworkModel;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Result of a path search.
///
/// A run that never finds a feasible route is still a successful result:
/// `length` is `+∞` and `fitness` is `0`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    /// Best path found, start to end, with no two consecutive equal nodes.
    pub path: Vec<usize>,

    /// Total weight of `path`, or `+∞` if no feasible path was found.
    pub length: f64,

    /// Fitness of the best chromosome (`1 / length`, or `0`).
    pub fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run stopped because the best fitness stagnated.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,
}

impl PathResult {
    /// Returns `true` if a feasible path was found.
    pub fn is_found(&self) -> bool {
        self.length.is_finite()
    }
}

/// Runs the genetic path search on one network.
///
/// # Usage
///
/// ```
/// use u_pathga::ga::{AlgorithmConfig, GeneticEngine};
/// use u_pathga::network::NetworkModel;
///
/// let net = NetworkModel::configure(4, &[
///     [0.0, 1.0, 0.0, 9.0],
///     [1.0, 0.0, 1.0, 0.0],
///     [0.0, 1.0, 0.0, 1.0],
///     [9.0, 0.0, 1.0, 0.0],
/// ]).unwrap();
///
/// let config = AlgorithmConfig::default().with_population_size(20).with_seed(42);
/// let mut engine = GeneticEngine::new(&net, config).unwrap();
/// engine.set_endpoints(0, 3).unwrap();
///
/// let result = engine.find_path(2).unwrap();
/// assert_eq!(result.path, vec![0, 1, 2, 3]);
/// assert_eq!(result.length, 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct GeneticEngine<'a> {
    network: &'a NetworkModel,
    config: AlgorithmConfig,
    endpoints: Option<(usize, usize)>,
    step_mode: bool,
}

impl<'a> GeneticEngine<'a> {
    /// Creates an engine for `network`.
    ///
    /// # Errors
    /// Returns the configuration error from [`AlgorithmConfig::validate`].
    pub fn new(network: &'a NetworkModel, config: AlgorithmConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            network,
            config,
            endpoints: None,
            step_mode: false,
        })
    }

    /// The algorithm parameters used by this engine.
    pub fn config(&self) -> &AlgorithmConfig {
        &self.config
    }

    /// Sets the fixed start and end nodes.
    ///
    /// # Errors
    /// [`ConfigurationError::EndpointOutOfRange`] if either node is not in
    /// the network.
    pub fn set_endpoints(&mut self, start: usize, end: usize) -> Result<()> {
        let size = self.network.size();
        for node in [start, end] {
            if node >= size {
                return Err(ConfigurationError::EndpointOutOfRange { node, size });
            }
        }
        self.endpoints = Some((start, end));
        Ok(())
    }

    /// When enabled, [`GenerationObserver::inspect`] is called before each
    /// generation's operators run.
    pub fn set_step_mode(&mut self, enabled: bool) {
        self.step_mode = enabled;
    }

    /// Runs the search with no observer and no cancellation.
    pub fn find_path(&self, chromosome_length: usize) -> Result<PathResult> {
        self.find_path_observed(chromosome_length, &mut NoopObserver, None)
    }

    /// Runs the search, reporting to `observer`.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the engine stops
    /// at the next generation boundary and returns the best path so far.
    pub fn find_path_observed(
        &self,
        chromosome_length: usize,
        observer: &mut dyn GenerationObserver,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<PathResult> {
        let manager = PopulationManager::from_config(&self.config, self.network.size());
        self.run(chromosome_length, manager, observer, cancel)
    }

    /// Runs the search with a caller-supplied random source.
    ///
    /// [`AlgorithmConfig::seed`] is ignored.
    pub fn find_path_with_rng<R: Rng>(
        &self,
        chromosome_length: usize,
        rng: R,
        observer: &mut dyn GenerationObserver,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<PathResult> {
        let manager = PopulationManager::with_rng(&self.config, self.network.size(), rng);
        self.run(chromosome_length, manager, observer, cancel)
    }

    #[instrument(level = "debug", skip_all, fields(chromosome_length = chromosome_length))]
    fn run<R: Rng>(
        &self,
        chromosome_length: usize,
        mut manager: PopulationManager<R>,
        observer: &mut dyn GenerationObserver,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<PathResult> {
        if chromosome_length == 0 {
            return Err(ConfigurationError::EmptyChromosome);
        }
        let (start, end) = self.endpoints.ok_or(ConfigurationError::EndpointsNotSet)?;

        let mut evaluator = FitnessEvaluator::new(self.network)
            .with_policy(self.config.repeat_policy)
            .with_parallel(self.config.parallel);
        evaluator.set_endpoints(start, end)?;

        info!(
            nodes = self.network.size(),
            start,
            end,
            population = self.config.population_size,
            generations = self.config.generations,
            "starting path search"
        );

        // 1. Initialize and evaluate
        let mut population = manager.initialize_population(chromosome_length);
        let mut fitness = evaluator.batch_fitness(&population)?;

        let mut best_fitness = fitness.iter().copied().fold(0.0, f64::max);
        let mut fitness_history = Vec::with_capacity(self.config.generations.min(4096) + 1);
        fitness_history.push(best_fitness);

        let mut generations = 0usize;
        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;

        // 2. Generational loop
        for gen in 0..self.config.generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            if self.step_mode {
                observer.inspect(&GenerationSnapshot {
                    generation: gen,
                    population: &population,
                    fitness: &fitness,
                });
            }

            let pool = manager.tournament_selection(&population, &fitness);
            let offspring = manager.breed(pool);
            let offspring_fitness = evaluator.batch_fitness(&offspring)?;

            (population, fitness) =
                manager.reduce_population(population, fitness, offspring, offspring_fitness);
            generations = gen + 1;

            let stats = GenerationStats::from_fitness(generations, &fitness);
            fitness_history.push(stats.best_fitness);
            debug!(
                generation = generations,
                best = stats.best_fitness,
                average = stats.average_fitness,
                feasible = stats.feasible,
                "generation complete"
            );
            observer.on_generation(&stats);

            if stats.best_fitness > best_fitness {
                best_fitness = stats.best_fitness;
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }

            if self.config.stagnation_limit > 0
                && stagnation_counter >= self.config.stagnation_limit
            {
                stagnated = true;
                break;
            }
        }

        // 3. Report the best chromosome of the final population
        let best_idx = best_index(&fitness);
        let best = fitness[best_idx];
        let path = collapse_repeats(&evaluator.expand(&population[best_idx])?);
        let length = if best > 0.0 {
            self.network.validate_path(&path).length()
        } else {
            f64::INFINITY
        };

        if length.is_finite() {
            info!(length, generations, ?path, "path search finished");
        } else {
            warn!(generations, "path search finished without a feasible path");
        }

        Ok(PathResult {
            path,
            length,
            fitness: best,
            generations,
            stagnated,
            cancelled,
            fitness_history,
        })
    }
}

/// Index of the highest fitness, first on ties.
fn best_index(fitness: &[f64]) -> usize {
    let mut best = 0;
    for (i, &f) in fitness.iter().enumerate().skip(1) {
        if f > fitness[best] {
            best = i;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{GenerationStats, RepeatPolicy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_network() -> NetworkModel {
        NetworkModel::configure(
            5,
            &[
                [0.0, 10.0, 0.0, 30.0, 100.0],
                [10.0, 0.0, 50.0, 0.0, 0.0],
                [0.0, 50.0, 0.0, 20.0, 10.0],
                [30.0, 0.0, 20.0, 0.0, 60.0],
                [100.0, 0.0, 10.0, 60.0, 0.0],
            ],
        )
        .unwrap()
    }

    fn engine(net: &NetworkModel, config: AlgorithmConfig) -> GeneticEngine<'_> {
        let mut e = GeneticEngine::new(net, config).unwrap();
        e.set_endpoints(0, 4).unwrap();
        e
    }

    #[derive(Default)]
    struct Recorder {
        inspected: Vec<usize>,
        stats: Vec<GenerationStats>,
        sizes: Vec<usize>,
    }

    impl GenerationObserver for Recorder {
        fn inspect(&mut self, snapshot: &GenerationSnapshot<'_>) {
            self.inspected.push(snapshot.generation);
            self.sizes.push(snapshot.population.len());
            assert_eq!(snapshot.population.len(), snapshot.fitness.len());
        }

        fn on_generation(&mut self, stats: &GenerationStats) {
            self.stats.push(*stats);
        }
    }

    #[test]
    fn test_small_network_finds_short_path() {
        let net = small_network();
        let config = AlgorithmConfig::default()
            .with_population_size(50)
            .with_generations(100)
            .with_seed(42);
        let result = engine(&net, config).find_path(3).unwrap();

        assert!(result.is_found());
        assert!(result.length <= 70.0, "got {}", result.length);
        assert_eq!(result.path.first(), Some(&0));
        assert_eq!(result.path.last(), Some(&4));
        assert!(result.path.windows(2).all(|w| w[0] != w[1]));
        assert_eq!(net.validate_path(&result.path).length(), result.length);
        assert!((result.fitness - 1.0 / result.length).abs() < 1e-12);
    }

    #[test]
    fn test_requires_endpoints() {
        let net = small_network();
        let e = GeneticEngine::new(&net, AlgorithmConfig::default()).unwrap();
        assert_eq!(e.find_path(3), Err(ConfigurationError::EndpointsNotSet));
    }

    #[test]
    fn test_rejects_empty_chromosome() {
        let net = small_network();
        let e = engine(&net, AlgorithmConfig::default());
        assert_eq!(e.find_path(0), Err(ConfigurationError::EmptyChromosome));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let net = small_network();
        let config = AlgorithmConfig::default().with_mutation_rate(2.0);
        assert!(matches!(
            GeneticEngine::new(&net, config),
            Err(ConfigurationError::RateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_endpoint() {
        let net = small_network();
        let mut e = GeneticEngine::new(&net, AlgorithmConfig::default()).unwrap();
        assert_eq!(
            e.set_endpoints(5, 0),
            Err(ConfigurationError::EndpointOutOfRange { node: 5, size: 5 })
        );
    }

    #[test]
    fn test_zero_generations_reports_initial_best() {
        let net = small_network();
        let config = AlgorithmConfig::default().with_generations(0).with_seed(42);
        let result = engine(&net, config).find_path(3).unwrap();
        assert_eq!(result.generations, 0);
        assert_eq!(result.fitness_history.len(), 1);
        assert_eq!(result.fitness_history[0], result.fitness);
    }

    #[test]
    fn test_fitness_history_is_monotone() {
        let net = small_network();
        let config = AlgorithmConfig::default().with_generations(40).with_seed(7);
        let result = engine(&net, config).find_path(3).unwrap();

        assert_eq!(result.fitness_history.len(), 41);
        for w in result.fitness_history.windows(2) {
            assert!(w[1] >= w[0], "elitism broken: {} < {}", w[1], w[0]);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let net = small_network();
        let config = AlgorithmConfig::default().with_generations(20).with_seed(99);
        let a = engine(&net, config.clone()).find_path(3).unwrap();
        let b = engine(&net, config).find_path(3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_injected_rng() {
        let net = small_network();
        let e = engine(&net, AlgorithmConfig::default().with_generations(10));
        let a = e
            .find_path_with_rng(3, StdRng::seed_from_u64(5), &mut NoopObserver, None)
            .unwrap();
        let b = e
            .find_path_with_rng(3, StdRng::seed_from_u64(5), &mut NoopObserver, None)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_observer_sees_every_generation() {
        let net = small_network();
        let config = AlgorithmConfig::default()
            .with_population_size(10)
            .with_generations(5)
            .with_seed(1);
        let mut e = engine(&net, config);

        let mut rec = Recorder::default();
        e.find_path_observed(3, &mut rec, None).unwrap();
        assert!(rec.inspected.is_empty(), "inspect requires step mode");
        assert_eq!(rec.stats.len(), 5);
        assert_eq!(
            rec.stats.iter().map(|s| s.generation).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );

        e.set_step_mode(true);
        let mut rec = Recorder::default();
        e.find_path_observed(3, &mut rec, None).unwrap();
        assert_eq!(rec.inspected, vec![0, 1, 2, 3, 4]);
        assert!(rec.sizes.iter().all(|&n| n == 10));
    }

    #[test]
    fn test_cancelled_before_start() {
        let net = small_network();
        let e = engine(&net, AlgorithmConfig::default().with_seed(3));
        let cancel = Arc::new(AtomicBool::new(true));
        let result = e.find_path_observed(3, &mut NoopObserver, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.path.first(), Some(&0));
    }

    #[test]
    fn test_cancellation_from_observer() {
        struct CancelAfter(usize, Arc<AtomicBool>);
        impl GenerationObserver for CancelAfter {
            fn on_generation(&mut self, stats: &GenerationStats) {
                if stats.generation == self.0 {
                    self.1.store(true, Ordering::Relaxed);
                }
            }
        }

        let net = small_network();
        let config = AlgorithmConfig::default()
            .with_generations(10_000)
            .with_seed(3);
        let e = engine(&net, config);
        let cancel = Arc::new(AtomicBool::new(false));
        let mut obs = CancelAfter(4, cancel.clone());
        let result = e.find_path_observed(3, &mut obs, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 4);
    }

    #[test]
    fn test_stagnation_stops_early() {
        let net = small_network();
        let config = AlgorithmConfig::default()
            .with_generations(1000)
            .with_stagnation_limit(10)
            .with_seed(42);
        let result = engine(&net, config).find_path(3).unwrap();
        assert!(result.stagnated);
        assert!(result.generations < 1000);
    }

    #[test]
    fn test_disconnected_target_reports_infinity() {
        let net = NetworkModel::configure(
            4,
            &[
                [0.0, 1.0, 1.0, 0.0],
                [1.0, 0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 0.0],
            ],
        )
        .unwrap();
        let mut e = GeneticEngine::new(&net, AlgorithmConfig::default().with_seed(42)).unwrap();
        e.set_endpoints(0, 3).unwrap();

        let result = e.find_path(3).unwrap();
        assert!(!result.is_found());
        assert_eq!(result.length, f64::INFINITY);
        assert_eq!(result.fitness, 0.0);
        assert_eq!(result.generations, 100);
        assert!(result.fitness_history.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_reject_policy_needs_exact_hop_count() {
        let net = small_network();
        let config = AlgorithmConfig::default()
            .with_repeat_policy(RepeatPolicy::Reject)
            .with_seed(42);
        let result = engine(&net, config).find_path(3).unwrap();
        // Four hops without self-transitions: the best is 110.
        assert!(result.length >= 110.0);
        assert_eq!(result.path.len(), 5);
    }

    #[test]
    fn test_best_index_first_on_ties() {
        assert_eq!(best_index(&[0.0, 0.5, 0.5, 0.1]), 1);
        assert_eq!(best_index(&[0.0, 0.0]), 0);
    }
}
