//! GA configuration.
//!
//! [`AlgorithmConfig`] holds all parameters that control the evolutionary
//! loop. It is validated once before a run and never changes during it.

use crate::error::{ConfigurationError, Result};

/// How repeated consecutive nodes in an expanded path are scored.
///
/// A chromosome like `[3, 3, 2]` between endpoints `0` and `4` expands to
/// `0 → 3 → 3 → 2 → 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RepeatPolicy {
    /// Collapse runs of the same node before validation: the waypoint
    /// "stays" and the path above is scored as `0 → 3 → 2 → 4`.
    ///
    /// This lets a fixed-length chromosome describe any shorter route.
    #[default]
    Collapse,

    /// Score the raw expansion: any self-transition makes the path
    /// infeasible.
    Reject,
}

/// Configuration for the path-search GA.
///
/// # Defaults
///
/// ```
/// use u_pathga::ga::AlgorithmConfig;
///
/// let config = AlgorithmConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.tournament_size, 3);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_pathga::ga::AlgorithmConfig;
///
/// let config = AlgorithmConfig::default()
///     .with_population_size(200)
///     .with_tournament_size(5)
///     .with_mutation_rate(0.3)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlgorithmConfig {
    /// Number of chromosomes kept after every reduction.
    pub population_size: usize,

    /// Number of generations to run. Zero returns the best initial chromosome.
    pub generations: usize,

    /// Probability of recombining a pair of parents (0.0–1.0).
    pub crossover_rate: f64,

    /// Per-gene probability of replacing a waypoint with a random node (0.0–1.0).
    pub mutation_rate: f64,

    /// Candidates drawn per tournament. Must be in `[1, population_size)`.
    pub tournament_size: usize,

    /// Generations without a better best fitness before stopping early.
    ///
    /// Set to 0 (the default) to always run all `generations`.
    pub stagnation_limit: usize,

    /// How repeated consecutive waypoints are scored.
    pub repeat_policy: RepeatPolicy,

    /// Skip duplicate chromosomes during survivor reduction.
    ///
    /// Duplicates are only kept when there are not enough distinct
    /// chromosomes to fill the population.
    pub distinct_survivors: bool,

    /// Whether to evaluate fitness in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            tournament_size: 3,
            stagnation_limit: 0,
            repeat_policy: RepeatPolicy::default(),
            distinct_survivors: false,
            parallel: false,
            seed: None,
        }
    }
}

impl AlgorithmConfig {
    /// Builds a validated configuration from the core parameters.
    ///
    /// Remaining fields take their defaults.
    ///
    /// # Errors
    /// Returns the first violated constraint, see [`validate`](Self::validate).
    pub fn new(
        population_size: usize,
        generations: usize,
        crossover_rate: f64,
        mutation_rate: f64,
        tournament_size: usize,
    ) -> Result<Self> {
        let config = Self {
            population_size,
            generations,
            crossover_rate,
            mutation_rate,
            tournament_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the repeated-waypoint scoring policy.
    pub fn with_repeat_policy(mut self, policy: RepeatPolicy) -> Self {
        self.repeat_policy = policy;
        self
    }

    /// Enables or disables duplicate-free survivor reduction.
    pub fn with_distinct_survivors(mut self, distinct: bool) -> Self {
        self.distinct_survivors = distinct;
        self
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

    /// Validates the configuration.
    ///
    /// Rates are checked, not clamped: an out-of-range value is a caller bug.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(ConfigurationError::PopulationTooSmall(self.population_size));
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if self.tournament_size == 0 || self.tournament_size >= self.population_size {
            return Err(ConfigurationError::InvalidTournamentSize {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigurationError::RateOutOfRange { name, value })
    }
}
