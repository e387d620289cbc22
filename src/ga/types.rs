//! Core type definitions for the path GA.
//!
//! Chromosomes are plain node-index vectors; fitness is carried in a
//! parallel `Vec<f64>` so operators can work on borrowed slices.

/// Ordered interior waypoints of one candidate path. Each gene is a node index.
pub type Chromosome = Vec<usize>;

/// A generation of chromosomes.
pub type Population = Vec<Chromosome>;

/// Per-generation summary passed to [`GenerationObserver::on_generation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,

    /// Highest fitness in the reduced population.
    pub best_fitness: f64,

    /// Mean fitness of the reduced population.
    pub average_fitness: f64,

    /// Number of chromosomes with non-zero fitness.
    pub feasible: usize,
}

impl GenerationStats {
    pub(crate) fn from_fitness(generation: usize, fitness: &[f64]) -> Self {
        let best_fitness = fitness.iter().copied().fold(0.0, f64::max);
        let average_fitness = if fitness.is_empty() {
            0.0
        } else {
            fitness.iter().sum::<f64>() / fitness.len() as f64
        };
        Self {
            generation,
            best_fitness,
            average_fitness,
            feasible: fitness.iter().filter(|&&f| f > 0.0).count(),
        }
    }
}

/// Read-only view of a generation before its operators run.
#[derive(Debug, Clone, Copy)]
pub struct GenerationSnapshot<'a> {
    /// 0-based index of the generation about to run.
    pub generation: usize,

    /// Current population.
    pub population: &'a [Chromosome],

    /// Fitness of each chromosome, index-aligned with `population`.
    pub fitness: &'a [f64],
}

/// Hook invoked synchronously by the engine.
///
/// Both methods default to no-ops. An implementation may block (for an
/// interactive step-through), log, or forward data elsewhere; the engine
/// simply waits for it to return.
///
/// # Implementing
///
/// ```
/// use u_pathga::ga::{GenerationObserver, GenerationStats};
///
/// #[derive(Default)]
/// struct History(Vec<f64>);
///
/// impl GenerationObserver for History {
///     fn on_generation(&mut self, stats: &GenerationStats) {
///         self.0.push(stats.best_fitness);
///     }
/// }
/// ```
pub trait GenerationObserver {
    /// Called before each generation's operators when step mode is on.
    fn inspect(&mut self, _snapshot: &GenerationSnapshot<'_>) {}

    /// Called after each generation's reduction with progress statistics.
    fn on_generation(&mut self, _stats: &GenerationStats) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {}

impl<O: GenerationObserver + ?Sized> GenerationObserver for Box<O> {
    fn inspect(&mut self, snapshot: &GenerationSnapshot<'_>) {
        (**self).inspect(snapshot);
    }

    fn on_generation(&mut self, stats: &GenerationStats) {
        (**self).on_generation(stats);
    }
}
