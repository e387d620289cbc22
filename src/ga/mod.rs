//! Genetic Algorithm path search.
//!
//! A candidate route is a fixed-length chromosome of waypoint node indices
//! placed between a fixed start and end node. Fitness is the inverse of the
//! route's total weight, and zero for routes that use a missing edge, so
//! infeasible candidates are absorbed by the operators instead of failing
//! the run.
//!
//! # Key Types
//!
//! - [`AlgorithmConfig`]: Validated algorithm parameters
//! - [`FitnessEvaluator`]: Scores chromosomes against a network
//! - [`PopulationManager`]: Initialization, selection, crossover, mutation, reduction
//! - [`GeneticEngine`]: Executes the generational loop
//! - [`PathResult`]: Best path with run statistics
//! - [`GenerationObserver`]: Per-generation inspection and progress hook
//!
//! # Submodules
//!
//! - [`operators`]: Single-point crossover, reset mutation, path helpers
//! - [`selection`]: Tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing* (μ+λ survivor selection)

mod config;
mod fitness;
pub mod operators;
mod population;
mod runner;
pub mod selection;
mod types;

pub use config::{AlgorithmConfig, RepeatPolicy};
pub use fitness::FitnessEvaluator;
pub use population::PopulationManager;
pub use runner::{GeneticEngine, PathResult};
pub use types::{
    Chromosome, GenerationObserver, GenerationSnapshot, GenerationStats, NoopObserver, Population,
};
