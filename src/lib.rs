//! Genetic-algorithm path search over dense weighted graphs.
//!
//! Finds a short route between two nodes of a graph given as an adjacency
//! matrix. Candidate routes are fixed-length sequences of waypoints that
//! evolve through tournament selection, single-point crossover, per-gene
//! mutation and elitist survivor reduction.
//!
//! - **Network** ([`network`]): validated, normalized adjacency matrix with
//!   explicit "no edge" cells and path validation.
//! - **Genetic Algorithm** ([`ga`]): fitness evaluation, population
//!   operators, and the generational engine.
//! - **Gateway** ([`PathFinder`]): configure once, search many times.
//!
//! The search is a stochastic heuristic: it does not guarantee the true
//! shortest path. Failing to find any feasible route is reported as a
//! result with infinite length, never as an error.
//!
//! # Example
//!
//! ```
//! use u_pathga::{AlgorithmConfig, PathFinder};
//!
//! let mut finder = PathFinder::new();
//! finder.configure_network(5, &[
//!     [0.0, 10.0, 0.0, 30.0, 100.0],
//!     [10.0, 0.0, 50.0, 0.0, 0.0],
//!     [0.0, 50.0, 0.0, 20.0, 10.0],
//!     [30.0, 0.0, 20.0, 0.0, 60.0],
//!     [100.0, 0.0, 10.0, 60.0, 0.0],
//! ])?;
//! finder.configure_algorithm(AlgorithmConfig::default().with_seed(42))?;
//! finder.set_path_ends(0, 4)?;
//!
//! let result = finder.find_optimal_path(3)?;
//! assert!(result.length <= 70.0);
//! # Ok::<(), u_pathga::ConfigurationError>(())
//! ```

pub mod error;
pub mod ga;
pub mod gateway;
pub mod network;

pub use error::{ConfigurationError, Result};
pub use ga::{AlgorithmConfig, PathResult, RepeatPolicy};
pub use gateway::PathFinder;
pub use network::NetworkModel;
