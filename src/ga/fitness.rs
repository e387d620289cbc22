//! Path fitness evaluation.
//!
//! A chromosome is scored by expanding it into a full path between the fixed
//! endpoints and asking the [`NetworkModel`] for its length. Fitness is the
//! inverse length, so shorter feasible paths always score strictly higher,
//! and infeasible paths score exactly zero.

use super::config::RepeatPolicy;
use super::types::Chromosome;
use crate::error::{ConfigurationError, Result};
use crate::network::NetworkModel;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scores chromosomes against a network and a pair of endpoints.
///
/// # Examples
///
/// ```
/// use u_pathga::ga::FitnessEvaluator;
/// use u_pathga::network::NetworkModel;
///
/// let net = NetworkModel::configure(3, &[
///     [0.0, 4.0, 0.0],
///     [4.0, 0.0, 1.0],
///     [0.0, 1.0, 0.0],
/// ]).unwrap();
///
/// let mut eval = FitnessEvaluator::new(&net);
/// eval.set_endpoints(0, 2).unwrap();
/// assert_eq!(eval.fitness(&[1]).unwrap(), 0.2);
/// assert_eq!(eval.fitness(&[0]).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct FitnessEvaluator<'a> {
    network: &'a NetworkModel,
    endpoints: Option<(usize, usize)>,
    policy: RepeatPolicy,
    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    parallel: bool,
}

impl<'a> FitnessEvaluator<'a> {
    /// Creates an evaluator with no endpoints and [`RepeatPolicy::Collapse`].
    pub fn new(network: &'a NetworkModel) -> Self {
        Self {
            network,
            endpoints: None,
            policy: RepeatPolicy::default(),
            parallel: false,
        }
    }

    /// Sets how repeated consecutive nodes are scored.
    pub fn with_policy(mut self, policy: RepeatPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables rayon in [`batch_fitness`](Self::batch_fitness) when the
    /// `parallel` feature is compiled in.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Stores the fixed start and end nodes.
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

    /// The configured `(start, end)` pair, if any.
    pub fn endpoints(&self) -> Option<(usize, usize)> {
        self.endpoints
    }

    /// Builds `start + chromosome + end`, collapsing repeats under
    /// [`RepeatPolicy::Collapse`].
    pub fn expand(&self, chromosome: &[usize]) -> Result<Vec<usize>> {
        let (start, end) = self.endpoints.ok_or(ConfigurationError::EndpointsNotSet)?;
        let mut path = Vec::with_capacity(chromosome.len() + 2);
        path.push(start);
        path.extend_from_slice(chromosome);
        path.push(end);
        if self.policy == RepeatPolicy::Collapse {
            path.dedup();
        }
        Ok(path)
    }

    /// Fitness of one chromosome: `1 / length` if feasible, otherwise `0`.
    ///
    /// A path that collapses to a single node has zero length and is scored
    /// as infeasible.
    ///
    /// # Errors
    /// [`ConfigurationError::EndpointsNotSet`] if called before
    /// [`set_endpoints`](Self::set_endpoints).
    pub fn fitness(&self, chromosome: &[usize]) -> Result<f64> {
        let path = self.expand(chromosome)?;
        if path.len() < 2 {
            return Ok(0.0);
        }
        let length = self.network.validate_path(&path).length();
        if length.is_finite() && length > 0.0 {
            Ok(1.0 / length)
        } else {
            Ok(0.0)
        }
    }

    /// Fitness of every chromosome, index-aligned with `population`.
    pub fn batch_fitness(&self, population: &[Chromosome]) -> Result<Vec<f64>> {
        if self.endpoints.is_none() {
            return Err(ConfigurationError::EndpointsNotSet);
        }

        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                return population.par_iter().map(|c| self.fitness(c)).collect();
            }
        }

        population.iter().map(|c| self.fitness(c)).collect()
    }
}
