//! Single-entry façade over network configuration and path search.
//!
//! [`PathFinder`] collects the network, algorithm parameters and endpoints
//! in any order, then builds a [`GeneticEngine`] for each search.

use crate::error::{ConfigurationError, Result};
use crate::ga::{AlgorithmConfig, GenerationObserver, GeneticEngine, NoopObserver, PathResult};
use crate::network::NetworkModel;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Configures and runs path searches.
///
/// # Usage
///
/// ```
/// use u_pathga::{AlgorithmConfig, PathFinder};
///
/// let mut finder = PathFinder::new();
/// finder.configure_network(3, &[
///     [0.0, 2.0, 9.0],
///     [2.0, 0.0, 2.0],
///     [9.0, 2.0, 0.0],
/// ])?;
/// finder.configure_algorithm(AlgorithmConfig::default().with_population_size(10).with_seed(1))?;
/// finder.set_path_ends(0, 2)?;
///
/// let result = finder.find_optimal_path(1)?;
/// assert_eq!(result.path, vec![0, 1, 2]);
/// assert_eq!(result.length, 4.0);
/// # Ok::<(), u_pathga::ConfigurationError>(())
/// ```
pub struct PathFinder {
    network: Option<NetworkModel>,
    config: AlgorithmConfig,
    endpoints: Option<(usize, usize)>,
    step_mode: bool,
    observer: Box<dyn GenerationObserver + Send>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFinder {
    /// Creates a finder with default algorithm parameters and no network.
    pub fn new() -> Self {
        Self {
            network: None,
            config: AlgorithmConfig::default(),
            endpoints: None,
            step_mode: false,
            observer: Box::new(NoopObserver),
            cancel: None,
        }
    }

    /// Validates, normalizes and stores the network.
    ///
    /// On error the previously configured network is kept.
    pub fn configure_network<M: AsRef<[f64]>>(&mut self, size: usize, matrix: &[M]) -> Result<()> {
        self.network = Some(NetworkModel::configure(size, matrix)?);
        Ok(())
    }

    /// Validates and stores the algorithm parameters.
    pub fn configure_algorithm(&mut self, config: AlgorithmConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Sets the start and end nodes.
    ///
    /// Checked against the network immediately if one is configured, and
    /// again at search time.
    pub fn set_path_ends(&mut self, start: usize, end: usize) -> Result<()> {
        if let Some(net) = &self.network {
            check_endpoints(net, start, end)?;
        }
        self.endpoints = Some((start, end));
        Ok(())
    }

    /// Enables per-generation [`GenerationObserver::inspect`] calls.
    pub fn set_step_mode(&mut self, enabled: bool) {
        self.step_mode = enabled;
    }

    /// Replaces the observer that receives inspection and progress events.
    pub fn set_observer(&mut self, observer: Box<dyn GenerationObserver + Send>) {
        self.observer = observer;
    }

    /// Installs a flag that stops the search at the next generation boundary.
    pub fn set_cancel_token(&mut self, cancel: Arc<AtomicBool>) {
        self.cancel = Some(cancel);
    }

    /// The configured network, if any.
    pub fn network(&self) -> Option<&NetworkModel> {
        self.network.as_ref()
    }

    /// The current algorithm parameters.
    pub fn config(&self) -> &AlgorithmConfig {
        &self.config
    }

    /// Runs one search with `chromosome_length` waypoints.
    ///
    /// # Errors
    /// - [`ConfigurationError::NetworkNotConfigured`]
    /// - [`ConfigurationError::EndpointsNotSet`]
    /// - [`ConfigurationError::EndpointOutOfRange`] if the network changed
    ///   after the endpoints were set
    /// - [`ConfigurationError::EmptyChromosome`]
    pub fn find_optimal_path(&mut self, chromosome_length: usize) -> Result<PathResult> {
        let network = self
            .network
            .as_ref()
            .ok_or(ConfigurationError::NetworkNotConfigured)?;
        let (start, end) = self.endpoints.ok_or(ConfigurationError::EndpointsNotSet)?;

        let mut engine = GeneticEngine::new(network, self.config.clone())?;
        engine.set_endpoints(start, end)?;
        engine.set_step_mode(self.step_mode);
        engine.find_path_observed(chromosome_length, self.observer.as_mut(), self.cancel.clone())
    }
}

fn check_endpoints(network: &NetworkModel, start: usize, end: usize) -> Result<()> {
    let size = network.size();
    for node in [start, end] {
        if node >= size {
            return Err(ConfigurationError::EndpointOutOfRange { node, size });
        }
    }
    Ok(())
}
