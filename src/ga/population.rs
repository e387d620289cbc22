//! Population-level GA operators.
//!
//! [`PopulationManager`] owns the random source and applies the operators
//! from [`selection`](super::selection) and [`operators`](super::operators)
//! to whole generations: initialization, mating-pool selection, crossover,
//! mutation, and elitist (μ+λ) survivor reduction.

use super::config::AlgorithmConfig;
use super::operators::{reset_mutation, single_point_crossover};
use super::selection::tournament_pool;
use super::types::{Chromosome, Population};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Applies GA operators for a network of `node_count` nodes.
///
/// The random source is explicit so runs are reproducible: build with
/// [`from_config`](Self::from_config) to seed from
/// [`AlgorithmConfig::seed`], or [`with_rng`](Self::with_rng) to inject one.
///
/// # Examples
///
/// ```
/// use u_pathga::ga::{AlgorithmConfig, PopulationManager};
///
/// let config = AlgorithmConfig::default().with_population_size(10).with_seed(1);
/// let mut manager = PopulationManager::from_config(&config, 5);
///
/// let population = manager.initialize_population(3);
/// assert_eq!(population.len(), 10);
/// assert!(population.iter().all(|c| c.len() == 3 && c.iter().all(|&g| g < 5)));
/// ```
#[derive(Debug, Clone)]
pub struct PopulationManager<R = StdRng> {
    node_count: usize,
    population_size: usize,
    tournament_size: usize,
    crossover_rate: f64,
    mutation_rate: f64,
    distinct_survivors: bool,
    rng: R,
}

impl PopulationManager<StdRng> {
    /// Builds a manager seeded from `config.seed`, or from entropy when unset.
    pub fn from_config(config: &AlgorithmConfig, node_count: usize) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::with_rng(config, node_count, rng)
    }
}

impl<R: Rng> PopulationManager<R> {
    /// Builds a manager around a caller-supplied random source.
    pub fn with_rng(config: &AlgorithmConfig, node_count: usize, rng: R) -> Self {
        Self {
            node_count,
            population_size: config.population_size,
            tournament_size: config.tournament_size,
            crossover_rate: config.crossover_rate,
            mutation_rate: config.mutation_rate,
            distinct_survivors: config.distinct_survivors,
            rng,
        }
    }

    /// Number of chromosomes kept by [`reduce_population`](Self::reduce_population).
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Creates `population_size` chromosomes of uniformly random node indices.
    pub fn initialize_population(&mut self, chromosome_length: usize) -> Population {
        let n = self.node_count;
        (0..self.population_size)
            .map(|_| {
                (0..chromosome_length)
                    .map(|_| self.rng.random_range(0..n))
                    .collect()
            })
            .collect()
    }

    /// Builds a same-size mating pool by repeated tournaments.
    ///
    /// # Panics
    /// Panics if `population` and `fitness` differ in length, or are empty.
    pub fn tournament_selection(
        &mut self,
        population: &[Chromosome],
        fitness: &[f64],
    ) -> Population {
        assert_eq!(
            population.len(),
            fitness.len(),
            "population and fitness must be index-aligned"
        );
        tournament_pool(fitness, self.tournament_size, &mut self.rng)
            .into_iter()
            .map(|idx| population[idx].clone())
            .collect()
    }

    /// Recombines two parents with probability `crossover_rate`.
    ///
    /// Otherwise the parents are handed back unchanged.
    pub fn crossover(&mut self, parent1: Chromosome, parent2: Chromosome) -> (Chromosome, Chromosome) {
        if self.rng.random_range(0.0..1.0) < self.crossover_rate {
            single_point_crossover(parent1, parent2, &mut self.rng)
        } else {
            (parent1, parent2)
        }
    }

    /// Redraws each gene with probability `mutation_rate`.
    pub fn mutate(&mut self, mut chromosome: Chromosome) -> Chromosome {
        reset_mutation(&mut chromosome, self.node_count, self.mutation_rate, &mut self.rng);
        chromosome
    }

    /// Pairs up a mating pool, crosses each pair, and mutates every child.
    ///
    /// An odd leftover individual is passed through crossover untouched but
    /// still mutated. The result has the same length as `pool`.
    pub fn breed(&mut self, pool: Population) -> Population {
        let mut offspring = Vec::with_capacity(pool.len());
        let mut parents = pool.into_iter();
        while let Some(p1) = parents.next() {
            match parents.next() {
                Some(p2) => {
                    let (c1, c2) = self.crossover(p1, p2);
                    offspring.push(c1);
                    offspring.push(c2);
                }
                None => offspring.push(p1),
            }
        }
        offspring.into_iter().map(|c| self.mutate(c)).collect()
    }

    /// Elitist (μ+λ) survivor selection.
    ///
    /// Concatenates parents and offspring, sorts by descending fitness
    /// (stable, so parents win ties), and keeps the first `population_size`.
    /// With `distinct_survivors`, duplicates are only used to backfill when
    /// too few distinct chromosomes exist.
    ///
    /// # Panics
    /// Panics if a population and its fitness slice differ in length.
    pub fn reduce_population(
        &self,
        population: Population,
        fitness: Vec<f64>,
        offspring: Population,
        offspring_fitness: Vec<f64>,
    ) -> (Population, Vec<f64>) {
        assert_eq!(population.len(), fitness.len(), "parent fitness misaligned");
        assert_eq!(
            offspring.len(),
            offspring_fitness.len(),
            "offspring fitness misaligned"
        );

        let mut combined: Vec<(Chromosome, f64)> = population
            .into_iter()
            .zip(fitness)
            .chain(offspring.into_iter().zip(offspring_fitness))
            .collect();
        combined.sort_by(|a, b| b.1.total_cmp(&a.1));

        let survivors = if self.distinct_survivors {
            self.take_distinct(combined)
        } else {
            combined.truncate(self.population_size);
            combined
        };
        survivors.into_iter().unzip()
    }

    fn take_distinct(&self, ranked: Vec<(Chromosome, f64)>) -> Vec<(Chromosome, f64)> {
        let mut seen: HashSet<Chromosome> = HashSet::with_capacity(ranked.len());
        let mut kept = Vec::with_capacity(self.population_size);
        let mut duplicates = Vec::new();
        for entry in ranked {
            if kept.len() == self.population_size {
                break;
            }
            if seen.insert(entry.0.clone()) {
                kept.push(entry);
            } else {
                duplicates.push(entry);
            }
        }
        // Duplicates are already in rank order.
        let missing = self.population_size - kept.len();
        kept.extend(duplicates.into_iter().take(missing));
        kept.sort_by(|a, b| b.1.total_cmp(&a.1));
        kept
    }
}
