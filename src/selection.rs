//! Parent selection.
//!
//! Tournament selection over a read-only population snapshot: draw k
//! contestants uniformly and keep the one with the best fitness in the
//! configured objective slot.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::individual::{Individual, is_better};
use crate::recombine::Selector;

/// Configuration for tournament selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Number of individuals competing in each tournament.
    pub tournament_size: usize,
    /// Whether the objective is maximized.
    pub maximization: bool,
    /// Fitness-vector slot compared during tournaments.
    pub objective: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            tournament_size: 5,
            maximization: false,
            objective: 0,
        }
    }
}

/// Tournament selector over [`Individual`] populations.
#[derive(Debug, Clone, Copy)]
pub struct TournamentSelector {
    config: SelectionConfig,
}

impl TournamentSelector {
    /// Create a selector with the given configuration.
    #[must_use]
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }
}

impl Selector for TournamentSelector {
    type Selectable = Individual;

    fn prepare(&mut self, _population: &[Individual]) {}

    fn select<R: Rng>(&self, rng: &mut R, population: &[Individual]) -> usize {
        let size = population.len();
        if size == 0 {
            return 0;
        }

        let rounds = self.config.tournament_size.clamp(1, size);
        let mut best = rng.gen_range(0..size);
        for _ in 1..rounds {
            let challenger = rng.gen_range(0..size);
            if is_better(
                population[challenger].fitness(self.config.objective),
                population[best].fitness(self.config.objective),
                self.config.maximization,
            ) {
                best = challenger;
            }
        }
        best
    }

    fn maximization(&self) -> bool {
        self.config.maximization
    }

    fn objective(&self) -> usize {
        self.config.objective
    }
}

/// Summary statistics over one objective of a population.
#[derive(Debug, Clone, Copy)]
pub struct FitnessStats {
    /// Mean fitness.
    pub mean: f64,
    /// Largest fitness value.
    pub max: f64,
    /// Smallest fitness value.
    pub min: f64,
    /// Standard deviation of fitness.
    pub std: f64,
}

impl FitnessStats {
    /// Calculate statistics from raw fitness values.
    #[must_use]
    pub fn from_values(fitness: &[f64]) -> Self {
        if fitness.is_empty() {
            return Self {
                mean: 0.0,
                max: 0.0,
                min: 0.0,
                std: 0.0,
            };
        }

        let sum: f64 = fitness.iter().sum();
        let mean = sum / fitness.len() as f64;
        let max = fitness.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = fitness.iter().copied().fold(f64::INFINITY, f64::min);
        let variance: f64 =
            fitness.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / fitness.len() as f64;

        Self {
            mean,
            max,
            min,
            std: variance.sqrt(),
        }
    }
}
