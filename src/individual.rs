//! Individuals: one tree genotype plus a fitness vector.
//!
//! Individuals are owned by the population container and replaced wholesale
//! at generation boundaries; nothing mutates a shared individual in place.

use crate::tree::Tree;

/// One member of the population.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Individual {
    /// The tree-encoded candidate program.
    pub genotype: Tree,
    /// Fitness values, one slot per objective. Unevaluated slots are NaN.
    pub fitness: Vec<f64>,
}

impl Individual {
    /// Create an unevaluated individual with `objectives` fitness slots.
    #[must_use]
    pub fn new(genotype: Tree, objectives: usize) -> Self {
        Self {
            genotype,
            fitness: vec![f64::NAN; objectives],
        }
    }

    /// Fitness value in the given objective slot.
    #[must_use]
    pub fn fitness(&self, objective: usize) -> f64 {
        self.fitness[objective]
    }
}

/// Whether `candidate` is strictly better than `reference` under the
/// objective sense.
#[must_use]
pub fn is_better(candidate: f64, reference: f64, maximization: bool) -> bool {
    if maximization {
        candidate > reference
    } else {
        candidate < reference
    }
}

/// The better of two fitness values under the objective sense.
#[must_use]
pub fn better(a: f64, b: f64, maximization: bool) -> f64 {
    if is_better(b, a, maximization) { b } else { a }
}
