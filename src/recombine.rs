//! Recombination engine: policy-driven offspring production.
//!
//! A recombinator is composed at construction time from four narrow
//! collaborator roles and produces at most one offspring per call:
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Produce (one offspring attempt)   │
//! ├─────────────────────────────────────┤
//! │ Selector │ Crossover │ Mutator      │
//! ├─────────────────────────────────────┤
//! │      Evaluator (fitness, counter)   │
//! └─────────────────────────────────────┘
//! ```
//!
//! Both policies share the same protocol: draw independent Bernoulli trials
//! for crossover and mutation (neither firing yields an empty result),
//! select parents, build and evaluate the child, then apply the policy's
//! acceptance rule. An empty result is an expected, frequent outcome; the
//! generational loop retries with fresh draws.

mod elitist;
mod strict;

pub use elitist::ElitistRecombinator;
pub use strict::StrictRecombinator;

use rand::Rng;

use crate::individual::Individual;
use crate::tree::Tree;

/// Maps a genotype to a fitness value and counts every evaluation.
///
/// The counter must be monotonically increasing and readable at any time;
/// implementors update it thread-safely (an atomic) so that `produce` can
/// run from independent worker tasks.
pub trait Evaluator {
    /// Evaluate the individual's genotype, returning its fitness.
    fn evaluate<R: Rng>(&self, rng: &mut R, individual: &Individual) -> f64;

    /// Cumulative number of evaluations performed so far.
    fn evaluation_count(&self) -> u64;
}

/// Chooses parents out of a population snapshot.
pub trait Selector {
    /// The element type this selector selects over.
    type Selectable;

    /// Index the population for the coming generation.
    ///
    /// Called once per generation; subsequent [`Selector::select`] calls
    /// must receive the same, unmodified slice.
    fn prepare(&mut self, population: &[Self::Selectable]);

    /// Choose one parent index.
    fn select<R: Rng>(&self, rng: &mut R, population: &[Self::Selectable]) -> usize;

    /// Whether the objective is maximized.
    fn maximization(&self) -> bool;

    /// Which fitness-vector slot is compared.
    fn objective(&self) -> usize;
}

/// Combines two parent genotypes into one offspring genotype.
pub trait Crossover {
    /// Produce an offspring genotype from two parents.
    fn combine<R: Rng>(&self, rng: &mut R, a: &Tree, b: &Tree) -> Tree;
}

/// Applies a variation to one genotype, consuming it.
pub trait Mutator {
    /// Return the mutated genotype.
    fn mutate<R: Rng>(&self, rng: &mut R, genotype: Tree) -> Tree;
}

/// Outcome of the two independent Bernoulli trials opening every attempt.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Variation {
    pub do_crossover: bool,
    pub do_mutation: bool,
}

/// Draw the crossover/mutation trials; `None` when neither fires.
pub(crate) fn draw_variation<R: Rng>(
    rng: &mut R,
    p_crossover: f64,
    p_mutation: f64,
) -> Option<Variation> {
    let do_crossover = rng.gen_bool(p_crossover);
    let do_mutation = rng.gen_bool(p_mutation);
    (do_crossover || do_mutation).then_some(Variation {
        do_crossover,
        do_mutation,
    })
}
