//! Strict-improvement offspring policy with adaptive admission control.

use log::trace;
use rand::Rng;

use crate::individual::{Individual, better, is_better};
use crate::recombine::{Crossover, Evaluator, Mutator, Selector, draw_variation};

/// Recombinator that only admits offspring strictly better than their
/// lineage.
///
/// The reference fitness is the selected parent's, or the better of both
/// parents when crossover fires; a child survives only with a finite
/// fitness that strictly beats it. Rejections are an expected outcome the
/// caller answers by retrying, and the selection-pressure signal bounds how
/// long the generational loop keeps chasing the bar once the population has
/// converged.
#[derive(Debug)]
pub struct StrictRecombinator<E, S, C, M> {
    evaluator: E,
    selector: S,
    crossover: C,
    mutator: M,
    max_selection_pressure: f64,
    evaluations_at_prepare: u64,
    population_size: usize,
}

impl<E, S, C, M> StrictRecombinator<E, S, C, M>
where
    E: Evaluator,
    S: Selector<Selectable = Individual>,
    C: Crossover,
    M: Mutator,
{
    /// Default ceiling for the selection-pressure termination signal.
    pub const DEFAULT_MAX_SELECTION_PRESSURE: f64 = 100.0;

    /// Compose a recombinator from its four collaborator roles.
    #[must_use]
    pub fn new(evaluator: E, selector: S, crossover: C, mutator: M) -> Self {
        Self {
            evaluator,
            selector,
            crossover,
            mutator,
            max_selection_pressure: Self::DEFAULT_MAX_SELECTION_PRESSURE,
            evaluations_at_prepare: 0,
            population_size: 0,
        }
    }

    /// The composed evaluator.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// The composed selector.
    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Selection-pressure ceiling for [`StrictRecombinator::terminate`].
    #[must_use]
    pub fn max_selection_pressure(&self) -> f64 {
        self.max_selection_pressure
    }

    /// Set the selection-pressure ceiling.
    pub fn set_max_selection_pressure(&mut self, value: f64) {
        self.max_selection_pressure = value;
    }

    /// Index the population for this generation and snapshot the
    /// evaluation counter.
    ///
    /// Must be called once per generation before [`StrictRecombinator::produce`].
    pub fn prepare(&mut self, population: &[Individual]) {
        self.selector.prepare(population);
        self.evaluations_at_prepare = self.evaluator.evaluation_count();
        self.population_size = population.len();
    }

    /// Attempt to produce one offspring.
    ///
    /// Returns `None` when neither variation trial fires or when the child
    /// fails the strict-improvement bar; both are ordinary outcomes the
    /// caller answers by retrying. `population` must be the slice passed to
    /// [`StrictRecombinator::prepare`], unmodified.
    pub fn produce<R: Rng>(
        &self,
        rng: &mut R,
        population: &[Individual],
        p_crossover: f64,
        p_mutation: f64,
    ) -> Option<Individual> {
        let variation = draw_variation(rng, p_crossover, p_mutation)?;
        let objective = self.selector.objective();
        let maximization = self.selector.maximization();

        let first = self.selector.select(rng, population);
        let mut reference = population[first].fitness(objective);

        let genotype = if variation.do_crossover {
            let second = self.selector.select(rng, population);
            reference = better(reference, population[second].fitness(objective), maximization);
            self.crossover.combine(
                rng,
                &population[first].genotype,
                &population[second].genotype,
            )
        } else {
            population[first].genotype.clone()
        };

        let genotype = if variation.do_mutation {
            self.mutator.mutate(rng, genotype)
        } else {
            genotype
        };

        let mut child = Individual::new(genotype, population[first].fitness.len());
        let fitness = self.evaluator.evaluate(rng, &child);
        child.fitness[objective] = fitness;

        if fitness.is_finite() && is_better(fitness, reference, maximization) {
            Some(child)
        } else {
            trace!("offspring rejected: fitness {fitness} vs reference {reference}");
            None
        }
    }

    /// Fitness evaluations spent since [`StrictRecombinator::prepare`],
    /// per population member.
    #[must_use]
    pub fn selection_pressure(&self) -> f64 {
        if self.population_size == 0 {
            return 0.0;
        }
        let spent = self.evaluator.evaluation_count() - self.evaluations_at_prepare;
        spent as f64 / self.population_size as f64
    }

    /// Whether the generational loop should stop retrying.
    ///
    /// Flips true once the selection pressure exceeds the configured
    /// ceiling; any additional stopping conditions (time or evaluation
    /// budgets) are owned by the outer loop.
    #[must_use]
    pub fn terminate(&self) -> bool {
        self.selection_pressure() > self.max_selection_pressure
    }
}
