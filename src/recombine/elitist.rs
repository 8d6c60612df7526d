//! Elitist offspring policy: the result is never worse than its lineage.

use log::trace;
use rand::Rng;

use crate::individual::{Individual, is_better};
use crate::recombine::{Crossover, Evaluator, Mutator, Selector, draw_variation};

/// Recombinator that always returns an offspring, falling back to the best
/// parent when the child is worse.
///
/// A non-finite child fitness is replaced with a worst-possible sentinel
/// rather than discarded, so the best-of-lineage comparison still applies
/// and the offspring stream never degrades below its immediate parents.
#[derive(Debug)]
pub struct ElitistRecombinator<E, S, C, M> {
    evaluator: E,
    selector: S,
    crossover: C,
    mutator: M,
}

impl<E, S, C, M> ElitistRecombinator<E, S, C, M>
where
    E: Evaluator,
    S: Selector<Selectable = Individual>,
    C: Crossover,
    M: Mutator,
{
    /// Compose a recombinator from its four collaborator roles.
    #[must_use]
    pub fn new(evaluator: E, selector: S, crossover: C, mutator: M) -> Self {
        Self {
            evaluator,
            selector,
            crossover,
            mutator,
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

    /// Index the population for this generation.
    ///
    /// Must be called once per generation before [`ElitistRecombinator::produce`].
    pub fn prepare(&mut self, population: &[Individual]) {
        self.selector.prepare(population);
    }

    /// Attempt to produce one offspring.
    ///
    /// Returns `None` only when neither variation trial fires; the
    /// acceptance rule itself never rejects. The result is the best of
    /// child and contributing parents under the configured sense.
    /// `population` must be the slice passed to
    /// [`ElitistRecombinator::prepare`], unmodified.
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
        let second = self.selector.select(rng, population);

        let genotype = if variation.do_crossover {
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
        child.fitness[objective] = if fitness.is_finite() {
            fitness
        } else {
            // worst-possible sentinel keeps the comparison total
            if maximization { f64::MIN } else { f64::MAX }
        };

        let best_parent = if variation.do_crossover {
            let first_fitness = population[first].fitness(objective);
            let second_fitness = population[second].fitness(objective);
            if is_better(second_fitness, first_fitness, maximization) {
                second
            } else {
                first
            }
        } else {
            first
        };

        if is_better(
            population[best_parent].fitness(objective),
            child.fitness(objective),
            maximization,
        ) {
            trace!("child loses to its lineage, returning the parent");
            return Some(population[best_parent].clone());
        }
        Some(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recombine::stubs::{
        CloneCrossover, CyclingSelector, IdentityMutator, StubEvaluator, member,
    };
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn recombinator(
        child_fitness: f64,
        maximization: bool,
    ) -> ElitistRecombinator<StubEvaluator, CyclingSelector, CloneCrossover, IdentityMutator> {
        ElitistRecombinator::new(
            StubEvaluator::new(child_fitness),
            CyclingSelector::new(maximization),
            CloneCrossover,
            IdentityMutator,
        )
    }

    #[test]
    fn test_worse_child_yields_parent_unchanged() {
        let mut rng = SmallRng::seed_from_u64(42);
        let population = vec![member(5.0)];
        let mut rec = recombinator(9.0, false);
        rec.prepare(&population);

        let result = rec
            .produce(&mut rng, &population, 0.0, 1.0)
            .expect("elitist policy never rejects an attempted child");
        assert_eq!(result, population[0]);
        assert!((result.fitness(0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_better_child_is_kept() {
        let mut rng = SmallRng::seed_from_u64(42);
        let population = vec![member(5.0)];
        let mut rec = recombinator(2.0, false);
        rec.prepare(&population);

        let result = rec
            .produce(&mut rng, &population, 0.0, 1.0)
            .expect("child produced");
        assert!((result.fitness(0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_two_parent_fallback_picks_better_parent() {
        let mut rng = SmallRng::seed_from_u64(42);
        let population = vec![member(5.0), member(4.0)];
        let mut rec = recombinator(4.5, false);
        rec.prepare(&population);

        let result = rec
            .produce(&mut rng, &population, 1.0, 0.0)
            .expect("child produced");
        assert!((result.fitness(0) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_finite_child_becomes_sentinel_and_loses() {
        let mut rng = SmallRng::seed_from_u64(42);
        let population = vec![member(5.0)];
        for bad in [f64::NAN, f64::INFINITY] {
            let mut rec = recombinator(bad, false);
            rec.prepare(&population);
            let result = rec
                .produce(&mut rng, &population, 0.0, 1.0)
                .expect("non-finite fitness is not a rejection");
            assert!((result.fitness(0) - 5.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_sentinel_respects_maximization_sense() {
        let mut rng = SmallRng::seed_from_u64(42);
        // a lone parent whose fitness is the worst representable value still
        // beats nothing: the sentinel child ties and is kept
        let population = vec![member(f64::MIN)];
        let mut rec = recombinator(f64::NAN, true);
        rec.prepare(&population);

        let result = rec
            .produce(&mut rng, &population, 0.0, 1.0)
            .expect("child produced");
        assert!((result.fitness(0) - f64::MIN).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_trial_still_returns_none() {
        let mut rng = SmallRng::seed_from_u64(42);
        let population = vec![member(5.0)];
        let mut rec = recombinator(1.0, false);
        rec.prepare(&population);

        assert!(rec.produce(&mut rng, &population, 0.0, 0.0).is_none());
        assert_eq!(rec.evaluator().evaluation_count(), 0);
    }
}
