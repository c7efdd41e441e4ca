//! Population management for the bee colony.

use crate::fitness::FitnessEvaluator;
use crate::food_source::FoodSource;
use crate::neighborhood::Neighborhood;
use itertools::Itertools;
use rand::Rng;

/// Guards the inverse-fitness weights against division by zero.
pub const SELECTION_EPSILON: f64 = 1e-6;

/// Fixed-size arena of food sources, addressed by index.
#[derive(Debug, Clone, Default)]
pub struct Colony {
    pub food_sources: Vec<FoodSource>,
}

impl Colony {
    /// Create an empty colony with room for `size` food sources.
    pub fn new(size: usize) -> Self {
        Colony {
            food_sources: Vec::with_capacity(size),
        }
    }

    /// Fill the colony with `size` random, evaluated food sources.
    pub fn initialize<E, R>(
        &mut self,
        size: usize,
        neighborhood: &Neighborhood,
        evaluator: &E,
        rng: &mut R,
    ) where
        E: FitnessEvaluator + ?Sized,
        R: Rng + ?Sized,
    {
        self.food_sources.clear();

        for _ in 0..size {
            let solution = neighborhood.random_solution(rng);
            let fitness = evaluator.evaluate(&solution);
            self.food_sources.push(FoodSource::new(solution, fitness));
        }
    }

    /// Get the number of food sources.
    pub fn len(&self) -> usize {
        self.food_sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.food_sources.is_empty()
    }

    /// Selection probability of each food source, proportional to
    /// `1 / (fitness + ε)` and normalized to sum to one.
    pub fn selection_probabilities(&self) -> Vec<f64> {
        let weights: Vec<f64> = self
            .food_sources
            .iter()
            .map(|source| 1.0 / (source.fitness + SELECTION_EPSILON))
            .collect();
        let total: f64 = weights.iter().sum();

        weights.into_iter().map(|w| w / total).collect()
    }

    /// Draw an index by roulette-wheel sampling.
    pub fn select_onlooker<R: Rng + ?Sized>(&self, probabilities: &[f64], rng: &mut R) -> usize {
        roulette_wheel_selection(probabilities, rng.gen::<f64>())
    }

    /// The food source with the lowest fitness, first index on ties.
    pub fn best(&self) -> Option<(usize, &FoodSource)> {
        self.food_sources
            .iter()
            .position_min_by(|a, b| a.cmp_fitness(b))
            .map(|index| (index, &self.food_sources[index]))
    }

    /// The lowest fitness currently in the colony.
    pub fn min_fitness(&self) -> Option<f64> {
        self.best().map(|(_, source)| source.fitness)
    }
}

/// Select the first index whose cumulative probability reaches `r`.
///
/// Falls back to the last index when rounding leaves the cumulative sum
/// below `r`.
pub fn roulette_wheel_selection(probabilities: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;

    for (index, &probability) in probabilities.iter().enumerate() {
        cumulative += probability;
        if r <= cumulative {
            return index;
        }
    }

    probabilities.len().saturating_sub(1)
}
