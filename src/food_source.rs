//! Food source representation for the bee colony.

use std::cmp::Ordering;

/// A candidate timetable together with its fitness and staleness counter.
#[derive(Debug, Clone)]
pub struct FoodSource {
    /// Timeslot assigned to each exam
    pub solution: Vec<usize>,
    /// Cost of the solution (lower is better)
    pub fitness: f64,
    /// Consecutive search attempts that failed to improve this source
    pub trials: u32,
}

impl FoodSource {
    /// Create a fresh food source with a zero trial counter.
    pub fn new(solution: Vec<usize>, fitness: f64) -> Self {
        FoodSource {
            solution,
            fitness,
            trials: 0,
        }
    }

    /// Greedy replacement: adopt the candidate if it is strictly better,
    /// otherwise count a failed trial. Returns whether the candidate was kept.
    pub fn try_improve(&mut self, candidate: Vec<usize>, candidate_fitness: f64) -> bool {
        if candidate_fitness < self.fitness {
            self.solution = candidate;
            self.fitness = candidate_fitness;
            self.trials = 0;
            true
        } else {
            self.trials += 1;
            false
        }
    }

    /// Replace the source wholesale and reset its trial counter.
    pub fn reset(&mut self, solution: Vec<usize>, fitness: f64) {
        self.solution = solution;
        self.fitness = fitness;
        self.trials = 0;
    }

    /// Check whether the source has gone stale.
    pub fn is_exhausted(&self, limit: u32) -> bool {
        self.trials >= limit
    }

    /// Order two sources by fitness alone; their timetables are not compared.
    pub fn cmp_fitness(&self, other: &FoodSource) -> Ordering {
        self.fitness
            .partial_cmp(&other.fitness)
            .unwrap_or(Ordering::Equal)
    }
}
