//! # ABC Timetable
//!
//! An Artificial Bee Colony (ABC) optimizer for exam timetabling.
//!
//! Each candidate timetable assigns every exam to a timeslot. A colony of
//! food sources is improved generation by generation through three phases:
//! employed bees exploit every source, onlooker bees revisit sources in
//! proportion to their quality, and scout bees replace sources that have
//! stopped improving. Candidates are scored by a pluggable
//! [`FitnessEvaluator`](fitness::FitnessEvaluator); the default
//! [`ExamFitness`](fitness::ExamFitness) combines hard capacity and conflict
//! penalties with soft load-balance and utilisation penalties.

pub mod colony;
pub mod config;
pub mod error;
pub mod fitness;
pub mod food_source;
pub mod neighborhood;
pub mod problem;
pub mod solution;
pub mod utils;

use crate::colony::Colony;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fitness::{ExamFitness, FitnessEvaluator};
use crate::neighborhood::Neighborhood;
use crate::problem::Problem;
use crate::solution::RunResult;

use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// Snapshot handed to an observer after each generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationReport<'a> {
    /// Zero-based index of the generation just completed
    pub generation: usize,
    /// Lowest fitness in the colony after this generation
    pub population_best: f64,
    /// Lowest fitness observed so far
    pub best_fitness: f64,
    /// Timetable achieving `best_fitness`
    pub best_solution: &'a [usize],
    /// Food sources abandoned by scouts this generation
    pub scouts: usize,
}

/// The main algorithm structure that orchestrates the bee colony search.
pub struct AbcAlgorithm<E, R = ChaCha8Rng> {
    pub num_exams: usize,
    pub num_timeslots: usize,
    pub config: Config,
    pub evaluator: E,
    pub neighborhood: Neighborhood,
    pub colony: Colony,
    pub best_solution: Vec<usize>,
    pub best_fitness: f64,
    pub fitness_history: Vec<f64>,
    pub generations: usize,
    pub run_time: Duration,
    pub rng: R,
}

impl AbcAlgorithm<ExamFitness> {
    /// Create an optimizer scoring timetables with [`ExamFitness`].
    pub fn for_problem(problem: &Problem, config: Config) -> Result<Self> {
        Self::new(
            problem.num_exams,
            problem.num_timeslots,
            config,
            ExamFitness::new(problem),
        )
    }
}

impl<E: FitnessEvaluator> AbcAlgorithm<E> {
    /// Create an optimizer whose generator is seeded from `config.seed`,
    /// or from entropy when no seed is set.
    ///
    /// `num_exams` and `num_timeslots` must match what `evaluator` expects.
    /// An [`ExamFitness`] indexes its timeslot counts by the problem's
    /// timeslot count, so build those optimizers with
    /// [`AbcAlgorithm::for_problem`], which takes both from one [`Problem`].
    pub fn new(
        num_exams: usize,
        num_timeslots: usize,
        config: Config,
        evaluator: E,
    ) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(num_exams, num_timeslots, config, evaluator, rng)
    }
}

impl<E: FitnessEvaluator, R: Rng> AbcAlgorithm<E, R> {
    /// Create an optimizer drawing all randomness from `rng`.
    ///
    /// The same dimension caveat as [`AbcAlgorithm::new`] applies.
    pub fn with_rng(
        num_exams: usize,
        num_timeslots: usize,
        config: Config,
        evaluator: E,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        if num_exams == 0 {
            return Err(Error::InvalidProblem(
                "num_exams must be at least 1".to_string(),
            ));
        }
        if num_timeslots == 0 {
            return Err(Error::InvalidProblem(
                "num_timeslots must be at least 1".to_string(),
            ));
        }

        Ok(AbcAlgorithm {
            num_exams,
            num_timeslots,
            neighborhood: Neighborhood::new(num_exams, num_timeslots),
            colony: Colony::new(config.num_bees),
            config,
            evaluator,
            best_solution: Vec::new(),
            best_fitness: f64::INFINITY,
            fitness_history: Vec::new(),
            generations: 0,
            run_time: Duration::from_secs(0),
            rng,
        })
    }

    /// Populate the colony with random timetables and seed the best-known state.
    pub fn initialize(&mut self) {
        self.best_solution.clear();
        self.best_fitness = f64::INFINITY;
        self.fitness_history.clear();
        self.generations = 0;

        self.colony.initialize(
            self.config.num_bees,
            &self.neighborhood,
            &self.evaluator,
            &mut self.rng,
        );
        self.update_best();
    }

    /// Generate one neighbor per food source and keep it if strictly better.
    pub fn employed_bee_phase(&mut self) {
        for index in 0..self.colony.len() {
            self.explore(index);
        }
    }

    /// Draw `num_bees` food sources by roulette wheel and try to improve each.
    ///
    /// Probabilities are fixed for the whole phase.
    pub fn onlooker_bee_phase(&mut self) {
        let probabilities = self.colony.selection_probabilities();

        for _ in 0..self.config.num_bees {
            let index = self.colony.select_onlooker(&probabilities, &mut self.rng);
            self.explore(index);
        }
    }

    /// Replace every exhausted food source with a fresh random timetable.
    /// Returns the number of sources replaced.
    pub fn scout_bee_phase(&mut self) -> usize {
        let mut scouts = 0;

        for (index, source) in self.colony.food_sources.iter_mut().enumerate() {
            if !source.is_exhausted(self.config.limit) {
                continue;
            }

            let solution = self.neighborhood.random_solution(&mut self.rng);
            let fitness = self.evaluator.evaluate(&solution);
            trace!(
                "Scout abandons source {} (fitness {:.3}, {} trials) for fitness {:.3}",
                index,
                source.fitness,
                source.trials,
                fitness
            );
            source.reset(solution, fitness);
            scouts += 1;
        }

        scouts
    }

    /// Run one full generation: employed, onlooker and scout phases followed
    /// by bookkeeping. Returns the population minimum for the generation.
    ///
    /// An empty colony is initialized first.
    pub fn step(&mut self) -> f64 {
        if self.colony.is_empty() {
            self.initialize();
        }
        self.advance().0
    }

    /// Run the search for `max_iter` generations.
    pub fn run(&mut self) -> RunResult {
        self.run_with_observer(|_| ControlFlow::Continue(()))
    }

    /// Run the search, calling `observer` after each generation.
    ///
    /// Returning `ControlFlow::Break(())` stops the search after the
    /// current generation; the history then covers only completed generations.
    pub fn run_with_observer<F>(&mut self, mut observer: F) -> RunResult
    where
        F: FnMut(&GenerationReport<'_>) -> ControlFlow<()>,
    {
        let start_time = Instant::now();
        info!(
            "Starting ABC search: {} exams, {} timeslots, {} bees, limit {}, {} generations",
            self.num_exams,
            self.num_timeslots,
            self.config.num_bees,
            self.config.limit,
            self.config.max_iter
        );

        self.initialize();
        info!("Initial best fitness: {:.3}", self.best_fitness);

        for generation in 0..self.config.max_iter {
            let (population_best, scouts) = self.advance();

            let report = GenerationReport {
                generation,
                population_best,
                best_fitness: self.best_fitness,
                best_solution: &self.best_solution,
                scouts,
            };
            if observer(&report).is_break() {
                info!("Search stopped by observer after {} generations", generation + 1);
                break;
            }
        }

        self.run_time = start_time.elapsed();
        info!(
            "ABC search finished in {}: best fitness {:.3}",
            utils::format_duration(self.run_time),
            self.best_fitness
        );

        self.result()
    }

    /// Snapshot of the best-known state.
    pub fn result(&self) -> RunResult {
        RunResult {
            best_solution: self.best_solution.clone(),
            best_fitness: self.best_fitness,
            fitness_history: self.fitness_history.clone(),
            generations: self.generations,
            run_time: self.run_time,
        }
    }

    /// Run the three phases and record the generation.
    /// Returns the population minimum and the number of scouts dispatched.
    fn advance(&mut self) -> (f64, usize) {
        self.employed_bee_phase();
        self.onlooker_bee_phase();
        let scouts = self.scout_bee_phase();
        let population_best = self.record_generation();

        debug!(
            "Generation {}: population best {:.3}, best so far {:.3}, scouts {}",
            self.generations, population_best, self.best_fitness, scouts
        );
        self.generations += 1;

        (population_best, scouts)
    }

    /// Evaluate one neighbor of food source `index` and apply greedy replacement.
    fn explore(&mut self, index: usize) {
        let source = &mut self.colony.food_sources[index];
        let candidate = self.neighborhood.neighbor(&source.solution, &mut self.rng);
        let fitness = self.evaluator.evaluate(&candidate);
        source.try_improve(candidate, fitness);
    }

    /// Append the colony minimum to the history and update the best-known state.
    fn record_generation(&mut self) -> f64 {
        let population_best = self.colony.min_fitness().unwrap_or(f64::INFINITY);
        self.fitness_history.push(population_best);
        self.update_best();
        population_best
    }

    fn update_best(&mut self) {
        if let Some((_, source)) = self.colony.best() {
            if source.fitness < self.best_fitness {
                self.best_fitness = source.fitness;
                self.best_solution = source.solution.clone();
            }
        }
    }
}
