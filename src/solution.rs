//! Output of an optimization run.

use crate::problem::room_for_exam;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Placement of a single exam in the final timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExamAssignment {
    pub exam: usize,
    pub timeslot: usize,
    pub room: usize,
}

/// The best timetable found by a run and its convergence trace.
#[derive(Clone, Serialize)]
pub struct RunResult {
    /// Timeslot assigned to each exam in the best timetable found
    pub best_solution: Vec<usize>,
    /// Cost of the best timetable
    pub best_fitness: f64,
    /// Population minimum recorded after each generation
    pub fitness_history: Vec<f64>,
    /// Number of generations completed
    pub generations: usize,
    /// Wall-clock time spent in the search
    #[serde(skip)]
    pub run_time: Duration,
}

impl RunResult {
    /// Running minimum of the fitness history.
    ///
    /// The history records each generation's population minimum, which
    /// may rise after a scout replaces the best source; this curve never does.
    pub fn best_so_far_curve(&self) -> Vec<f64> {
        self.fitness_history
            .iter()
            .scan(f64::INFINITY, |best, &fitness| {
                *best = best.min(fitness);
                Some(*best)
            })
            .collect()
    }

    /// Exam placements, with rooms assigned round-robin by exam index.
    pub fn assignments(&self, num_rooms: usize) -> Vec<ExamAssignment> {
        self.best_solution
            .iter()
            .enumerate()
            .map(|(exam, &timeslot)| ExamAssignment {
                exam,
                timeslot,
                room: room_for_exam(exam, num_rooms),
            })
            .collect()
    }

    /// Exams grouped by timeslot, one entry per timeslot in `0..num_timeslots`.
    pub fn exams_by_timeslot(&self, num_timeslots: usize) -> Vec<Vec<usize>> {
        let mut slots = vec![Vec::new(); num_timeslots];
        for (exam, &timeslot) in self.best_solution.iter().enumerate() {
            slots[timeslot].push(exam);
        }
        slots
    }
}

impl fmt::Debug for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RunResult:")?;
        writeln!(f, "  Best Fitness: {:.2}", self.best_fitness)?;
        writeln!(f, "  Generations: {}", self.generations)?;
        writeln!(f, "  Run Time: {:?}", self.run_time)?;
        writeln!(f, "  Best Solution: {:?}", self.best_solution)?;
        Ok(())
    }
}
