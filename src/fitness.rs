//! Fitness evaluation for timetable assignments.
//!
//! A solution is a slice with one timeslot index per exam. Cost combines
//! hard constraints (timeslot over-allocation, room capacity) with soft
//! preferences (balanced timeslot load, well-utilised rooms). Lower is better.

use crate::problem::{room_for_exam, Problem};
use serde::Serialize;

/// Penalty per exam beyond the number of rooms in a single timeslot.
pub const OVER_ALLOCATION_WEIGHT: f64 = 50.0;
/// Fixed penalty for an exam whose enrollment exceeds its room's capacity.
pub const CAPACITY_VIOLATION_PENALTY: f64 = 100.0;
/// Penalty per unused seat in an exam's room.
pub const UNDERUTILIZATION_WEIGHT: f64 = 0.1;

/// Turns a candidate solution into a nonnegative scalar cost.
///
/// Implementations must be pure: the same solution always yields the same
/// cost, and evaluation must be safe to call from several threads.
pub trait FitnessEvaluator: Send + Sync {
    /// Evaluate a solution. Lower is better.
    fn evaluate(&self, solution: &[usize]) -> f64;
}

impl<F> FitnessEvaluator for F
where
    F: Fn(&[usize]) -> f64 + Send + Sync,
{
    fn evaluate(&self, solution: &[usize]) -> f64 {
        self(solution)
    }
}

/// Per-constraint breakdown of a solution's cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PenaltyBreakdown {
    /// Timeslots holding more exams than there are rooms
    pub over_allocation: f64,
    /// Exams whose enrollment exceeds their room's capacity
    pub capacity: f64,
    /// Deviation of each used timeslot's load from the mean
    pub imbalance: f64,
    /// Unused seats across all exams
    pub underutilization: f64,
}

impl PenaltyBreakdown {
    pub fn hard(&self) -> f64 {
        self.over_allocation + self.capacity
    }

    pub fn soft(&self) -> f64 {
        self.imbalance + self.underutilization
    }

    pub fn total(&self) -> f64 {
        self.hard() + self.soft()
    }
}

/// The exam timetabling cost function.
///
/// Rooms are assigned round-robin by exam index, so room capacity checks
/// do not depend on the solution. Rooms never take part in conflict
/// detection beyond the per-timeslot exam count.
#[derive(Debug, Clone)]
pub struct ExamFitness {
    num_timeslots: usize,
    room_capacities: Vec<u32>,
    exam_student_counts: Vec<u32>,
}

impl ExamFitness {
    /// Create an evaluator for the given problem.
    pub fn new(problem: &Problem) -> Self {
        ExamFitness {
            num_timeslots: problem.num_timeslots,
            room_capacities: problem.room_capacities.clone(),
            exam_student_counts: problem.exam_student_counts.clone(),
        }
    }

    fn num_rooms(&self) -> usize {
        self.room_capacities.len()
    }

    /// Compute each penalty component separately.
    pub fn breakdown(&self, solution: &[usize]) -> PenaltyBreakdown {
        let mut breakdown = PenaltyBreakdown::default();
        if solution.is_empty() {
            return breakdown;
        }

        let num_rooms = self.num_rooms();

        // Indexed by timeslot so the summation order is fixed
        let mut timeslot_counts = vec![0usize; self.num_timeslots];
        for &timeslot in solution {
            timeslot_counts[timeslot] += 1;
        }
        let used: Vec<usize> = timeslot_counts
            .iter()
            .copied()
            .filter(|&count| count > 0)
            .collect();

        for &count in &used {
            if count > num_rooms {
                breakdown.over_allocation += (count - num_rooms) as f64 * OVER_ALLOCATION_WEIGHT;
            }
        }

        let average = solution.len() as f64 / used.len() as f64;
        breakdown.imbalance = used
            .iter()
            .map(|&count| (count as f64 - average).abs())
            .sum();

        for exam in 0..solution.len() {
            let capacity = self.room_capacities[room_for_exam(exam, num_rooms)];
            let students = self.exam_student_counts[exam];

            if students > capacity {
                breakdown.capacity += CAPACITY_VIOLATION_PENALTY;
            }

            let unused_seats = capacity.saturating_sub(students);
            breakdown.underutilization += unused_seats as f64 * UNDERUTILIZATION_WEIGHT;
        }

        breakdown
    }
}

impl FitnessEvaluator for ExamFitness {
    fn evaluate(&self, solution: &[usize]) -> f64 {
        self.breakdown(solution).total()
    }
}
