//! Unit tests for the exam timetabling fitness function.

use abc_timetable::fitness::{ExamFitness, FitnessEvaluator};
use abc_timetable::neighborhood::Neighborhood;
use abc_timetable::problem::Problem;
use abc_timetable::solution::RunResult;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

/// Creates a problem with two rooms of 30 seats and four exams of 30 students.
fn create_test_problem() -> Problem {
    Problem::with_uniform_enrollment(
        "TestProblem".to_string(),
        4,           // exams
        2,           // timeslots
        vec![30, 30], // room capacities
        30,          // students per exam
    )
    .unwrap()
}

#[test]
fn test_even_split_has_zero_cost() {
    let fitness = ExamFitness::new(&create_test_problem());

    let breakdown = fitness.breakdown(&[0, 0, 1, 1]);
    assert_eq!(breakdown.over_allocation, 0.0);
    assert_eq!(breakdown.capacity, 0.0);
    assert_eq!(breakdown.imbalance, 0.0);
    assert_eq!(breakdown.underutilization, 0.0);
    assert_eq!(fitness.evaluate(&[0, 0, 1, 1]), 0.0);
}

#[test]
fn test_single_timeslot_is_over_allocated() {
    let fitness = ExamFitness::new(&create_test_problem());

    // Four exams, two rooms: (4 - 2) * 50
    assert_eq!(fitness.evaluate(&[0, 0, 0, 0]), 100.0);
}

#[test]
fn test_uneven_split_adds_imbalance() {
    let fitness = ExamFitness::new(&create_test_problem());

    // Counts 3 and 1, average 2: over-allocation 50, imbalance 2
    let breakdown = fitness.breakdown(&[0, 0, 0, 1]);
    assert_eq!(breakdown.over_allocation, 50.0);
    assert!((breakdown.imbalance - 2.0).abs() < 1e-9);
    assert!((fitness.evaluate(&[0, 0, 0, 1]) - 52.0).abs() < 1e-9);
}

#[test]
fn test_capacity_and_underutilization_follow_round_robin_rooms() {
    // Exams 0 and 2 use room 0 (capacity 40), exams 1 and 3 use room 1 (capacity 25)
    let problem = Problem::new(
        "Rooms".to_string(),
        4,
        2,
        vec![40, 25],
        vec![30, 30, 40, 20],
    )
    .unwrap();
    let fitness = ExamFitness::new(&problem);

    let breakdown = fitness.breakdown(&[0, 1, 0, 1]);
    assert_eq!(breakdown.capacity, 100.0); // exam 1: 30 > 25
    assert!((breakdown.underutilization - 1.5).abs() < 1e-9); // 10 + 0 + 0 + 5 seats
    assert!((breakdown.total() - 101.5).abs() < 1e-9);
}

#[test]
fn test_capacity_penalty_is_independent_of_timeslots() {
    let problem = Problem::new("Big".to_string(), 2, 3, vec![10], vec![50, 5]).unwrap();
    let fitness = ExamFitness::new(&problem);

    for solution in [[0, 1], [2, 0], [1, 2]] {
        assert_eq!(fitness.breakdown(&solution).capacity, 100.0);
    }
}

#[test]
fn test_cost_is_never_negative() {
    let problem = Problem::new(
        "Random".to_string(),
        25,
        6,
        vec![20, 35, 50],
        (0..25).map(|e| (e * 7 % 60) as u32).collect(),
    )
    .unwrap();
    let fitness = ExamFitness::new(&problem);
    let neighborhood = Neighborhood::new(problem.num_exams, problem.num_timeslots);
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    for _ in 0..200 {
        let solution = neighborhood.random_solution(&mut rng);
        let cost = fitness.evaluate(&solution);
        assert!(cost.is_finite());
        assert!(cost >= 0.0);
    }
}

#[test]
fn test_evaluation_is_deterministic() {
    let fitness = ExamFitness::new(&create_test_problem());
    let solution = [1, 0, 1, 1];
    assert_eq!(fitness.evaluate(&solution), fitness.evaluate(&solution));
}

#[test]
fn test_rooms_agree_between_problem_fitness_and_result() {
    let problem = Problem::new(
        "Rooms".to_string(),
        5,
        2,
        vec![50, 20, 35],
        vec![10, 30, 10, 10, 10],
    )
    .unwrap();
    let fitness = ExamFitness::new(&problem);
    let solution = vec![0, 1, 0, 1, 0];

    // Only exam 1 overflows, and only because it lands in the 20-seat room
    assert_eq!(problem.room_for_exam(1), 1);
    assert_eq!(fitness.breakdown(&solution).capacity, 100.0);

    let result = RunResult {
        best_solution: solution,
        best_fitness: 0.0,
        fitness_history: Vec::new(),
        generations: 0,
        run_time: Duration::from_secs(0),
    };
    for assignment in result.assignments(problem.num_rooms()) {
        assert_eq!(assignment.room, problem.room_for_exam(assignment.exam));
    }
}
