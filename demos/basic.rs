//! Basic example of using the ABC timetabling library.

use abc_timetable::config::Config;
use abc_timetable::fitness::ExamFitness;
use abc_timetable::problem::Problem;
use abc_timetable::utils::{print_convergence_plot, save_result_json, SearchStatistics};
use std::ops::ControlFlow;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // 40 exams over 8 timeslots in five rooms
    let room_capacities = vec![30, 40, 40, 60, 80];
    let exam_student_counts = (0..40).map(|exam| 20 + (exam * 7 % 50) as u32).collect();
    let problem = Problem::new(
        "demo".to_string(),
        40,
        8,
        room_capacities,
        exam_student_counts,
    )?;
    println!(
        "Problem: {} exams, {} timeslots, {} rooms",
        problem.num_exams,
        problem.num_timeslots,
        problem.num_rooms()
    );

    // Configure algorithm
    let config = Config::new()
        .with_num_bees(30)
        .with_limit(20)
        .with_max_iter(300)
        .with_seed(2024);

    // Create and run algorithm, reporting progress every 50 generations
    let mut algorithm = abc_timetable::AbcAlgorithm::for_problem(&problem, config)?;
    let result = algorithm.run_with_observer(|report| {
        if report.generation % 50 == 0 {
            println!(
                "generation {:>4}: population best {:.2}, best so far {:.2}",
                report.generation, report.population_best, report.best_fitness
            );
        }
        ControlFlow::Continue(())
    });

    // Print results
    let penalties = ExamFitness::new(&problem).breakdown(&result.best_solution);
    println!("{}", SearchStatistics::new(&result, &problem, penalties).format());
    print_convergence_plot(&result);

    for (timeslot, exams) in result
        .exams_by_timeslot(problem.num_timeslots)
        .iter()
        .enumerate()
    {
        println!("Timeslot {}: {:?}", timeslot, exams);
    }

    // Save result
    let output_path = format!("{}.json", problem.name);
    println!("Saving result to: {}", output_path);
    save_result_json(&result, &problem, Some(penalties), &output_path)?;

    Ok(())
}
