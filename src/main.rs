//! Command-line entry point for the ABC exam timetabling optimizer.

use abc_timetable::config::Config;
use abc_timetable::error::Result;
use abc_timetable::fitness::ExamFitness;
use abc_timetable::problem::Problem;
use abc_timetable::utils::{
    print_convergence_plot, save_assignments_csv, save_result_json, SearchStatistics,
};
use abc_timetable::AbcAlgorithm;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

/// Optimize an exam timetable with the Artificial Bee Colony algorithm.
#[derive(Parser, Debug)]
#[command(name = "abc-timetable", author, version, about)]
struct Args {
    /// Classrooms table (CSV with a `capacity` column)
    #[arg(long, value_name = "FILE")]
    classrooms: PathBuf,
    /// Timeslots table (CSV, one row per timeslot)
    #[arg(long, value_name = "FILE")]
    timeslots: PathBuf,
    /// Enrollment table (CSV with a `students` column, one row per exam)
    #[arg(long, value_name = "FILE")]
    enrollments: Option<PathBuf>,
    /// Number of exams, defaults to the enrollment or timeslot row count
    #[arg(long)]
    exams: Option<usize>,
    /// Number of bees (food sources)
    #[arg(long, default_value_t = 30)]
    bees: usize,
    /// Abandonment limit
    #[arg(long, default_value_t = 20)]
    limit: u32,
    /// Number of generations
    #[arg(long, default_value_t = 200)]
    iterations: usize,
    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Write the result as JSON to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Write the best timetable as CSV to this file
    #[arg(long, value_name = "FILE")]
    assignments: Option<PathBuf>,
    /// Print the convergence curve to the console
    #[arg(long)]
    plot: bool,
}

impl Args {
    fn config(&self) -> Config {
        let config = Config::new()
            .with_num_bees(self.bees)
            .with_limit(self.limit)
            .with_max_iter(self.iterations);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn run(args: Args) -> Result<()> {
    let problem = Problem::from_csv(
        &args.classrooms,
        &args.timeslots,
        args.enrollments.as_ref(),
        args.exams,
    )?;
    info!(
        "Loaded instance {}: {} exams, {} timeslots, {} rooms",
        problem.name,
        problem.num_exams,
        problem.num_timeslots,
        problem.num_rooms()
    );

    let mut algorithm = AbcAlgorithm::for_problem(&problem, args.config())?;
    let result = algorithm.run();

    let penalties = ExamFitness::new(&problem).breakdown(&result.best_solution);
    println!("{}", SearchStatistics::new(&result, &problem, penalties).format());
    println!("Best timetable: {:?}", result.best_solution);

    if args.plot {
        println!();
        print_convergence_plot(&result);
    }

    if let Some(path) = &args.output {
        save_result_json(&result, &problem, Some(penalties), path)?;
        info!("Saved result to {}", path.display());
    }
    if let Some(path) = &args.assignments {
        save_assignments_csv(&result, &problem, path)?;
        info!("Saved timetable to {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
