//! Utility functions and structures for reporting search results.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use csv::WriterBuilder;
use itertools::Itertools;
use serde::Serialize;

use crate::error::Result;
use crate::fitness::PenaltyBreakdown;
use crate::problem::Problem;
use crate::solution::RunResult;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

#[derive(Serialize)]
struct ResultReport<'a> {
    instance: &'a str,
    num_exams: usize,
    num_timeslots: usize,
    num_rooms: usize,
    penalties: Option<PenaltyBreakdown>,
    #[serde(flatten)]
    result: &'a RunResult,
    best_so_far: Vec<f64>,
}

/// Save a run result, with its instance summary, as pretty-printed JSON.
pub fn save_result_json<P: AsRef<Path>>(
    result: &RunResult,
    problem: &Problem,
    penalties: Option<PenaltyBreakdown>,
    path: P,
) -> Result<()> {
    let report = ResultReport {
        instance: &problem.name,
        num_exams: problem.num_exams,
        num_timeslots: problem.num_timeslots,
        num_rooms: problem.num_rooms(),
        penalties,
        result,
        best_so_far: result.best_so_far_curve(),
    };

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

/// Save the best timetable as CSV with `exam,timeslot,room` columns.
pub fn save_assignments_csv<P: AsRef<Path>>(
    result: &RunResult,
    problem: &Problem,
    path: P,
) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    for assignment in result.assignments(problem.num_rooms()) {
        writer.serialize(assignment)?;
    }
    writer.flush()?;
    Ok(())
}

/// Summary statistics of a finished search.
pub struct SearchStatistics {
    pub generations: usize,
    pub runtime: Duration,
    pub best_fitness: f64,
    pub penalties: PenaltyBreakdown,
    pub initial_population_best: Option<f64>,
    pub timeslot_loads: Vec<usize>,
}

impl SearchStatistics {
    /// Collect statistics for a result on a given problem.
    pub fn new(result: &RunResult, problem: &Problem, penalties: PenaltyBreakdown) -> Self {
        let timeslot_loads = result
            .exams_by_timeslot(problem.num_timeslots)
            .iter()
            .map(Vec::len)
            .collect();

        SearchStatistics {
            generations: result.generations,
            runtime: result.run_time,
            best_fitness: result.best_fitness,
            penalties,
            initial_population_best: result.fitness_history.first().copied(),
            timeslot_loads,
        }
    }

    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        let first_generation = self
            .initial_population_best
            .map(|f| format!("{:.2}", f))
            .unwrap_or_else(|| "-".to_string());

        format!(
            "Search Statistics:
- Generations: {}
- Runtime: {}
- Best Fitness: {:.2}
- First Generation Best: {}
- Hard Penalty: {:.2} (over-allocation {:.2}, capacity {:.2})
- Soft Penalty: {:.2} (imbalance {:.2}, underutilization {:.2})
- Exams per Timeslot: [{}]",
            self.generations,
            format_duration(self.runtime),
            self.best_fitness,
            first_generation,
            self.penalties.hard(),
            self.penalties.over_allocation,
            self.penalties.capacity,
            self.penalties.soft(),
            self.penalties.imbalance,
            self.penalties.underutilization,
            self.timeslot_loads.iter().join(", ")
        )
    }
}

/// Render a convergence curve as a character grid.
pub fn render_convergence_plot(history: &[f64], width: usize, height: usize) -> Vec<String> {
    if history.is_empty() || width == 0 || height == 0 {
        return Vec::new();
    }

    let (min, max) = history
        .iter()
        .copied()
        .minmax_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .into_option()
        .unwrap_or((0.0, 0.0));
    let span = if max > min { max - min } else { 1.0 };

    let mut grid = vec![vec![' '; width]; height];

    for column in 0..width {
        // Sample the generation that falls in this column
        let index = column * history.len() / width;
        let value = history[index.min(history.len() - 1)];
        let row = ((max - value) / span * (height as f64 - 1.0)).round() as usize;
        grid[row.min(height - 1)][column] = '*';
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// Print the convergence curve of a run to the console.
pub fn print_convergence_plot(result: &RunResult) {
    let history = &result.fitness_history;
    if history.is_empty() {
        println!("No generations recorded.");
        return;
    }

    let max = history.iter().copied().fold(f64::MIN, f64::max);
    let min = history.iter().copied().fold(f64::MAX, f64::min);

    println!("ABC Convergence Curve ({} generations)", history.len());
    println!("{:>10.2} |", max);
    for line in render_convergence_plot(history, 60, 15) {
        println!("{:>10} |{}", "", line);
    }
    println!("{:>10.2} +{}", min, "-".repeat(60));
    println!();
}
