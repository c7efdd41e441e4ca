//! Benchmarks for the ABC timetabling search.

#[cfg(feature = "bench")]
extern crate criterion;

#[cfg(feature = "bench")]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use abc_timetable::config::Config;
use abc_timetable::fitness::{ExamFitness, FitnessEvaluator};
use abc_timetable::neighborhood::Neighborhood;
use abc_timetable::problem::Problem;
use abc_timetable::AbcAlgorithm;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Create a benchmark problem with `size` exams.
fn create_benchmark_problem(size: usize) -> Problem {
    let num_rooms = (size / 10).max(2);
    let capacities = (0..num_rooms).map(|room| 30 + 10 * (room % 4) as u32).collect();
    let students = (0..size).map(|exam| 15 + (exam * 17 % 40) as u32).collect();

    Problem::new(
        format!("BenchProblem_{}", size),
        size,
        (size / 4).max(2),
        capacities,
        students,
    )
    .unwrap()
}

#[cfg(feature = "bench")]
fn benchmark_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitness");

    for size in [50, 200, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let fitness = ExamFitness::new(&problem);
            let neighborhood = Neighborhood::new(problem.num_exams, problem.num_timeslots);
            let solution = neighborhood.random_solution(&mut ChaCha8Rng::seed_from_u64(0));

            b.iter(|| fitness.evaluate(&solution));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");

    for size in [50, 200].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let config = Config::new().with_num_bees(30).with_seed(1);

            let mut algorithm = AbcAlgorithm::for_problem(&problem, config).unwrap();
            algorithm.initialize();

            b.iter(|| algorithm.step());
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_convergence(c: &mut Criterion) {
    let mut group = c.benchmark_group("convergence");
    group.sample_size(10);

    for size in [50, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let config = Config::new()
                .with_num_bees(30)
                .with_limit(20)
                .with_max_iter(200)
                .with_seed(2);

            b.iter(|| {
                let mut algorithm = AbcAlgorithm::for_problem(&problem, config.clone()).unwrap();
                algorithm.run()
            });
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
criterion_group!(
    benches,
    benchmark_fitness,
    benchmark_generation,
    benchmark_convergence
);

#[cfg(feature = "bench")]
criterion_main!(benches);
