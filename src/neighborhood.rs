//! Solution generation and the single-gene neighborhood operator.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Generates random timetables and their one-move neighbors.
#[derive(Debug, Clone)]
pub struct Neighborhood {
    exam_dist: Uniform<usize>,
    timeslot_dist: Uniform<usize>,
    num_exams: usize,
}

impl Neighborhood {
    /// Create a neighborhood for `num_exams` exams over `num_timeslots` slots.
    ///
    /// Both counts must be at least 1.
    pub fn new(num_exams: usize, num_timeslots: usize) -> Self {
        Neighborhood {
            exam_dist: Uniform::new(0, num_exams),
            timeslot_dist: Uniform::new(0, num_timeslots),
            num_exams,
        }
    }

    /// Draw every exam's timeslot independently and uniformly.
    pub fn random_solution<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        (0..self.num_exams)
            .map(|_| self.timeslot_dist.sample(rng))
            .collect()
    }

    /// Copy the solution and move one random exam to a random timeslot.
    ///
    /// The new timeslot may equal the old one.
    pub fn neighbor<R: Rng + ?Sized>(&self, solution: &[usize], rng: &mut R) -> Vec<usize> {
        let mut neighbor = solution.to_vec();
        let exam = self.exam_dist.sample(rng);
        neighbor[exam] = self.timeslot_dist.sample(rng);
        neighbor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_solution_is_in_range() {
        let neighborhood = Neighborhood::new(50, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let solution = neighborhood.random_solution(&mut rng);
        assert_eq!(solution.len(), 50);
        assert!(solution.iter().all(|&t| t < 4));
    }

    #[test]
    fn test_neighbor_changes_at_most_one_gene() {
        let neighborhood = Neighborhood::new(20, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let solution = neighborhood.random_solution(&mut rng);

        for _ in 0..100 {
            let neighbor = neighborhood.neighbor(&solution, &mut rng);
            let changed = solution
                .iter()
                .zip(&neighbor)
                .filter(|(a, b)| a != b)
                .count();
            assert!(changed <= 1);
            assert!(neighbor.iter().all(|&t| t < 5));
        }
    }

    #[test]
    fn test_single_timeslot_neighbor_is_identical() {
        let neighborhood = Neighborhood::new(3, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let neighbor = neighborhood.neighbor(&[0, 0, 0], &mut rng);
        assert_eq!(neighbor, vec![0, 0, 0]);
    }
}
