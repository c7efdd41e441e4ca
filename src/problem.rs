//! Problem definition and data structures for exam timetabling.

use crate::error::{Error, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Enrollment assumed for every exam when no real enrollment data is given.
pub const DEFAULT_STUDENTS_PER_EXAM: u32 = 30;

/// Room holding `exam`: exams are dealt to rooms round-robin by index,
/// independent of the timeslot they are scheduled in.
pub fn room_for_exam(exam: usize, num_rooms: usize) -> usize {
    exam % num_rooms
}

/// One row of a classrooms table. Columns other than `capacity` are ignored.
#[derive(Debug, Deserialize)]
struct ClassroomRecord {
    capacity: u32,
}

/// One row of an enrollment table, aligned by row order with exam indices.
#[derive(Debug, Deserialize)]
struct EnrollmentRecord {
    students: u32,
}

/// Represents an exam timetabling instance.
///
/// Exams are identified by index. Each exam is bound to room
/// `exam % num_rooms`, independent of its timeslot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub name: String,
    pub num_exams: usize,
    pub num_timeslots: usize,
    pub room_capacities: Vec<u32>,
    pub exam_student_counts: Vec<u32>,
}

impl Problem {
    /// Create a new problem, checking that all counts and lengths agree.
    pub fn new(
        name: String,
        num_exams: usize,
        num_timeslots: usize,
        room_capacities: Vec<u32>,
        exam_student_counts: Vec<u32>,
    ) -> Result<Self> {
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
        if room_capacities.is_empty() {
            return Err(Error::InvalidProblem(
                "at least one room is required".to_string(),
            ));
        }
        if let Some(room) = room_capacities.iter().position(|&c| c == 0) {
            return Err(Error::InvalidProblem(format!(
                "room {} has zero capacity",
                room
            )));
        }
        if exam_student_counts.len() != num_exams {
            return Err(Error::EnrollmentMismatch {
                expected: num_exams,
                found: exam_student_counts.len(),
            });
        }

        Ok(Problem {
            name,
            num_exams,
            num_timeslots,
            room_capacities,
            exam_student_counts,
        })
    }

    /// Create a problem where every exam has the same enrollment.
    pub fn with_uniform_enrollment(
        name: String,
        num_exams: usize,
        num_timeslots: usize,
        room_capacities: Vec<u32>,
        students_per_exam: u32,
    ) -> Result<Self> {
        Self::new(
            name,
            num_exams,
            num_timeslots,
            room_capacities,
            vec![students_per_exam; num_exams],
        )
    }

    /// Get the number of rooms.
    pub fn num_rooms(&self) -> usize {
        self.room_capacities.len()
    }

    /// Get the room an exam is held in.
    pub fn room_for_exam(&self, exam: usize) -> usize {
        room_for_exam(exam, self.num_rooms())
    }

    /// Load a problem from a classrooms table and a timeslots table.
    ///
    /// The classrooms table needs a `capacity` column. Every row of the
    /// timeslots table is one timeslot; `num_exams` defaults to the same
    /// row count. The optional enrollment table needs a `students` column
    /// with one row per exam; without it every exam gets
    /// [`DEFAULT_STUDENTS_PER_EXAM`].
    pub fn from_csv<P: AsRef<Path>>(
        classrooms_path: P,
        timeslots_path: P,
        enrollments_path: Option<P>,
        num_exams: Option<usize>,
    ) -> Result<Self> {
        let room_capacities = read_room_capacities(&classrooms_path)?;
        let num_timeslots = count_rows(&timeslots_path)?;

        let exam_student_counts = match enrollments_path {
            Some(path) => Some(read_enrollments(path)?),
            None => None,
        };
        let num_exams = num_exams
            .or_else(|| exam_student_counts.as_ref().map(Vec::len))
            .unwrap_or(num_timeslots);
        let exam_student_counts =
            exam_student_counts.unwrap_or_else(|| vec![DEFAULT_STUDENTS_PER_EXAM; num_exams]);

        let name = timeslots_path
            .as_ref()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "timetable".to_string());

        Problem::new(
            name,
            num_exams,
            num_timeslots,
            room_capacities,
            exam_student_counts,
        )
    }
}

fn read_room_capacities<P: AsRef<Path>>(path: P) -> Result<Vec<u32>> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut capacities = Vec::new();
    for record in reader.deserialize() {
        let record: ClassroomRecord = record?;
        capacities.push(record.capacity);
    }
    Ok(capacities)
}

fn read_enrollments<P: AsRef<Path>>(path: P) -> Result<Vec<u32>> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let mut students = Vec::new();
    for record in reader.deserialize() {
        let record: EnrollmentRecord = record?;
        students.push(record.students);
    }
    Ok(students)
}

fn count_rows<P: AsRef<Path>>(path: P) -> Result<usize> {
    let mut reader = ReaderBuilder::new().from_path(path)?;
    let mut count = 0;
    for record in reader.records() {
        record?;
        count += 1;
    }
    Ok(count)
}
