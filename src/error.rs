//! Error types for problem construction, configuration and I/O.

use std::fmt;
use std::io;

/// Errors raised while building a problem, validating a configuration or
/// reading and writing data files.
///
/// The search itself never fails; only its inputs and outputs can.
#[derive(Debug)]
pub enum Error {
    /// A run-time parameter is out of range.
    InvalidConfig(String),
    /// The problem instance is malformed (zero counts, empty room list, ...).
    InvalidProblem(String),
    /// The enrollment table does not have one entry per exam.
    EnrollmentMismatch { expected: usize, found: usize },
    Io(io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidProblem(msg) => write!(f, "Invalid problem: {}", msg),
            Error::EnrollmentMismatch { expected, found } => write!(
                f,
                "Enrollment table has {} entries but the problem has {} exams",
                found, expected
            ),
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Csv(err) => write!(f, "CSV error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
