//! Error type shared by plot construction and projection.

use std::error::Error;
use std::fmt;

use crate::artist::Axis;

/// Failures raised by draw entry points and transform builders.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotError {
    /// An argument failed validation (zero stride, length mismatch, ...).
    InvalidArgument(String),
    /// Grids passed to one call do not share a shape.
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// An axis range has zero extent and cannot be normalized.
    DegenerateRange(Axis),
    /// The projection matrix is not invertible.
    SingularTransform,
    /// Grid data file could not be parsed.
    GridParse(String),
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use PlotError::*;
        match self {
            InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            ShapeMismatch { expected, found } => write!(
                f,
                "grid shape mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            DegenerateRange(axis) => {
                write!(f, "{} range has zero extent", axis.name())
            }
            SingularTransform => write!(f, "transform matrix is singular"),
            GridParse(msg) => write!(f, "grid parse error: {}", msg),
        }
    }
}

impl Error for PlotError {}
