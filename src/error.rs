use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]

/**
 * Error to represent an invalid thermodynamic state, or a mesh operation
 * that cannot produce a meaningful grid.
 */
pub enum Error {
    Domain(f64),
    DivisionByZero(&'static str),
    ShapeMismatch { expected: usize, found: usize },
    TooFewPoints(usize),
    NonPositiveLength(f64),
    NonFiniteValue(f64),
    InvalidGrid(String),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use Error::*;

        match self {
            Domain(x) => write!(fmt, "value outside the physical domain: {}", x),
            DivisionByZero(what) => write!(fmt, "division by zero {}", what),
            ShapeMismatch { expected, found } => {
                write!(fmt, "field has {} points, but the grid has {}", found, expected)
            }
            TooFewPoints(n) => write!(fmt, "a mesh needs at least 2 points, got {}", n),
            NonPositiveLength(l) => write!(fmt, "driver length must be positive: {}", l),
            NonFiniteValue(x) => write!(fmt, "non-finite field value: {}", x),
            InvalidGrid(reason) => write!(fmt, "invalid grid: {}", reason),
        }
    }
}

impl error::Error for Error {}
