//! Exact linear algebra for small systems of equations.
//!
//! * [`vector`] - fixed dimension vectors over exact rationals.
//! * [`hyperplane`] - a single equation `n·x = c`, i.e. a line in 2D or a plane in 3D.
//! * [`system`] - an ordered collection of hyperplanes, reduced to RREF by Gaussian elimination.
//!
//! All coefficients are stored as [`Scalar`](scalar::Scalar)s so elimination never rounds.
//! Zero tests still use a fixed tolerance (see [`scalar::is_near_zero`]) because norms and
//! angles pass through `f64`.

use std::error::Error;
use std::fmt;

pub mod hyperplane;
pub mod scalar;
pub mod system;
pub mod vector;

pub use hyperplane::{Hyperplane, Intersection};
pub use scalar::Scalar;
pub use system::{LinearSystem, Parametrization, Solution};
pub use vector::Vector;

/// The operation that was attempted on a zero vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroVectorOperation {
    Normalize,
    Angle,
    ParallelComponent,
    OrthogonalComponent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinsysError {
    /// A vector must have at least one coordinate.
    EmptyCoordinates,
    /// A literal could not be read as an exact scalar.
    InvalidScalar(String),
    DimensionMismatch {
        expected: usize,
        found: usize,
    },
    /// Every coefficient is within tolerance of zero.
    /// Callers that have a fallback (basepoints, rendering) should match on this variant.
    NoNonzeroElements,
    ZeroVector(ZeroVectorOperation),
    /// Pairwise intersection is only defined for lines and planes.
    UnsupportedDimension(usize),
    /// A linear system needs at least one hyperplane to fix its dimension.
    EmptySystem,
    RowOutOfBounds {
        row: usize,
        len: usize,
    },
    /// Scaling a row by zero would discard the equation.
    ZeroCoefficient,
}

impl fmt::Display for LinsysError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinsysError::EmptyCoordinates => write!(f, "The coordinates must be nonempty"),
            LinsysError::InvalidScalar(literal) => {
                write!(f, "Could not parse {:?} as a decimal or fraction", literal)
            }
            LinsysError::DimensionMismatch { expected, found } => write!(
                f,
                "Dimension mismatch: expected {} but found {}",
                expected, found
            ),
            LinsysError::NoNonzeroElements => write!(f, "No nonzero elements found"),
            LinsysError::ZeroVector(op) => match op {
                ZeroVectorOperation::Normalize => write!(f, "Cannot normalize the zero vector"),
                ZeroVectorOperation::Angle => write!(f, "Cannot compute an angle with the zero vector"),
                ZeroVectorOperation::ParallelComponent => {
                    write!(f, "No unique parallel component relative to the zero vector")
                }
                ZeroVectorOperation::OrthogonalComponent => {
                    write!(f, "No unique orthogonal component relative to the zero vector")
                }
            },
            LinsysError::UnsupportedDimension(dim) => {
                write!(f, "Intersection is not supported in dimension {}", dim)
            }
            LinsysError::EmptySystem => write!(f, "A linear system needs at least one equation"),
            LinsysError::RowOutOfBounds { row, len } => {
                write!(f, "Row {} is out of bounds for a system of {} rows", row, len)
            }
            LinsysError::ZeroCoefficient => write!(f, "Cannot multiply a row by zero"),
        }
    }
}

impl Error for LinsysError {}

pub type Result<T> = std::result::Result<T, LinsysError>;
