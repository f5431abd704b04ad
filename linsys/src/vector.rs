//! Fixed dimension vectors over exact [`Scalar`]s.
//!
//! Vectors are immutable, every operation returns a new [`Vector`].
//! Norms and angles are computed in `f64` and are therefore approximate;
//! everything else (sums, dot products, projections) is exact.

use std::fmt;
use std::ops::Index;

use itertools::Itertools;
use num::{One, Signed, Zero};

use crate::scalar::{
    integer, is_near_zero, near_zero_tolerance, parse_scalar, scalar_from_f64, scalar_to_f64,
    Scalar,
};
use crate::{LinsysError, Result, ZeroVectorOperation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vector {
    coordinates: Vec<Scalar>,
}

impl Vector {
    pub fn new(coordinates: Vec<Scalar>) -> Result<Self> {
        if coordinates.is_empty() {
            return Err(LinsysError::EmptyCoordinates);
        }
        Ok(Self { coordinates })
    }

    /// Reads each literal with [`parse_scalar`].
    pub fn parse<S: AsRef<str>>(literals: &[S]) -> Result<Self> {
        let coordinates = literals
            .iter()
            .map(|literal| parse_scalar(literal.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(coordinates)
    }

    pub fn from_integers(values: &[i64]) -> Result<Self> {
        Self::new(values.iter().copied().map(integer).collect())
    }

    pub fn zero(dimension: usize) -> Result<Self> {
        Self::new(vec![Scalar::zero(); dimension])
    }

    pub fn coordinates(&self) -> &[Scalar] {
        &self.coordinates
    }

    pub fn into_coordinates(self) -> Vec<Scalar> {
        self.coordinates
    }

    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    fn check_same_dimension(&self, other: &Vector) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(LinsysError::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Vector, f: impl Fn(&Scalar, &Scalar) -> Scalar) -> Result<Vector> {
        self.check_same_dimension(other)?;
        Ok(Vector {
            coordinates: self
                .coordinates
                .iter()
                .zip(other.coordinates.iter())
                .map(|(x, y)| f(x, y))
                .collect(),
        })
    }

    pub fn plus(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |x, y| x + y)
    }

    pub fn minus(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, |x, y| x - y)
    }

    pub fn scalar_multiply(&self, c: &Scalar) -> Vector {
        Vector {
            coordinates: self.coordinates.iter().map(|x| c * x).collect(),
        }
    }

    pub fn dot_product(&self, other: &Vector) -> Result<Scalar> {
        self.check_same_dimension(other)?;
        Ok(self
            .coordinates
            .iter()
            .zip(other.coordinates.iter())
            .map(|(x, y)| x * y)
            .fold(Scalar::zero(), |acc, term| acc + term))
    }

    /// Exact `|v|²`.
    pub fn magnitude_squared(&self) -> Scalar {
        self.coordinates
            .iter()
            .map(|x| x * x)
            .fold(Scalar::zero(), |acc, term| acc + term)
    }

    pub fn magnitude(&self) -> f64 {
        scalar_to_f64(&self.magnitude_squared()).sqrt()
    }

    /// True when the magnitude is below the near-zero tolerance.
    pub fn is_zero(&self) -> bool {
        let tolerance = near_zero_tolerance();
        self.magnitude_squared() < &tolerance * &tolerance
    }

    pub fn normalized(&self) -> Result<Vector> {
        if self.is_zero() {
            return Err(LinsysError::ZeroVector(ZeroVectorOperation::Normalize));
        }
        let inverse = scalar_from_f64(1.0 / self.magnitude())?;
        Ok(self.scalar_multiply(&inverse))
    }

    /// Only defined in three dimensions.
    pub fn cross_product(&self, other: &Vector) -> Result<Vector> {
        for v in [self, other] {
            if v.dimension() != 3 {
                return Err(LinsysError::DimensionMismatch {
                    expected: 3,
                    found: v.dimension(),
                });
            }
        }
        let [x1, y1, z1] = [&self[0], &self[1], &self[2]];
        let [x2, y2, z2] = [&other[0], &other[1], &other[2]];
        Vector::new(vec![
            y1 * z2 - y2 * z1,
            -(x1 * z2 - x2 * z1),
            x1 * y2 - x2 * y1,
        ])
    }

    pub fn area_parallelogram(&self, other: &Vector) -> Result<f64> {
        Ok(self.cross_product(other)?.magnitude())
    }

    pub fn area_triangle(&self, other: &Vector) -> Result<f64> {
        Ok(self.area_parallelogram(other)? / 2.0)
    }

    /// Angle in radians. The cosine is clamped into `[-1, 1]` before `acos`.
    pub fn angle(&self, other: &Vector) -> Result<f64> {
        let as_angle_error = |err| match err {
            LinsysError::ZeroVector(_) => LinsysError::ZeroVector(ZeroVectorOperation::Angle),
            err => err,
        };
        let u = self.normalized().map_err(as_angle_error)?;
        let v = other.normalized().map_err(as_angle_error)?;
        let cosine = scalar_to_f64(&u.dot_product(&v)?).clamp(-1.0, 1.0);
        Ok(cosine.acos())
    }

    pub fn angle_in_degrees(&self, other: &Vector) -> Result<f64> {
        Ok(self.angle(other)?.to_degrees())
    }

    pub fn is_orthogonal_to(&self, other: &Vector) -> Result<bool> {
        Ok(is_near_zero(&self.dot_product(other)?))
    }

    /// The zero vector is parallel to everything.
    /// Otherwise the vectors are parallel when `sin θ` is below the tolerance, decided exactly
    /// as `sin²θ = 1 - (u·v)² / (|u|²|v|²) < tolerance²`. So angles up to about `1e-10` rad
    /// (or that close to `π`) count as parallel.
    pub fn is_parallel_to(&self, other: &Vector) -> Result<bool> {
        self.check_same_dimension(other)?;
        if self.is_zero() || other.is_zero() {
            return Ok(true);
        }
        let dot = self.dot_product(other)?;
        let cos_squared = &dot * &dot / (self.magnitude_squared() * other.magnitude_squared());
        let sin_squared = Scalar::one() - cos_squared;
        let tolerance = near_zero_tolerance();
        Ok(sin_squared.abs() < &tolerance * &tolerance)
    }

    /// Projection onto `basis`.
    pub fn component_parallel_to(&self, basis: &Vector) -> Result<Vector> {
        self.check_same_dimension(basis)?;
        if basis.is_zero() {
            return Err(LinsysError::ZeroVector(
                ZeroVectorOperation::ParallelComponent,
            ));
        }
        let weight = self.dot_product(basis)? / basis.magnitude_squared();
        Ok(basis.scalar_multiply(&weight))
    }

    pub fn component_orthogonal_to(&self, basis: &Vector) -> Result<Vector> {
        let parallel = self.component_parallel_to(basis).map_err(|err| match err {
            LinsysError::ZeroVector(ZeroVectorOperation::ParallelComponent) => {
                LinsysError::ZeroVector(ZeroVectorOperation::OrthogonalComponent)
            }
            err => err,
        })?;
        self.minus(&parallel)
    }
}

impl Index<usize> for Vector {
    type Output = Scalar;

    fn index(&self, index: usize) -> &Self::Output {
        &self.coordinates[index]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector: ({})", self.coordinates.iter().format(", "))
    }
}
