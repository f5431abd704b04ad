//! A single linear equation `n·x = c`.
//!
//! In two dimensions a [`Hyperplane`] is a line, in three a plane.
//! The dimension is carried at runtime by the normal vector so that a
//! [`LinearSystem`](crate::system::LinearSystem) can check it when rows are inserted.

use std::fmt;

use num::Zero;

use crate::scalar::{is_near_zero, Rounded, Scalar, RENDER_DECIMAL_PLACES};
use crate::vector::Vector;
use crate::{LinsysError, Result};

#[derive(Debug, Clone)]
pub struct Hyperplane {
    normal_vector: Vector,
    constant_term: Scalar,
}

/// Result of intersecting two hyperplanes of the same dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum Intersection {
    /// Two lines crossing at a single point.
    Point(Vector),
    /// Two planes crossing along a line `basepoint + t * direction`.
    Line { basepoint: Vector, direction: Vector },
    /// Both equations describe the same hyperplane.
    Coincident(Hyperplane),
    /// Parallel and distinct.
    Empty,
}

impl Hyperplane {
    /// Missing arguments default to the zero normal vector and a zero constant.
    pub fn new(
        dimension: usize,
        normal_vector: Option<Vector>,
        constant_term: Option<Scalar>,
    ) -> Result<Self> {
        let normal_vector = match normal_vector {
            Some(normal_vector) => normal_vector,
            None => Vector::zero(dimension)?,
        };
        if normal_vector.dimension() != dimension {
            return Err(LinsysError::DimensionMismatch {
                expected: dimension,
                found: normal_vector.dimension(),
            });
        }
        Ok(Self {
            normal_vector,
            constant_term: constant_term.unwrap_or_else(Scalar::zero),
        })
    }

    pub fn line(normal_vector: Option<Vector>, constant_term: Option<Scalar>) -> Result<Self> {
        Self::new(2, normal_vector, constant_term)
    }

    pub fn plane(normal_vector: Option<Vector>, constant_term: Option<Scalar>) -> Result<Self> {
        Self::new(3, normal_vector, constant_term)
    }

    pub fn dimension(&self) -> usize {
        self.normal_vector.dimension()
    }

    pub fn normal_vector(&self) -> &Vector {
        &self.normal_vector
    }

    pub fn constant_term(&self) -> &Scalar {
        &self.constant_term
    }

    /// Index of the first coefficient that is not near zero.
    pub fn first_nonzero_index(vector: &Vector) -> Result<usize> {
        vector
            .coordinates()
            .iter()
            .position(|coefficient| !is_near_zero(coefficient))
            .ok_or(LinsysError::NoNonzeroElements)
    }

    /// Whether every coefficient is near zero, i.e. the equation reads `0 = c`.
    /// Exactly the hyperplanes whose [`basepoint`](Self::basepoint) is `None`.
    pub fn has_zero_normal(&self) -> bool {
        self.normal_vector.coordinates().iter().all(is_near_zero)
    }

    /// A point on the hyperplane, zero everywhere except at the first nonzero coefficient.
    /// `None` when the normal vector is (near) zero.
    pub fn basepoint(&self) -> Result<Option<Vector>> {
        let index = match Self::first_nonzero_index(&self.normal_vector) {
            Ok(index) => index,
            Err(LinsysError::NoNonzeroElements) => return Ok(None),
            Err(err) => return Err(err),
        };
        let mut coordinates = vec![Scalar::zero(); self.dimension()];
        coordinates[index] = &self.constant_term / &self.normal_vector[index];
        Ok(Some(Vector::new(coordinates)?))
    }

    /// Multiplies both sides of the equation by `c`.
    pub fn scaled(&self, c: &Scalar) -> Hyperplane {
        Hyperplane {
            normal_vector: self.normal_vector.scalar_multiply(c),
            constant_term: c * &self.constant_term,
        }
    }

    /// `self + c * other`, coefficient and constant wise.
    pub fn plus_multiple_of(&self, c: &Scalar, other: &Hyperplane) -> Result<Hyperplane> {
        let other = other.scaled(c);
        Ok(Hyperplane {
            normal_vector: self.normal_vector.plus(&other.normal_vector)?,
            constant_term: &self.constant_term + other.constant_term,
        })
    }

    pub fn is_parallel(&self, other: &Hyperplane) -> Result<bool> {
        self.normal_vector.is_parallel_to(&other.normal_vector)
    }

    /// Whether both equations describe the same set of points.
    pub fn is_same_as(&self, other: &Hyperplane) -> Result<bool> {
        match (self.has_zero_normal(), other.has_zero_normal()) {
            (true, true) => return Ok(is_near_zero(&(&self.constant_term - &other.constant_term))),
            (true, false) | (false, true) => return Ok(false),
            (false, false) => {}
        }

        if !self.is_parallel(other)? {
            return Ok(false);
        }

        let (Some(x0), Some(y0)) = (self.basepoint()?, other.basepoint()?) else {
            return Ok(false);
        };
        x0.minus(&y0)?.is_orthogonal_to(&self.normal_vector)
    }

    /// Lines meet in a point (Cramer's rule), planes meet in a line.
    /// Parallel hyperplanes are either [`Intersection::Coincident`] or [`Intersection::Empty`].
    pub fn intersection(&self, other: &Hyperplane) -> Result<Intersection> {
        if self.dimension() != other.dimension() {
            return Err(LinsysError::DimensionMismatch {
                expected: self.dimension(),
                found: other.dimension(),
            });
        }
        let meet = match self.dimension() {
            2 => self.intersect_lines(other)?,
            3 => self.intersect_planes(other)?,
            dimension => return Err(LinsysError::UnsupportedDimension(dimension)),
        };
        match meet {
            Some(intersection) => Ok(intersection),
            None if self.is_same_as(other)? => Ok(Intersection::Coincident(self.clone())),
            None => Ok(Intersection::Empty),
        }
    }

    fn intersect_lines(&self, other: &Hyperplane) -> Result<Option<Intersection>> {
        let (a, b) = (&self.normal_vector[0], &self.normal_vector[1]);
        let (c, d) = (&other.normal_vector[0], &other.normal_vector[1]);
        let (k1, k2) = (&self.constant_term, &other.constant_term);

        let determinant = a * d - b * c;
        if is_near_zero(&determinant) {
            return Ok(None);
        }
        let x = (d * k1 - b * k2) / &determinant;
        let y = (a * k2 - c * k1) / &determinant;
        Ok(Some(Intersection::Point(Vector::new(vec![x, y])?)))
    }

    fn intersect_planes(&self, other: &Hyperplane) -> Result<Option<Intersection>> {
        if self.is_parallel(other)? {
            return Ok(None);
        }
        let (n1, n2) = (&self.normal_vector, &other.normal_vector);
        let (c1, c2) = (&self.constant_term, &other.constant_term);

        let direction = n1.cross_product(n2)?;
        let denominator = direction.magnitude_squared();
        let n1n1 = n1.magnitude_squared();
        let n2n2 = n2.magnitude_squared();
        let n1n2 = n1.dot_product(n2)?;

        // Closest point to the origin lies in span(n1, n2)
        let weight1 = (c1 * &n2n2 - c2 * &n1n2) / &denominator;
        let weight2 = (c2 * &n1n1 - c1 * &n1n2) / &denominator;
        let basepoint = n1
            .scalar_multiply(&weight1)
            .plus(&n2.scalar_multiply(&weight2))?;

        Ok(Some(Intersection::Line {
            basepoint,
            direction,
        }))
    }
}

impl PartialEq for Hyperplane {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_as(other).unwrap_or(false)
    }
}

fn write_coefficient(coefficient: &Rounded, is_initial_term: bool) -> String {
    let mut output = String::new();
    if coefficient.is_negative() {
        output.push('-');
    }
    if coefficient.is_positive() && !is_initial_term {
        output.push('+');
    }
    if !is_initial_term {
        output.push(' ');
    }
    let magnitude = coefficient.abs();
    if !magnitude.is_one() {
        output.push_str(&magnitude.to_string());
    }
    output
}

impl fmt::Display for Hyperplane {
    /// Renders e.g. `x_1 - 2.500x_2 + x_3 = 4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lhs = match Self::first_nonzero_index(&self.normal_vector) {
            Ok(initial_index) => self
                .normal_vector
                .coordinates()
                .iter()
                .map(|coefficient| Rounded::new(coefficient, RENDER_DECIMAL_PLACES))
                .enumerate()
                .filter(|(_, coefficient)| !coefficient.is_zero())
                .map(|(i, coefficient)| {
                    format!(
                        "{}x_{}",
                        write_coefficient(&coefficient, i == initial_index),
                        i + 1
                    )
                })
                .collect::<Vec<_>>()
                .join(" "),
            Err(LinsysError::NoNonzeroElements) => "0".to_string(),
            Err(_) => return Err(fmt::Error),
        };
        let constant = Rounded::new(&self.constant_term, RENDER_DECIMAL_PLACES);
        write!(f, "{} = {}", lhs, constant)
    }
}
