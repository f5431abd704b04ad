//! Systems of hyperplanes and Gaussian elimination.
//!
//! A [`LinearSystem`] is an ordered list of equations sharing one dimension.
//! The row order matters: the three elementary row operations
//! ([`swap_rows`](LinearSystem::swap_rows),
//! [`multiply_coefficient_and_row`](LinearSystem::multiply_coefficient_and_row) and
//! [`add_multiple_times_row_to_row`](LinearSystem::add_multiple_times_row_to_row))
//! mutate rows in place and are the only mutators used by elimination.
//!
//! Elimination never touches the caller's system.
//! [`compute_triangular_form`](LinearSystem::compute_triangular_form),
//! [`compute_rref`](LinearSystem::compute_rref) and [`solve`](LinearSystem::solve)
//! all work on a clone.

use std::fmt;
use std::ops::Index;

use log::trace;
use num::Zero;

use crate::hyperplane::Hyperplane;
use crate::scalar::Scalar;
use crate::{LinsysError, Result};

pub mod elimination;
pub mod solution;
#[cfg(test)]
mod tests;

pub use solution::{Parametrization, Solution};

#[derive(Debug, Clone)]
pub struct LinearSystem {
    planes: Vec<Hyperplane>,
    dimension: usize,
}

impl LinearSystem {
    /// Fails if the hyperplanes do not all share the dimension of the first one.
    pub fn new(planes: Vec<Hyperplane>) -> Result<Self> {
        let dimension = planes.first().ok_or(LinsysError::EmptySystem)?.dimension();
        if let Some(odd_one_out) = planes.iter().find(|p| p.dimension() != dimension) {
            return Err(LinsysError::DimensionMismatch {
                expected: dimension,
                found: odd_one_out.dimension(),
            });
        }
        Ok(Self { planes, dimension })
    }

    /// Number of equations.
    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Number of variables.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hyperplane> {
        self.planes.iter()
    }

    pub fn planes(&self) -> &[Hyperplane] {
        &self.planes
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.len() {
            return Err(LinsysError::RowOutOfBounds {
                row,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Replaces a row, keeping every row in the system's dimension.
    pub fn set_row(&mut self, row: usize, plane: Hyperplane) -> Result<()> {
        self.check_row(row)?;
        if plane.dimension() != self.dimension {
            return Err(LinsysError::DimensionMismatch {
                expected: self.dimension,
                found: plane.dimension(),
            });
        }
        self.planes[row] = plane;
        Ok(())
    }

    pub fn swap_rows(&mut self, row1: usize, row2: usize) -> Result<()> {
        self.check_row(row1)?;
        self.check_row(row2)?;
        trace!("R{} <-> R{}", row1, row2);
        self.planes.swap(row1, row2);
        Ok(())
    }

    /// `R_row <- coefficient * R_row`. The coefficient must be nonzero.
    pub fn multiply_coefficient_and_row(&mut self, coefficient: &Scalar, row: usize) -> Result<()> {
        self.check_row(row)?;
        if coefficient.is_zero() {
            return Err(LinsysError::ZeroCoefficient);
        }
        trace!("R{} <- ({}) R{}", row, coefficient, row);
        self.planes[row] = self.planes[row].scaled(coefficient);
        Ok(())
    }

    /// `R_to <- R_to + coefficient * R_from`.
    pub fn add_multiple_times_row_to_row(
        &mut self,
        coefficient: &Scalar,
        row_to_add: usize,
        row_to_be_added_to: usize,
    ) -> Result<()> {
        self.check_row(row_to_add)?;
        self.check_row(row_to_be_added_to)?;
        trace!(
            "R{} <- R{} + ({}) R{}",
            row_to_be_added_to,
            row_to_be_added_to,
            coefficient,
            row_to_add
        );
        self.planes[row_to_be_added_to] = self.planes[row_to_be_added_to]
            .plus_multiple_of(coefficient, &self.planes[row_to_add])?;
        Ok(())
    }

    /// The pivot column of every row, `None` for rows whose normal vector is (near) zero.
    pub fn indices_of_first_nonzero_terms_in_each_row(&self) -> Result<Vec<Option<usize>>> {
        self.planes
            .iter()
            .map(
                |p| match Hyperplane::first_nonzero_index(p.normal_vector()) {
                    Ok(index) => Ok(Some(index)),
                    Err(LinsysError::NoNonzeroElements) => Ok(None),
                    Err(err) => Err(err),
                },
            )
            .collect()
    }
}

impl Index<usize> for LinearSystem {
    type Output = Hyperplane;

    fn index(&self, row: usize) -> &Self::Output {
        &self.planes[row]
    }
}

impl<'a> IntoIterator for &'a LinearSystem {
    type Item = &'a Hyperplane;
    type IntoIter = std::slice::Iter<'a, Hyperplane>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for LinearSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Linear System:")?;
        for (i, p) in self.planes.iter().enumerate() {
            write!(f, "\nEquation {}: {}", i + 1, p)?;
        }
        Ok(())
    }
}
