//! Reading solutions off the reduced row-echelon form.

use std::fmt;

use log::debug;
use num::{One, Zero};
use rustc_hash::FxHashSet;

use crate::hyperplane::Hyperplane;
use crate::scalar::{is_near_zero, Rounded, Scalar, RENDER_DECIMAL_PLACES};
use crate::vector::Vector;
use crate::{LinsysError, Result};

use super::LinearSystem;

#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// Every variable is a pivot variable.
    Unique(Vector),
    /// At least one free variable and no contradiction.
    Infinite(Parametrization),
    /// Some row reduced to `0 = c` with `c` nonzero.
    NoSolution,
}

/// The solution set `basepoint + t_1 d_1 + ... + t_k d_k`, one direction per free variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Parametrization {
    basepoint: Vector,
    direction_vectors: Vec<Vector>,
}

impl Parametrization {
    pub fn new(basepoint: Vector, direction_vectors: Vec<Vector>) -> Result<Self> {
        for direction in direction_vectors.iter() {
            if direction.dimension() != basepoint.dimension() {
                return Err(LinsysError::DimensionMismatch {
                    expected: basepoint.dimension(),
                    found: direction.dimension(),
                });
            }
        }
        Ok(Self {
            basepoint,
            direction_vectors,
        })
    }

    pub fn basepoint(&self) -> &Vector {
        &self.basepoint
    }

    pub fn direction_vectors(&self) -> &[Vector] {
        &self.direction_vectors
    }

    pub fn dimension(&self) -> usize {
        self.basepoint.dimension()
    }

    /// Evaluates `basepoint + Σ parameters[j] * direction_vectors[j]`.
    pub fn point_at(&self, parameters: &[Scalar]) -> Result<Vector> {
        if parameters.len() != self.direction_vectors.len() {
            return Err(LinsysError::DimensionMismatch {
                expected: self.direction_vectors.len(),
                found: parameters.len(),
            });
        }
        self.direction_vectors
            .iter()
            .zip(parameters)
            .try_fold(self.basepoint.clone(), |point, (direction, t)| {
                point.plus(&direction.scalar_multiply(t))
            })
    }

    /// Built from a system already in RREF, given its pivot columns.
    fn from_rref(rref: &LinearSystem, pivot_indices: &[Option<usize>]) -> Result<Self> {
        let dimension = rref.dimension();
        let pivot_columns: FxHashSet<usize> = pivot_indices.iter().flatten().copied().collect();
        let free_variables: Vec<usize> = (0..dimension)
            .filter(|col| !pivot_columns.contains(col))
            .collect();

        let mut basepoint = vec![Scalar::zero(); dimension];
        for (row, col) in pivot_indices.iter().enumerate() {
            if let Some(col) = col {
                basepoint[*col] = rref[row].constant_term().clone();
            }
        }

        let direction_vectors = free_variables
            .iter()
            .map(|&free| {
                let mut direction = vec![Scalar::zero(); dimension];
                direction[free] = Scalar::one();
                for (row, col) in pivot_indices.iter().enumerate() {
                    if let Some(col) = col {
                        direction[*col] = -rref[row].normal_vector()[free].clone();
                    }
                }
                Vector::new(direction)
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(Vector::new(basepoint)?, direction_vectors)
    }
}

impl fmt::Display for Parametrization {
    /// One line per variable, e.g. `x_2 = 2 - t_1 + 0.500t_2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.dimension() {
            if i > 0 {
                writeln!(f)?;
            }
            let base = Rounded::new(&self.basepoint[i], RENDER_DECIMAL_PLACES);
            write!(f, "x_{} = {}", i + 1, base)?;
            for (j, direction) in self.direction_vectors.iter().enumerate() {
                let coefficient = Rounded::new(&direction[i], RENDER_DECIMAL_PLACES);
                if coefficient.is_zero() {
                    continue;
                }
                let sign = if coefficient.is_negative() { '-' } else { '+' };
                let magnitude = coefficient.abs();
                if magnitude.is_one() {
                    write!(f, " {} t_{}", sign, j + 1)?;
                } else {
                    write!(f, " {} {}t_{}", sign, magnitude, j + 1)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solution::Unique(point) => write!(f, "Unique solution: {}", point),
            Solution::Infinite(parametrization) => {
                write!(f, "Infinitely many solutions:\n{}", parametrization)
            }
            Solution::NoSolution => write!(f, "No solutions"),
        }
    }
}

fn is_contradiction(plane: &Hyperplane) -> bool {
    plane.has_zero_normal() && !is_near_zero(plane.constant_term())
}

impl LinearSystem {
    /// Reduces a copy of the system to RREF and classifies its solution set.
    pub fn solve(&self) -> Result<Solution> {
        let rref = self.compute_rref()?;
        let solution = rref.classify_rref()?;
        debug!(
            "Classified {} equations in {} variables: {}",
            self.len(),
            self.dimension(),
            match &solution {
                Solution::Unique(_) => "unique solution",
                Solution::Infinite(_) => "infinitely many solutions",
                Solution::NoSolution => "no solution",
            }
        );
        Ok(solution)
    }

    /// Classification of a system that is already in RREF.
    fn classify_rref(&self) -> Result<Solution> {
        if self.iter().any(is_contradiction) {
            return Ok(Solution::NoSolution);
        }

        let pivot_indices = self.indices_of_first_nonzero_terms_in_each_row()?;
        let pivot_count = pivot_indices
            .iter()
            .flatten()
            .collect::<FxHashSet<_>>()
            .len();

        if pivot_count == self.dimension() {
            let mut coordinates = vec![Scalar::zero(); self.dimension()];
            for (row, col) in pivot_indices.iter().enumerate() {
                if let Some(col) = col {
                    coordinates[*col] = self[row].constant_term().clone();
                }
            }
            return Ok(Solution::Unique(Vector::new(coordinates)?));
        }

        Ok(Solution::Infinite(Parametrization::from_rref(
            self,
            &pivot_indices,
        )?))
    }
}
