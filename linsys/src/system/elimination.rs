//! Gaussian elimination down to triangular form and then to RREF.
//!
//! Both stages are driven purely by the elementary row operations on [`LinearSystem`],
//! so the solution set of the reduced system is that of the input.

use log::debug;
use num::{One, Zero};

use crate::scalar::{is_near_zero, Scalar};
use crate::Result;

use super::LinearSystem;

impl LinearSystem {
    /// Returns a triangular copy of the system.
    ///
    /// Rows are visited top to bottom with a single column cursor that never moves back.
    /// If row `i` has a (near) zero coefficient in the current column, the first row below with
    /// a nonzero coefficient there is swapped up. If there is none, the cursor advances and the
    /// same row is retried. Once a pivot is in place it is cleared from every row below.
    ///
    /// Afterwards pivot columns are strictly increasing down the rows that have one.
    pub fn compute_triangular_form(&self) -> Result<LinearSystem> {
        let mut system = self.clone();
        let num_equations = system.len();
        let num_variables = system.dimension();
        debug!(
            "Computing triangular form of {} equations in {} variables",
            num_equations, num_variables
        );

        let mut col = 0;
        'rows: for row in 0..num_equations {
            while col < num_variables {
                let coefficient = &system[row].normal_vector()[col];
                if is_near_zero(coefficient)
                    && !system.swap_with_row_below_for_nonzero_coefficient_if_able(row, col)?
                {
                    col += 1;
                    continue;
                }
                system.clear_coefficients_below(row, col)?;
                col += 1;
                continue 'rows;
            }
            // Every remaining row is zero to the right of the cursor
            break;
        }

        debug!("Triangular form reached");
        Ok(system)
    }

    fn swap_with_row_below_for_nonzero_coefficient_if_able(
        &mut self,
        row: usize,
        col: usize,
    ) -> Result<bool> {
        let below = (row + 1..self.len())
            .find(|&k| !is_near_zero(&self[k].normal_vector()[col]));
        match below {
            Some(k) => {
                self.swap_rows(row, k)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn clear_coefficients_below(&mut self, row: usize, col: usize) -> Result<()> {
        let beta = self[row].normal_vector()[col].clone();
        for k in row + 1..self.len() {
            let gamma = &self[k].normal_vector()[col];
            // Exact test: coefficients below the tolerance are still cleared, leaving true zeros
            if gamma.is_zero() {
                continue;
            }
            let alpha = -(gamma / &beta);
            self.add_multiple_times_row_to_row(&alpha, row, k)?;
        }
        Ok(())
    }

    /// Returns the reduced row-echelon form of the system.
    ///
    /// Starting from the triangular form, rows are walked bottom to top: each pivot is
    /// scaled to exactly one and then cleared from every row above it.
    pub fn compute_rref(&self) -> Result<LinearSystem> {
        let mut system = self.compute_triangular_form()?;
        let pivot_indices = system.indices_of_first_nonzero_terms_in_each_row()?;

        for row in (0..system.len()).rev() {
            let Some(col) = pivot_indices[row] else {
                continue;
            };
            system.scale_row_to_make_coefficient_equal_one(row, col)?;
            system.clear_coefficients_above(row, col)?;
        }

        debug!("Reduced row-echelon form reached");
        Ok(system)
    }

    fn scale_row_to_make_coefficient_equal_one(&mut self, row: usize, col: usize) -> Result<()> {
        let coefficient = &self[row].normal_vector()[col];
        if coefficient.is_one() {
            return Ok(());
        }
        let beta = Scalar::one() / coefficient;
        self.multiply_coefficient_and_row(&beta, row)
    }

    fn clear_coefficients_above(&mut self, row: usize, col: usize) -> Result<()> {
        for k in (0..row).rev() {
            let alpha = -self[k].normal_vector()[col].clone();
            if alpha.is_zero() {
                continue;
            }
            self.add_multiple_times_row_to_row(&alpha, row, k)?;
        }
        Ok(())
    }
}
