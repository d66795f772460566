/////////////////////////////////////////////////////////////////////////////////////////////
//
// Adds dense Gaussian elimination with partial pivoting and back-substitution for augmented systems.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # linalg
//!
//! Direct solver for the small augmented systems built in
//! [`crate::linear_system`]. Both stages check every pivot against a
//! tolerance and fail with [`EliminationError::ZeroPivot`] instead of
//! dividing by (near) zero.
use faer::Mat;
use std::{error::Error, fmt};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EliminationError {
    /// Best available pivot for `row` was not greater than the tolerance (or was NaN).
    ZeroPivot { row: usize, value: f64 },
}

impl fmt::Display for EliminationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EliminationError::ZeroPivot { row, value } => {
                write!(f, "zero pivot {:e} at row {}", value, row)
            }
        }
    }
}

impl Error for EliminationError {}

#[inline(always)]
fn check_pivot(row: usize, value: f64, tolerance: f64) -> Result<(), EliminationError> {
    // written so that a NaN pivot also fails
    match value.abs() > tolerance {
        true => Ok(()),
        false => Err(EliminationError::ZeroPivot { row, value }),
    }
}

/// Reduces an `N x (N + 1)` augmented matrix to row echelon form in place.
///
/// For each pivot column `i`, the row in `i..N` with the largest magnitude in
/// column `i` is swapped into row `i` (ties go to the earliest row), then
/// `factor * row_i` is subtracted from every row below it across columns
/// `i..=N`.
///
/// `tolerance` is absolute. On error the matrix is left partially reduced.
pub fn gaussian_elimination(matrix: &mut Mat<f64>, tolerance: f64) -> Result<(), EliminationError> {
    let rows = matrix.nrows();
    let cols = matrix.ncols();
    debug_assert_eq!(cols, rows + 1, "expected an augmented N x (N + 1) matrix");

    for i in 0..rows {
        // Find pivot row
        let mut pivot_row = i;
        for j in (i + 1)..rows {
            if matrix[(j, i)].abs() > matrix[(pivot_row, i)].abs() {
                pivot_row = j;
            }
        }

        check_pivot(i, matrix[(pivot_row, i)], tolerance)?;

        if pivot_row != i {
            for k in i..cols {
                let tmp = matrix[(i, k)];
                matrix[(i, k)] = matrix[(pivot_row, k)];
                matrix[(pivot_row, k)] = tmp;
            }
        }

        // Eliminate coefficients below pivot
        let pivot = matrix[(i, i)];
        for j in (i + 1)..rows {
            let factor = matrix[(j, i)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in i..cols {
                let delta = factor * matrix[(i, k)];
                matrix[(j, k)] -= delta;
            }
        }
    }

    Ok(())
}

/// Solves an upper triangular augmented matrix produced by
/// [`gaussian_elimination`], returning the weight vector.
///
/// `lambda_i = (M[i][N] - sum_{k > i} M[i][k] * lambda_k) / M[i][i]`, from the
/// last row upwards.
pub fn back_substitution(matrix: &Mat<f64>, tolerance: f64) -> Result<Vec<f64>, EliminationError> {
    let rows = matrix.nrows();
    let last = matrix.ncols() - 1;

    let mut lambdas = vec![0.0; rows];

    for i in (0..rows).rev() {
        let mut sum = matrix[(i, last)];
        for k in (i + 1)..rows {
            sum -= matrix[(i, k)] * lambdas[k];
        }

        let diag = matrix[(i, i)];
        check_pivot(i, diag, tolerance)?;
        lambdas[i] = sum / diag;
    }

    Ok(lambdas)
}

/// Convenience wrapper: eliminates in place and back-substitutes.
pub fn solve_augmented_in_place(
    matrix: &mut Mat<f64>,
    tolerance: f64,
) -> Result<Vec<f64>, EliminationError> {
    gaussian_elimination(matrix, tolerance)?;
    back_substitution(matrix, tolerance)
}
