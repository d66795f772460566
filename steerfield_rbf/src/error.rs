/////////////////////////////////////////////////////////////////////////////////////////////
//
// Declares the error types reported by configuration, solving, and evaluation of vector fields.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Error types for the vector field pipeline.
//!
//! Every failure here is local and recoverable: the interpolator and engine
//! keep their last valid state when one of these is returned.
use crate::linalg::EliminationError;
use crate::linear_system::Axis;
use std::{error::Error, fmt};

/// The three counted axes of a [`crate::SampleGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    Columns,
    Rows,
    Layers,
}

impl fmt::Display for GridAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GridAxis::Columns => "columns",
            GridAxis::Rows => "rows",
            GridAxis::Layers => "layers",
        };
        f.write_str(name)
    }
}

/// Input that cannot produce a field, detected before any matrix is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigurationError {
    /// No source samples were supplied, so there is nothing to interpolate.
    NoSourceSamples,

    /// A grid axis was configured with zero points.
    EmptyGridAxis { axis: GridAxis },

    /// The source sample at `index` has a NaN or infinite component.
    NonFiniteSample { index: usize },

    /// A grid corner has a NaN or infinite component.
    NonFiniteGridCorner,

    /// Grid spacing must be finite and strictly positive.
    InvalidGridSpacing { spacing: f64 },

    /// The Gaussian shape parameter must be finite and strictly positive.
    InvalidShapeParameter { beta: f64 },

    /// The relative pivot tolerance must be finite and not negative.
    InvalidPivotTolerance { tolerance: f64 },

    /// `columns * rows * layers` does not fit in a `usize`.
    GridTooLarge {
        columns: usize,
        rows: usize,
        layers: usize,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::NoSourceSamples => {
                write!(f, "no source samples supplied; the field is undefined")
            }
            ConfigurationError::EmptyGridAxis { axis } => {
                write!(f, "grid must have at least one point along {}", axis)
            }
            ConfigurationError::NonFiniteSample { index } => {
                write!(f, "source sample {} has a non-finite component", index)
            }
            ConfigurationError::NonFiniteGridCorner => {
                write!(f, "grid corners must be finite")
            }
            ConfigurationError::InvalidGridSpacing { spacing } => {
                write!(f, "grid spacing must be finite and positive, got {}", spacing)
            }
            ConfigurationError::InvalidShapeParameter { beta } => {
                write!(f, "gaussian shape parameter must be finite and positive, got {}", beta)
            }
            ConfigurationError::InvalidPivotTolerance { tolerance } => {
                write!(f, "pivot tolerance must be finite and non-negative, got {}", tolerance)
            }
            ConfigurationError::GridTooLarge {
                columns,
                rows,
                layers,
            } => write!(
                f,
                "grid of {} x {} x {} points is too large to index",
                columns, rows, layers
            ),
        }
    }
}

impl Error for ConfigurationError {}

/// Where a non-finite value was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowStage {
    /// A solved lambda weight; `index` is the source sample row.
    Coefficients { axis: Axis, index: usize },

    /// One of a batch of interpolated vectors; `index` is the query or grid point.
    Evaluation { index: usize },

    /// A single interpolated vector.
    Point,
}

impl fmt::Display for OverflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowStage::Coefficients { axis, index } => {
                write!(f, "{} weight for source sample {}", axis, index)
            }
            OverflowStage::Evaluation { index } => {
                write!(f, "interpolated vector at point {}", index)
            }
            OverflowStage::Point => f.write_str("interpolated vector"),
        }
    }
}

/// Errors returned while fitting or evaluating a vector field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldError {
    /// The inputs were rejected before solving.
    Configuration(ConfigurationError),

    /// Gaussian elimination met a pivot at or below the tolerance while solving
    /// the system for `axis`.
    SingularSystem {
        axis: Axis,
        pivot_row: usize,
        pivot_value: f64,
    },

    /// A lambda or interpolated component came out NaN or infinite.
    NumericOverflow { stage: OverflowStage },
}

impl FieldError {
    pub(crate) fn singular(axis: Axis, err: EliminationError) -> Self {
        match err {
            EliminationError::ZeroPivot { row, value } => FieldError::SingularSystem {
                axis,
                pivot_row: row,
                pivot_value: value,
            },
        }
    }
}

impl From<ConfigurationError> for FieldError {
    fn from(value: ConfigurationError) -> Self {
        FieldError::Configuration(value)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Configuration(err) => write!(f, "invalid configuration: {}", err),
            FieldError::SingularSystem {
                axis,
                pivot_row,
                pivot_value,
            } => write!(
                f,
                "singular {} system: pivot {:e} at row {} (coincident source points?)",
                axis, pivot_value, pivot_row
            ),
            FieldError::NumericOverflow { stage } => write!(f, "non-finite {}", stage),
        }
    }
}

impl Error for FieldError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FieldError::Configuration(err) => Some(err),
            FieldError::SingularSystem { .. } | FieldError::NumericOverflow { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_messages_name_the_failing_value() {
        let weight = FieldError::NumericOverflow {
            stage: OverflowStage::Coefficients { axis: Axis::Y, index: 3 },
        };
        let batch = FieldError::NumericOverflow {
            stage: OverflowStage::Evaluation { index: 7 },
        };
        let single = FieldError::NumericOverflow {
            stage: OverflowStage::Point,
        };

        assert_eq!(weight.to_string(), "non-finite y weight for source sample 3");
        assert_eq!(batch.to_string(), "non-finite interpolated vector at point 7");
        assert_eq!(single.to_string(), "non-finite interpolated vector");
    }
}
