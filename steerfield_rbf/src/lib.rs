/////////////////////////////////////////////////////////////////////////////////////////////
//
// Exposes the public API and high-level documentation for steerable RBF vector fields.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Steerable 3D vector fields from sparse source vectors.
//!
//! A handful of source samples, each a position with a direction attached, is
//! turned into a smooth vector field defined everywhere in space. Each
//! component of the field is an independent Radial Basis Function (RBF)
//! interpolant:
//!
//! $$ v_a(x) = \sum_i \lambda_{a,i} \, \phi(\lVert x - p_i \rVert), \quad a \in \{x, y, z\} $$
//!
//! The weights of each axis come from one dense `N x N` system, solved
//! directly with partially pivoted Gaussian elimination. Source sets are
//! expected to stay small (tens of points), so the `O(N³)` solve is cheap and
//! the whole field can be rebuilt whenever the sources change.
//!
//! The field is then sampled on a regular grid and published as an immutable
//! snapshot that other threads can read while the next one is computed.
//!
//! # Features
//! - Biharmonic (`phi(r) = r`) and Gaussian (`phi(r) = exp(-beta r²)`) kernels
//! - Singular systems and non-finite weights are reported as errors, never
//!   propagated as NaN vectors
//! - A failed refit leaves the previous field in place
//! - Decoding of generated `{ style, vectors: [{ s, e }] }` payloads
//! - CSV export and import of sampled fields
//!
//! # Examples
//!
//! ```
//! use steerfield_rbf::{
//!     VectorFieldEngine,
//!     config::{GridParams, Params},
//!     interpolant_config::KernelKind,
//! };
//!
//! let grid = GridParams::builder()
//!     .columns(5)
//!     .rows(1)
//!     .layers(5)
//!     .min_corner([-10.0, 0.0, -10.0])
//!     .max_corner([10.0, 0.0, 10.0])
//!     .build();
//!
//! let mut engine = VectorFieldEngine::new(Params::builder().grid(grid).build())?;
//!
//! // Two arrows pushing towards each other along x
//! engine.set_sources(vec![
//!     ([-10.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
//!     ([10.0, 0.0, 0.0], [-1.0, 0.0, 0.0]),
//! ]);
//! engine.set_kernel(KernelKind::gaussian())?;
//!
//! let summary = engine.recompute()?;
//! assert_eq!(summary.num_grid_points, 25);
//!
//! // The field is exact at the sources
//! let field = engine.interpolator().unwrap();
//! let v = field.evaluate(&[-10.0, 0.0, 0.0].into());
//! assert!((v.x - 1.0).abs() < 1e-9);
//!
//! let snapshot = engine.field_samples().unwrap();
//! assert_eq!(snapshot.samples.len(), 25);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod interpolant_config;

pub mod config;

pub mod error;

pub mod progress;

pub mod presets;

pub mod generated;

mod common;

mod rbf;

mod linalg;

mod linear_system;

mod grid;

mod field;

mod engine;

mod field_test_functions;

pub use {
    common::{
        csv_to_source_samples, field_samples_to_csv, generate_random_points,
        generate_random_samples, pad_and_snap_extents,
    },
    engine::{RecomputeSummary, VectorFieldEngine},
    error::{ConfigurationError, FieldError, GridAxis, OverflowStage},
    field::{FieldCache, FieldSample, FieldSnapshot},
    field_test_functions::FieldTestFunctions,
    grid::{GridPointIter, SampleGrid},
    interpolant_config::{InterpolantSettings, KernelKind},
    linalg::{EliminationError, back_substitution, gaussian_elimination, solve_augmented_in_place},
    linear_system::{AugmentedMatrix, Axis, build_linear_systems},
    rbf::{Coefficients, FieldInterpolator, FieldInterpolatorBuilder, SourceSample},
};
