/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the vector field interpolator, coefficient management, and solver orchestration logic.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{
    error::{ConfigurationError, FieldError, OverflowStage},
    interpolant_config::{InterpolantSettings, KernelKind},
    linalg,
    linear_system::{Axis, build_linear_systems},
    progress::{self, ProgressMsg, ProgressSink},
};

use faer::Mat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use steerfield_rbf_utils::{KernelParams, Vector3, kernel_evaluate};

/// A source position paired with the direction the field should take there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceSample {
    pub position: Vector3,
    pub vector: Vector3,
}

impl SourceSample {
    pub const fn new(position: Vector3, vector: Vector3) -> Self {
        Self { position, vector }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.vector.is_finite()
    }
}

impl From<(Vector3, Vector3)> for SourceSample {
    fn from((position, vector): (Vector3, Vector3)) -> Self {
        Self::new(position, vector)
    }
}

impl From<([f64; 3], [f64; 3])> for SourceSample {
    fn from((position, vector): ([f64; 3], [f64; 3])) -> Self {
        Self::new(position.into(), vector.into())
    }
}

/// Solved weights of the three axis systems.
///
/// `point_coefficients` is `N x 3`; column `0`, `1` and `2` hold the lambda
/// vector of the X, Y and Z system respectively, row `i` belongs to source
/// sample `i`.
#[derive(Debug, Clone)]
pub struct Coefficients {
    pub point_coefficients: Mat<f64>,
}

impl Coefficients {
    pub(crate) fn new(point_coefficients: Mat<f64>) -> Self {
        Self { point_coefficients }
    }

    pub fn num_points(&self) -> usize {
        self.point_coefficients.nrows()
    }

    /// The lambda vector of one axis.
    pub fn lambdas(&self, axis: Axis) -> Vec<f64> {
        self.point_coefficients
            .col(axis.index())
            .iter()
            .copied()
            .collect()
    }

    #[inline(always)]
    fn weight(&self, i: usize) -> Vector3 {
        let c = &self.point_coefficients;
        Vector3::new(c[(i, 0)], c[(i, 1)], c[(i, 2)])
    }
}

/// Convenience builder for constructing a [`FieldInterpolator`].
///
/// The builder should be called via the [`FieldInterpolator::builder`] method.
pub struct FieldInterpolatorBuilder {
    samples: Vec<SourceSample>,
    interpolant_settings: InterpolantSettings,
    progress_callback: Option<Arc<dyn ProgressSink>>,
}

impl FieldInterpolatorBuilder {
    fn new(samples: Vec<SourceSample>, interpolant_settings: InterpolantSettings) -> Self {
        Self {
            samples,
            interpolant_settings,
            progress_callback: None,
        }
    }

    /// Optional callback for reporting solver progress.
    pub fn progress_callback(mut self, progress_callback: Arc<dyn ProgressSink>) -> Self {
        self.progress_callback = Some(progress_callback);
        self
    }

    /// Solves the three axis systems and returns the fitted interpolator.
    pub fn build(self) -> Result<FieldInterpolator, FieldError> {
        let coefficients = solve_coefficients(
            &self.samples,
            &self.interpolant_settings,
            &self.progress_callback,
        )?;

        Ok(FieldInterpolator {
            samples: self.samples,
            coefficients,
            kernel_params: self.interpolant_settings.into(),
            interpolant_settings: self.interpolant_settings,
            progress_callback: self.progress_callback,
        })
    }
}

/// A fitted RBF vector field.
///
/// Holds the source samples it was fitted to (the interpolant is a sum over
/// them), the three lambda vectors and the kernel. A value of this type is
/// always fully fitted: construction and [`FieldInterpolator::refit`] either
/// succeed completely or leave the previous state untouched.
///
/// Row `i` of the coefficients always belongs to `samples[i]`; both are only
/// ever replaced together by a successful solve.
#[derive(Debug, Clone)]
pub struct FieldInterpolator {
    samples: Vec<SourceSample>,
    coefficients: Coefficients,
    kernel_params: KernelParams,
    interpolant_settings: InterpolantSettings,
    progress_callback: Option<Arc<dyn ProgressSink>>,
}

impl FieldInterpolator {
    /// Creates a new [`FieldInterpolatorBuilder`] for the given samples and settings.
    pub fn builder(
        samples: Vec<SourceSample>,
        interpolant_settings: InterpolantSettings,
    ) -> FieldInterpolatorBuilder {
        FieldInterpolatorBuilder::new(samples, interpolant_settings)
    }

    /// Fits `samples` with `kernel` and default tolerances.
    ///
    /// # Examples
    ///
    /// ```
    /// use steerfield_rbf::{FieldInterpolator, KernelKind, SourceSample};
    /// use steerfield_rbf_utils::Vector3;
    ///
    /// let samples = vec![
    ///     SourceSample::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
    ///     SourceSample::new(Vector3::new(10.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0)),
    /// ];
    /// let field = FieldInterpolator::fit(samples, KernelKind::Biharmonic)?;
    ///
    /// let v = field.evaluate(&Vector3::new(10.0, 0.0, 0.0));
    /// assert!((v.x + 1.0).abs() < 1e-12);
    /// # Ok::<(), steerfield_rbf::FieldError>(())
    /// ```
    pub fn fit(samples: Vec<SourceSample>, kernel: KernelKind) -> Result<Self, FieldError> {
        Self::builder(samples, InterpolantSettings::builder(kernel).build()).build()
    }

    /// Re-fits against new samples and kernel, keeping the other settings.
    ///
    /// On error `self` is unchanged and still evaluates the previous field.
    pub fn refit(&mut self, samples: Vec<SourceSample>, kernel: KernelKind) -> Result<(), FieldError> {
        let interpolant_settings = InterpolantSettings {
            kernel,
            ..self.interpolant_settings
        };

        let coefficients =
            solve_coefficients(&samples, &interpolant_settings, &self.progress_callback)?;

        self.samples = samples;
        self.coefficients = coefficients;
        self.kernel_params = interpolant_settings.into();
        self.interpolant_settings = interpolant_settings;

        Ok(())
    }

    /// The source samples the field was fitted to.
    pub fn samples(&self) -> &[SourceSample] {
        &self.samples
    }

    pub fn num_points(&self) -> usize {
        self.samples.len()
    }

    /// Solved per-axis weights.
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    pub fn kernel(&self) -> KernelKind {
        self.interpolant_settings.kernel
    }

    pub fn interpolant_settings(&self) -> &InterpolantSettings {
        &self.interpolant_settings
    }

    /// Evaluates the interpolated vector at `point`.
    ///
    /// Each component is `sum_i lambda[axis][i] * phi(point, p_i)`.
    pub fn evaluate(&self, point: &Vector3) -> Vector3 {
        self.samples
            .iter()
            .enumerate()
            .fold(Vector3::ZERO, |acc, (i, sample)| {
                let phi = kernel_evaluate(point, &sample.position, &self.kernel_params);
                acc + self.coefficients.weight(i) * phi
            })
    }

    /// Like [`FieldInterpolator::evaluate`], but reports a NaN or infinite result as an error.
    pub fn evaluate_checked(&self, point: &Vector3) -> Result<Vector3, FieldError> {
        let v = self.evaluate(point);
        match v.is_finite() {
            true => Ok(v),
            false => Err(FieldError::NumericOverflow {
                stage: OverflowStage::Point,
            }),
        }
    }

    /// Evaluates the field at every point, preserving order.
    pub fn evaluate_many(&self, points: &[Vector3]) -> Vec<Vector3> {
        points.par_iter().map(|p| self.evaluate(p)).collect()
    }

    /// Evaluates the field at every point and fails on the first non-finite result.
    pub fn evaluate_many_checked(&self, points: &[Vector3]) -> Result<Vec<Vector3>, FieldError> {
        let values = self.evaluate_many(points);

        match values.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(FieldError::NumericOverflow {
                stage: OverflowStage::Evaluation { index },
            }),
            None => Ok(values),
        }
    }

    /// Evaluates the field at its own source positions.
    ///
    /// Useful for checking the fit: the result should match the source vectors.
    pub fn evaluate_at_source(&self) -> Vec<Vector3> {
        let positions: Vec<Vector3> = self.samples.iter().map(|s| s.position).collect();
        self.evaluate_many(&positions)
    }
}

/// Builds, eliminates and back-substitutes the X, Y and Z systems.
///
/// Fails before building anything on empty or non-finite input, and fails
/// the whole fit if any one axis is singular or yields a non-finite weight.
fn solve_coefficients(
    samples: &[SourceSample],
    interpolant_settings: &InterpolantSettings,
    progress_callback: &Option<Arc<dyn ProgressSink>>,
) -> Result<Coefficients, FieldError> {
    if samples.is_empty() {
        return Err(ConfigurationError::NoSourceSamples.into());
    }

    interpolant_settings.validate()?;

    if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
        return Err(ConfigurationError::NonFiniteSample { index }.into());
    }

    let n = samples.len();
    let kernel_params: KernelParams = interpolant_settings.kernel.into();

    let mut systems = build_linear_systems(samples, &kernel_params);

    // same kernel block on every axis, so one threshold serves all three
    let tolerance = interpolant_settings.pivot_tolerance * systems[0].kernel_scale();

    let mut point_coefficients = Mat::<f64>::zeros(n, 3);

    for system in systems.iter_mut() {
        let axis = system.axis();

        let lambdas = linalg::solve_augmented_in_place(system.matrix_mut(), tolerance)
            .map_err(|e| FieldError::singular(axis, e))?;

        if interpolant_settings.check_finite {
            if let Some(index) = lambdas.iter().position(|l| !l.is_finite()) {
                return Err(FieldError::NumericOverflow {
                    stage: OverflowStage::Coefficients { axis, index },
                });
            }
        }

        for (i, lambda) in lambdas.into_iter().enumerate() {
            point_coefficients[(i, axis.index())] = lambda;
        }

        progress::emit(
            progress_callback,
            ProgressMsg::SystemSolved {
                axis,
                num_points: n,
            },
        );
    }

    Ok(Coefficients::new(point_coefficients))
}
