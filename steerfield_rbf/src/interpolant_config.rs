/////////////////////////////////////////////////////////////////////////////////////////////
//
// Specifies kernel selection and solver tolerances for configuring vector field interpolants.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Specifies kernel selection and solver tolerances for configuring vector field interpolants.
use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use steerfield_rbf_utils::{DEFAULT_GAUSSIAN_BETA, KernelParams, KernelType, Vector3, kernel_evaluate};

/// Default relative pivot tolerance, see [`InterpolantSettings::pivot_tolerance`].
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-12;

/// The radial basis function used to build and evaluate the field.
///
/// - `Biharmonic`: `phi(r) = r`. Non-singular for two or more distinct points; a
///   single source gives a zero diagonal.
/// - `Gaussian`: `phi(r) = exp(-beta * r^2)`. Smoother and more local, at the
///   cost of conditioning when `beta` is small relative to the point spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum KernelKind {
    Biharmonic,
    Gaussian { beta: f64 },
}

impl KernelKind {
    /// Gaussian kernel with the default shape parameter.
    pub fn gaussian() -> Self {
        KernelKind::Gaussian {
            beta: DEFAULT_GAUSSIAN_BETA,
        }
    }

    /// Gaussian kernel with the given shape parameter, or the default when `None`.
    pub fn gaussian_with_beta(beta: Option<f64>) -> Self {
        KernelKind::Gaussian {
            beta: beta.unwrap_or(DEFAULT_GAUSSIAN_BETA),
        }
    }

    /// Kernel value between two points. Total over all inputs, `a == b` included.
    pub fn phi(&self, a: &Vector3, b: &Vector3) -> f64 {
        kernel_evaluate(a, b, &KernelParams::from(*self))
    }

    /// Checks the shape parameter of Gaussian kernels.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match *self {
            KernelKind::Biharmonic => Ok(()),
            KernelKind::Gaussian { beta } if beta.is_finite() && beta > 0.0 => Ok(()),
            KernelKind::Gaussian { beta } => {
                Err(ConfigurationError::InvalidShapeParameter { beta })
            }
        }
    }
}

impl Default for KernelKind {
    fn default() -> Self {
        KernelKind::Biharmonic
    }
}

impl From<KernelKind> for KernelParams {
    /// Converts a [`KernelKind`] into [`steerfield_rbf_utils::KernelParams`].
    ///
    /// The biharmonic kernel ignores `beta`, so it carries the default.
    fn from(v: KernelKind) -> Self {
        match v {
            KernelKind::Biharmonic => KernelParams {
                kernel_type: KernelType::BiharmonicRbf,
                beta: DEFAULT_GAUSSIAN_BETA,
            },
            KernelKind::Gaussian { beta } => KernelParams {
                kernel_type: KernelType::GaussianRbf,
                beta,
            },
        }
    }
}

/// A convenience builder for constructing a [`InterpolantSettings`] instance.
///
/// The builder should be called via the [`InterpolantSettings::builder`] method.
#[derive(Debug, Clone, Copy)]
pub struct InterpolantSettingsBuilder {
    pub kernel: KernelKind,
    pub pivot_tolerance: f64,
    pub check_finite: bool,
}

impl InterpolantSettingsBuilder {
    fn new(kernel: KernelKind) -> Self {
        Self {
            kernel,
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
            check_finite: true,
        }
    }

    /// Sets the relative pivot tolerance.
    pub fn pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }

    /// Enables or disables NaN/infinity checks on weights and evaluated vectors.
    pub fn check_finite(mut self, check_finite: bool) -> Self {
        self.check_finite = check_finite;
        self
    }

    pub fn build(self) -> InterpolantSettings {
        InterpolantSettings {
            kernel: self.kernel,
            pivot_tolerance: self.pivot_tolerance,
            check_finite: self.check_finite,
        }
    }
}

/// Settings for fitting a [`crate::FieldInterpolator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolantSettings {
    /// The RBF kernel to use for interpolation.
    pub kernel: KernelKind,

    /// A pivot is treated as zero when its magnitude is not greater than
    /// `pivot_tolerance` times the largest magnitude in the kernel block.
    pub pivot_tolerance: f64,

    /// Reject NaN or infinite weights and interpolated vectors.
    pub check_finite: bool,
}

impl InterpolantSettings {
    /// Returns a new [`InterpolantSettingsBuilder`] for the given kernel.
    pub fn builder(kernel: KernelKind) -> InterpolantSettingsBuilder {
        InterpolantSettingsBuilder::new(kernel)
    }

    /// Checks the kernel's shape parameter and the pivot tolerance.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.kernel.validate()?;

        match self.pivot_tolerance.is_finite() && self.pivot_tolerance >= 0.0 {
            true => Ok(()),
            false => Err(ConfigurationError::InvalidPivotTolerance {
                tolerance: self.pivot_tolerance,
            }),
        }
    }
}

impl Default for InterpolantSettings {
    fn default() -> Self {
        InterpolantSettings::builder(KernelKind::default()).build()
    }
}

impl From<InterpolantSettings> for KernelParams {
    fn from(v: InterpolantSettings) -> Self {
        v.kernel.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_uses_default_beta() {
        assert_eq!(
            KernelKind::gaussian(),
            KernelKind::Gaussian {
                beta: DEFAULT_GAUSSIAN_BETA
            }
        );
        assert_eq!(KernelKind::gaussian_with_beta(None), KernelKind::gaussian());
        assert_eq!(
            KernelKind::gaussian_with_beta(Some(0.5)),
            KernelKind::Gaussian { beta: 0.5 }
        );
    }

    #[test]
    fn phi_at_zero_and_at_distance() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 6.0, 3.0);

        assert_eq!(KernelKind::Biharmonic.phi(&a, &a), 0.0);
        assert_eq!(KernelKind::Biharmonic.phi(&a, &b), 5.0);
        assert_eq!(KernelKind::gaussian().phi(&a, &a), 1.0);
        assert!((KernelKind::gaussian().phi(&a, &b) - (-0.025f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn invalid_beta_is_a_configuration_error() {
        for beta in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                KernelKind::Gaussian { beta }.validate(),
                Err(ConfigurationError::InvalidShapeParameter { .. })
            ));
        }
        assert!(KernelKind::Biharmonic.validate().is_ok());
    }

    #[test]
    fn pivot_tolerance_must_be_finite_and_non_negative() {
        for tolerance in [-1e-12, f64::NAN, f64::INFINITY] {
            let settings = InterpolantSettings::builder(KernelKind::Biharmonic)
                .pivot_tolerance(tolerance)
                .build();
            assert!(matches!(
                settings.validate(),
                Err(ConfigurationError::InvalidPivotTolerance { .. })
            ));
        }

        let exact = InterpolantSettings::builder(KernelKind::Biharmonic)
            .pivot_tolerance(0.0)
            .build();
        assert!(exact.validate().is_ok());

        let bad_beta = InterpolantSettings::builder(KernelKind::Gaussian { beta: 0.0 }).build();
        assert_eq!(
            bad_beta.validate(),
            Err(ConfigurationError::InvalidShapeParameter { beta: 0.0 })
        );
    }

    #[test]
    fn kernel_kind_maps_onto_kernel_params() {
        let p: KernelParams = KernelKind::Gaussian { beta: 0.2 }.into();
        assert_eq!(p.kernel_type, KernelType::GaussianRbf);
        assert_eq!(p.beta, 0.2);

        let p: KernelParams = InterpolantSettings::default().into();
        assert_eq!(p.kernel_type, KernelType::BiharmonicRbf);
    }
}
