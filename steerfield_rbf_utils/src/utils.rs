/////////////////////////////////////////////////////////////////////////////////////////////
//
// Supplies distance helpers, point extents, kernel dispatch, and dense kernel matrix builders.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{KernelFromParams, KernelFunction, KernelParams, Vector3};
use faer::Mat;
use serde::{Deserialize, Serialize};

/// Calculates the euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use steerfield_rbf_utils::{Vector3, get_distance};
///
/// let target = Vector3::new(1.0, 2.0, 0.0);
/// let source = Vector3::new(4.0, 6.0, 0.0);
///
/// assert_eq!(get_distance(&target, &source), 5.0);
/// ```
#[inline(always)]
pub fn get_distance(target: &Vector3, source: &Vector3) -> f64 {
    get_distance_sq(target, source).sqrt()
}

/// Returns the squared Euclidean distance between two points.
#[inline(always)]
pub fn get_distance_sq(target: &Vector3, source: &Vector3) -> f64 {
    (*target - *source).norm_squared()
}

/// Computes the axis aligned bounding box (AABB) of a set of points.
///
/// Returns `(min_corner, max_corner)`, or `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use steerfield_rbf_utils::{Vector3, get_pointarray_extents};
///
/// let points = [
///     Vector3::new(1.0, 2.0, 0.0),
///     Vector3::new(3.0, -1.0, 5.0),
///     Vector3::new(0.5, 4.0, 1.0),
/// ];
/// let (min, max) = get_pointarray_extents(&points).unwrap();
/// assert_eq!(min, Vector3::new(0.5, -1.0, 0.0));
/// assert_eq!(max, Vector3::new(3.0, 4.0, 5.0));
/// ```
#[inline(always)]
pub fn get_pointarray_extents(points: &[Vector3]) -> Option<(Vector3, Vector3)> {
    let first = *points.first()?;

    Some(
        points
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
    )
}

/// Builds the dense, symmetric `N x N` kernel matrix of a point set using a typed kernel.
///
/// Entry `(j, i)` is `phi(points[j], points[i])`. Only the lower triangle is
/// evaluated; the upper triangle is mirrored from it.
#[inline(always)]
pub fn get_a_matrix_typed<K>(points: &[Vector3], kernel_function: &K) -> Mat<f64>
where
    K: KernelFunction,
{
    let n = points.len();

    let mut a_matrix = Mat::<f64>::zeros(n, n);

    for i in 0..n {
        let source = &points[i];

        for j in i..n {
            let k_val = kernel_function.evaluate(&points[j], source);

            a_matrix[(j, i)] = k_val;
            a_matrix[(i, j)] = k_val;
        }
    }

    a_matrix
}

// K-free dispatcher generated from the kernel registry below.
// Assumes each kernel type implements `KernelFromParams` and exposes `phi(r)`.
macro_rules! for_each_kernel {
    ( registry = [ $( ($V:ident, $Kty:path) ),* $(,)? ] ) => {

        /// Runtime kernel selector built from the kernel registry.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum KernelType {
            $( $V, )*
        }

        /// Builds the dense kernel matrix of `points` for the selected [`KernelType`].
        #[inline(always)]
        pub fn get_a_matrix(points: &[Vector3], params: &KernelParams) -> Mat<f64> {
            match params.kernel_type {
                $(
                    KernelType::$V => {
                        let k = <$Kty as KernelFromParams>::from_params(params);
                        get_a_matrix_typed(points, &k)
                    }
                ),*
            }
        }

        /// Evaluates the selected kernel function at distance `r`.
        #[inline(always)]
        pub fn kernel_phi(r: f64, params: &KernelParams) -> f64 {
            match params.kernel_type {
                $(
                    KernelType::$V => {
                        let k = <$Kty as KernelFromParams>::from_params(params);
                        k.phi(r)
                    }
                ),*
            }
        }

        /// Evaluates the selected kernel function between two points.
        #[inline(always)]
        pub fn kernel_evaluate(target: &Vector3, source: &Vector3, params: &KernelParams) -> f64 {
            match params.kernel_type {
                $(
                    KernelType::$V => {
                        let k = <$Kty as KernelFromParams>::from_params(params);
                        k.evaluate(target, source)
                    }
                ),*
            }
        }
    };
}

for_each_kernel! {
    registry = [
        (BiharmonicRbf, crate::kernels::BiharmonicRbfKernel),
        (GaussianRbf,   crate::kernels::GaussianRbfKernel),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Vector3> {
        vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(-1.0, 2.0, 2.0),
        ]
    }

    #[test]
    fn biharmonic_a_matrix_is_symmetric_distance_matrix() {
        let points = sample_points();
        let params = KernelParams::builder(KernelType::BiharmonicRbf).build();
        let a = get_a_matrix(&points, &params);

        assert_eq!((a.nrows(), a.ncols()), (3, 3));
        for j in 0..3 {
            assert_eq!(a[(j, j)], 0.0);
            for i in 0..3 {
                assert_eq!(a[(j, i)], a[(i, j)]);
                assert_eq!(a[(j, i)], get_distance(&points[j], &points[i]));
            }
        }
        assert_eq!(a[(0, 1)], 5.0);
    }

    #[test]
    fn gaussian_a_matrix_has_unit_diagonal() {
        let points = sample_points();
        let params = KernelParams::builder(KernelType::GaussianRbf).beta(0.25).build();
        let a = get_a_matrix(&points, &params);

        for j in 0..3 {
            assert_eq!(a[(j, j)], 1.0);
        }
        assert!((a[(0, 1)] - (-0.25f64 * 25.0).exp()).abs() < 1e-15);
    }

    #[test]
    fn empty_point_set_gives_empty_matrix() {
        let params = KernelParams::builder(KernelType::BiharmonicRbf).build();
        let a = get_a_matrix(&[], &params);

        assert_eq!((a.nrows(), a.ncols()), (0, 0));
        assert!(get_pointarray_extents(&[]).is_none());
    }

    #[test]
    fn dispatch_matches_typed_kernels() {
        let params = KernelParams::builder(KernelType::GaussianRbf).beta(0.1).build();
        let a = Vector3::new(1.0, 1.0, 1.0);
        let b = Vector3::new(2.0, 3.0, -1.0);
        let r = get_distance(&a, &b);

        assert!((kernel_phi(r, &params) - kernel_evaluate(&a, &b, &params)).abs() < 1e-14);
    }
}
