/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides analytic vector fields for validating and demonstrating field interpolation.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Analytic vector fields with known values everywhere, used to produce
//! source samples and reference vectors.
use crate::rbf::SourceSample;
use steerfield_rbf_utils::Vector3;

/// Struct that implements a few closed-form 3D vector fields.
pub struct FieldTestFunctions;

impl FieldTestFunctions {
    /// The same `direction` at every point.
    pub fn uniform(points: &[Vector3], direction: Vector3) -> Vec<Vector3> {
        vec![direction; points.len()]
    }

    /// Counter-clockwise swirl about the vertical axis through `center`,
    /// seen from above (`+y`):
    /// $$ v = s \, (-(z - c_z), 0, x - c_x) $$
    ///
    /// Speed grows linearly with horizontal distance from the axis.
    pub fn vortex(points: &[Vector3], center: Vector3, strength: f64) -> Vec<Vector3> {
        points
            .iter()
            .map(|p| {
                let d = *p - center;
                Vector3::new(-d.z, 0.0, d.x) * strength
            })
            .collect()
    }

    /// Unit vectors pointing away from `center`; zero at the center itself.
    pub fn radial(points: &[Vector3], center: Vector3) -> Vec<Vector3> {
        points
            .iter()
            .map(|p| {
                let d = *p - center;
                match d.norm() {
                    r if r > 0.0 => d * (1.0 / r),
                    _ => Vector3::ZERO,
                }
            })
            .collect()
    }

    /// Pairs `points` with the vectors of one of the fields above.
    pub fn to_source_samples(points: &[Vector3], vectors: &[Vector3]) -> Vec<SourceSample> {
        assert_eq!(points.len(), vectors.len(), "Points and vectors must have same length.");

        points
            .iter()
            .zip(vectors)
            .map(|(p, v)| SourceSample::new(*p, *v))
            .collect()
    }
}
