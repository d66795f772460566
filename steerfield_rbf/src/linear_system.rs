/////////////////////////////////////////////////////////////////////////////////////////////
//
// Builds the per-axis augmented RBF systems from a set of source samples.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # linear_system
//!
//! For `N` source samples, each axis gets an `N x (N + 1)` augmented matrix
//! `[ Phi | v_axis ]`, where `Phi[(j, i)] = phi(p_j, p_i)` and the last column
//! holds the axis component of each source vector. The kernel block is the
//! same for all three axes and is evaluated once.
use crate::rbf::SourceSample;
use faer::Mat;
use serde::{Deserialize, Serialize};
use std::fmt;
use steerfield_rbf_utils::{KernelParams, Vector3, get_a_matrix};

/// A spatial axis; one linear system is solved per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in column order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Column index of this axis (`X = 0`, `Y = 1`, `Z = 2`).
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The component of `v` along this axis.
    #[inline(always)]
    pub fn component(self, v: &Vector3) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// A dense `N x (N + 1)` augmented matrix for one axis.
///
/// Gaussian elimination mutates it destructively, so one is built per solve
/// and dropped afterwards.
#[derive(Debug, Clone)]
pub struct AugmentedMatrix {
    axis: Axis,
    matrix: Mat<f64>,
}

impl AugmentedMatrix {
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of unknowns (rows).
    pub fn num_unknowns(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn matrix(&self) -> &Mat<f64> {
        &self.matrix
    }

    pub fn matrix_mut(&mut self) -> &mut Mat<f64> {
        &mut self.matrix
    }

    /// Largest absolute entry of the left `N x N` block.
    ///
    /// Used to make the pivot tolerance independent of the kernel's scale.
    pub fn kernel_scale(&self) -> f64 {
        let n = self.num_unknowns();
        let mut scale = 0.0f64;
        for i in 0..n {
            for j in 0..n {
                scale = scale.max(self.matrix[(j, i)].abs());
            }
        }
        scale
    }
}

/// Builds the X, Y and Z augmented matrices for `samples`.
///
/// With no samples this returns three `0 x 1` matrices; callers must reject
/// that case before solving.
pub fn build_linear_systems(samples: &[SourceSample], params: &KernelParams) -> [AugmentedMatrix; 3] {
    let n = samples.len();
    let positions: Vec<Vector3> = samples.iter().map(|s| s.position).collect();

    let a_matrix = get_a_matrix(&positions, params);

    Axis::ALL.map(|axis| AugmentedMatrix {
        axis,
        matrix: Mat::from_fn(n, n + 1, |j, i| match i < n {
            true => a_matrix[(j, i)],
            false => axis.component(&samples[j].vector),
        }),
    })
}
