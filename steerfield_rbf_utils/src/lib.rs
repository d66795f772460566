/////////////////////////////////////////////////////////////////////////////////////////////
//
// Re-exports the vector type, kernels, and kernel helpers used across the steerfield_rbf crates.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! # Utilities for the `steerfield_rbf` crate
//!
//! Holds the pieces of the interpolation engine that do not depend on a
//! solve: the [`Vector3`] point/direction type, the radial kernels and the
//! dense kernel matrix builder.
mod constants;
mod kernel_helpers;
mod rbf_kernels;
mod traits;
mod utils;
mod vector;

/// Implemented kernels for use in the `steerfield_rbf` crate.
pub mod kernels {
    pub use super::rbf_kernels::*;
}

pub use {
    constants::DEFAULT_GAUSSIAN_BETA,
    kernel_helpers::{KernelParams, KernelParamsBuilder},
    traits::{KernelFromParams, KernelFunction},
    utils::{
        KernelType, get_a_matrix, get_distance, get_distance_sq, get_pointarray_extents,
        kernel_evaluate, kernel_phi,
    },
    vector::Vector3,
};
