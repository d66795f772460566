/////////////////////////////////////////////////////////////////////////////////////////////
//
// Declares traits for kernel evaluation and for building kernels from shared parameter sets.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{Vector3, kernel_helpers::KernelParams};

/// Evaluates a kernel function between a target and source point.
pub trait KernelFunction {
    fn evaluate(&self, target: &Vector3, source: &Vector3) -> f64;
}

/// Converts a shared [`KernelParams`] configuration into a concrete kernel type.
pub trait KernelFromParams: Sized {
    /// Constructs `Self` from a set of uniform kernel parameters.
    fn from_params(p: &KernelParams) -> Self;
}
