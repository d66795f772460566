/////////////////////////////////////////////////////////////////////////////////////////////
//
// Provides parameter and builder types for configuring RBF kernels.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{constants::DEFAULT_GAUSSIAN_BETA, utils::KernelType};
use serde::{Deserialize, Serialize};

/// Defines the [`KernelType`] to use, along with the shape parameter
/// for the Gaussian kernel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KernelParams {
    /// KernelType enum variant to use.
    pub kernel_type: KernelType,

    /// Decay rate of the Gaussian kernel with distance. Larger values restrict
    /// the influence of each source point to a smaller neighbourhood.
    ///
    /// Only used by the Gaussian kernel.
    pub beta: f64,
}

impl KernelParams {
    /// Begins building a [`KernelParams`] instance for the given kernel type.
    pub fn builder(kernel_type: KernelType) -> KernelParamsBuilder {
        KernelParamsBuilder {
            kernel_type,
            beta: DEFAULT_GAUSSIAN_BETA,
        }
    }
}

/// Builder for [`KernelParams`] that provides sensible defaults.
#[derive(Debug, Clone, Copy)]
pub struct KernelParamsBuilder {
    kernel_type: KernelType,
    beta: f64,
}

impl KernelParamsBuilder {
    /// Sets the Gaussian shape parameter on the builder.
    pub fn beta(mut self, v: f64) -> Self {
        self.beta = v;
        self
    }

    /// Finalises the builder into a [`KernelParams`] value.
    pub fn build(self) -> KernelParams {
        assert!(self.beta.is_finite() && self.beta > 0.0);
        KernelParams {
            kernel_type: self.kernel_type,
            beta: self.beta,
        }
    }
}
