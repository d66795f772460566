/////////////////////////////////////////////////////////////////////////////////////////////
//
// Implements the concrete RBF kernel functions used to build and evaluate vector fields.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{KernelFromParams, KernelFunction, KernelParams, Vector3, get_distance, get_distance_sq};

/// Biharmonic RBF kernel with `phi(r) = r`.
///
/// The interpolation matrix of this kernel is non-singular for any set of
/// distinct points, which makes it the default for steering fields.
#[derive(Clone, Debug, Copy)]
pub struct BiharmonicRbfKernel;

impl BiharmonicRbfKernel {
    #[inline(always)]
    pub fn phi(&self, r: f64) -> f64 {
        r
    }
}

impl KernelFunction for BiharmonicRbfKernel {
    #[inline(always)]
    fn evaluate(&self, target: &Vector3, source: &Vector3) -> f64 {
        self.phi(get_distance(target, source))
    }
}

impl KernelFromParams for BiharmonicRbfKernel {
    #[inline(always)]
    fn from_params(_: &KernelParams) -> Self {
        BiharmonicRbfKernel
    }
}

/// Gaussian RBF kernel with `phi(r) = exp(-beta * r^2)`.
///
/// Gives smoother, more local fields than the biharmonic kernel. The
/// shape parameter `beta` controls how quickly influence decays with distance.
#[derive(Clone, Debug, Copy)]
pub struct GaussianRbfKernel {
    pub beta: f64,
}

impl GaussianRbfKernel {
    #[inline(always)]
    pub fn new(beta: f64) -> Self {
        Self { beta }
    }

    #[inline(always)]
    pub fn eval_r2(&self, r2: f64) -> f64 {
        (-self.beta * r2).exp()
    }

    #[inline(always)]
    pub fn phi(&self, r: f64) -> f64 {
        self.eval_r2(r * r)
    }
}

impl KernelFunction for GaussianRbfKernel {
    #[inline(always)]
    fn evaluate(&self, target: &Vector3, source: &Vector3) -> f64 {
        // no sqrt needed
        self.eval_r2(get_distance_sq(target, source))
    }
}

impl KernelFromParams for GaussianRbfKernel {
    #[inline(always)]
    fn from_params(p: &KernelParams) -> Self {
        Self::new(p.beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn biharmonic_is_distance() {
        let k = BiharmonicRbfKernel;
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 6.0, 3.0);

        assert_eq!(k.evaluate(&a, &b), 5.0);
        assert_eq!(k.evaluate(&a, &a), 0.0);
    }

    #[test]
    fn gaussian_is_one_at_zero_distance_and_decays() {
        let k = GaussianRbfKernel::new(0.5);
        let a = Vector3::ZERO;

        assert_eq!(k.evaluate(&a, &a), 1.0);

        let near = k.evaluate(&a, &Vector3::new(1.0, 0.0, 0.0));
        let far = k.evaluate(&a, &Vector3::new(2.0, 0.0, 0.0));
        assert!((near - (-0.5f64).exp()).abs() < 1e-15);
        assert!(far < near);
    }

    #[test]
    fn gaussian_phi_matches_point_evaluation() {
        let k = GaussianRbfKernel::new(0.001);
        let a = Vector3::new(-3.0, 1.0, 7.0);
        let b = Vector3::new(2.0, -4.0, 0.5);
        let r = get_distance(&a, &b);

        assert!((k.phi(r) - k.evaluate(&a, &b)).abs() < 1e-14);
    }
}
