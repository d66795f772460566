/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines constants shared by the RBF kernels.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

/// Default shape parameter `beta` of the Gaussian kernel `phi(r) = exp(-beta * r^2)`.
///
/// Small enough that a field spanning a few tens of world units stays smooth.
pub const DEFAULT_GAUSSIAN_BETA: f64 = 0.001;
