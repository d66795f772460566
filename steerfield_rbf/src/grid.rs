/////////////////////////////////////////////////////////////////////////////////////////////
//
// Generates the ordered, restartable set of query points of a regular 3D sample grid.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Regular sample grid.
//!
//! Points are ordered with layers (`z`) outermost, then rows (`y`), then
//! columns (`x`) innermost, so index `i` maps to
//! `column = i % columns`, `row = (i / columns) % rows`, `layer = i / (columns * rows)`.
//! The order is fixed for a given [`GridParams`], which lets field samples from
//! two recomputations be compared index by index.
use crate::{config::GridParams, error::ConfigurationError};
use std::iter::FusedIterator;
use steerfield_rbf_utils::Vector3;

/// A validated grid layout that produces its points on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    params: GridParams,
    step: Vector3,
}

/// Spacing along one axis; a single point collapses onto `min`.
fn axis_step(min: f64, max: f64, count: usize) -> f64 {
    match count > 1 {
        true => (max - min) / (count - 1) as f64,
        false => 0.0,
    }
}

impl SampleGrid {
    /// Validates `params` and prepares the grid.
    pub fn new(params: GridParams) -> Result<Self, ConfigurationError> {
        params.validate()?;

        let (min, max) = (params.min_corner, params.max_corner);
        let step = Vector3::new(
            axis_step(min.x, max.x, params.columns),
            axis_step(min.y, max.y, params.rows),
            axis_step(min.z, max.z, params.layers),
        );

        Ok(Self { params, step })
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.num_points()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `(min_corner, max_corner)` the grid spans.
    pub fn bounds(&self) -> (Vector3, Vector3) {
        (self.params.min_corner, self.params.max_corner)
    }

    /// The point at position `index` in iteration order, if in range.
    pub fn point(&self, index: usize) -> Option<Vector3> {
        if index >= self.len() {
            return None;
        }

        let GridParams {
            columns,
            rows,
            min_corner,
            ..
        } = self.params;

        let column = index % columns;
        let row = (index / columns) % rows;
        let layer = index / (columns * rows);

        Some(Vector3::new(
            min_corner.x + self.step.x * column as f64,
            min_corner.y + self.step.y * row as f64,
            min_corner.z + self.step.z * layer as f64,
        ))
    }

    /// A fresh iterator over every grid point.
    pub fn iter(&self) -> GridPointIter<'_> {
        GridPointIter {
            grid: self,
            front: 0,
            back: self.len(),
        }
    }

    /// Collects every grid point.
    pub fn points(&self) -> Vec<Vector3> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a SampleGrid {
    type Item = Vector3;
    type IntoIter = GridPointIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the points of a [`SampleGrid`].
#[derive(Debug, Clone)]
pub struct GridPointIter<'a> {
    grid: &'a SampleGrid,
    front: usize,
    back: usize,
}

impl Iterator for GridPointIter<'_> {
    type Item = Vector3;

    fn next(&mut self) -> Option<Vector3> {
        if self.front >= self.back {
            return None;
        }
        let p = self.grid.point(self.front);
        self.front += 1;
        p
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for GridPointIter<'_> {
    fn next_back(&mut self) -> Option<Vector3> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.grid.point(self.back)
    }
}

impl ExactSizeIterator for GridPointIter<'_> {}

impl FusedIterator for GridPointIter<'_> {}
