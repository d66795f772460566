/////////////////////////////////////////////////////////////////////////////////////////////
//
// Declares grid and engine configuration types with builder-style construction.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Declares grid and engine configuration types with builder-style construction.
use crate::{
    common::pad_and_snap_extents,
    error::{ConfigurationError, GridAxis},
    interpolant_config::InterpolantSettings,
    rbf::SourceSample,
};
use serde::{Deserialize, Serialize};
use steerfield_rbf_utils::{Vector3, get_pointarray_extents};

/// Layout of the regular grid the field is sampled on.
///
/// ### Default Values
/// - `columns`, `rows`, `layers`: `2`
/// - `min_corner`: `(-10, 10, -10)`
/// - `max_corner`: `(10, 10, 10)`
///
/// The default box is flat in `y`, so every grid point lies on the `y = 10`
/// plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridParams {
    /// Number of points along `x`.
    pub columns: usize,

    /// Number of points along `y`.
    pub rows: usize,

    /// Number of points along `z`.
    pub layers: usize,

    pub min_corner: Vector3,
    pub max_corner: Vector3,
}

impl GridParams {
    /// Returns a new [`GridParamsBuilder`] starting from the default layout.
    pub fn builder() -> GridParamsBuilder {
        GridParamsBuilder::new()
    }

    /// Total number of grid points, or `None` if the product overflows.
    pub fn checked_num_points(&self) -> Option<usize> {
        self.columns
            .checked_mul(self.rows)?
            .checked_mul(self.layers)
    }

    /// Total number of grid points. Zero if any axis is empty, saturates at
    /// `usize::MAX`; a validated layout never saturates.
    pub fn num_points(&self) -> usize {
        self.checked_num_points().unwrap_or(usize::MAX)
    }

    /// Checks that every axis has at least one point, the point count fits in
    /// a `usize`, and both corners are finite.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let counts = [
            (GridAxis::Columns, self.columns),
            (GridAxis::Rows, self.rows),
            (GridAxis::Layers, self.layers),
        ];

        if let Some((axis, _)) = counts.iter().find(|(_, count)| *count == 0) {
            return Err(ConfigurationError::EmptyGridAxis { axis: *axis });
        }

        if self.checked_num_points().is_none() {
            return Err(ConfigurationError::GridTooLarge {
                columns: self.columns,
                rows: self.rows,
                layers: self.layers,
            });
        }

        if !(self.min_corner.is_finite() && self.max_corner.is_finite()) {
            return Err(ConfigurationError::NonFiniteGridCorner);
        }

        Ok(())
    }

    /// A grid with point spacing `spacing` that encloses every source position.
    ///
    /// The source extents are snapped outwards to multiples of `spacing`, then
    /// padded by one spacing unit and `buffer` on every side.
    pub fn enclosing(
        samples: &[SourceSample],
        spacing: f64,
        buffer: f64,
    ) -> Result<Self, ConfigurationError> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(ConfigurationError::InvalidGridSpacing { spacing });
        }

        let positions: Vec<Vector3> = samples.iter().map(|s| s.position).collect();
        let (min, max) =
            get_pointarray_extents(&positions).ok_or(ConfigurationError::NoSourceSamples)?;

        if !(min.is_finite() && max.is_finite()) {
            return Err(ConfigurationError::NonFiniteGridCorner);
        }

        let (min_corner, max_corner) = pad_and_snap_extents(&min, &max, &spacing, &buffer);
        // `as usize` saturates, so a huge ratio surfaces as GridTooLarge below
        let count = |lo: f64, hi: f64| (((hi - lo) / spacing).round() as usize).saturating_add(1);

        let grid = GridParams {
            columns: count(min_corner.x, max_corner.x),
            rows: count(min_corner.y, max_corner.y),
            layers: count(min_corner.z, max_corner.z),
            min_corner,
            max_corner,
        };
        grid.validate()?;

        Ok(grid)
    }
}

impl Default for GridParams {
    fn default() -> Self {
        GridParamsBuilder::new().build()
    }
}

/// A convenience builder for constructing a [`GridParams`] instance.
///
/// The builder should be called via the [`GridParams::builder`] method.
#[derive(Debug, Clone, Copy)]
pub struct GridParamsBuilder {
    pub columns: usize,
    pub rows: usize,
    pub layers: usize,
    pub min_corner: Vector3,
    pub max_corner: Vector3,
}

impl GridParamsBuilder {
    fn new() -> Self {
        Self {
            columns: 2,
            rows: 2,
            layers: 2,
            min_corner: Vector3::new(-10.0, 10.0, -10.0),
            max_corner: Vector3::new(10.0, 10.0, 10.0),
        }
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn layers(mut self, layers: usize) -> Self {
        self.layers = layers;
        self
    }

    pub fn min_corner(mut self, min_corner: impl Into<Vector3>) -> Self {
        self.min_corner = min_corner.into();
        self
    }

    pub fn max_corner(mut self, max_corner: impl Into<Vector3>) -> Self {
        self.max_corner = max_corner.into();
        self
    }

    /// Builds and returns a [`GridParams`] instance.
    ///
    /// No validation happens here; see [`GridParams::validate`].
    pub fn build(self) -> GridParams {
        GridParams {
            columns: self.columns,
            rows: self.rows,
            layers: self.layers,
            min_corner: self.min_corner,
            max_corner: self.max_corner,
        }
    }
}

/// Engine level configuration: how to fit, and where to sample.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Params {
    /// Kernel and solver settings for the interpolator.
    pub interpolant_settings: InterpolantSettings,

    /// Layout of the sample grid.
    pub grid: GridParams,
}

impl Params {
    /// Returns a new [`ParamsBuilder`] with default settings.
    pub fn builder() -> ParamsBuilder {
        ParamsBuilder::new()
    }
}

/// A convenience builder for constructing a [`Params`] instance.
///
/// The builder should be called via the [`Params::builder`] method.
#[derive(Debug, Clone, Copy)]
pub struct ParamsBuilder {
    pub interpolant_settings: InterpolantSettings,
    pub grid: GridParams,
}

impl ParamsBuilder {
    fn new() -> Self {
        Self {
            interpolant_settings: InterpolantSettings::default(),
            grid: GridParams::default(),
        }
    }

    /// Sets the interpolant settings.
    pub fn interpolant_settings(mut self, interpolant_settings: InterpolantSettings) -> Self {
        self.interpolant_settings = interpolant_settings;
        self
    }

    /// Sets the grid layout.
    pub fn grid(mut self, grid: GridParams) -> Self {
        self.grid = grid;
        self
    }

    /// Builds and returns a [`Params`] instance.
    pub fn build(self) -> Params {
        Params {
            interpolant_settings: self.interpolant_settings,
            grid: self.grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_matches_scene_layout() {
        let grid = GridParams::default();

        assert_eq!((grid.columns, grid.rows, grid.layers), (2, 2, 2));
        assert_eq!(grid.min_corner, Vector3::new(-10.0, 10.0, -10.0));
        assert_eq!(grid.max_corner, Vector3::new(10.0, 10.0, 10.0));
        assert_eq!(grid.num_points(), 8);
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn empty_axis_is_rejected() {
        let grid = GridParams::builder().columns(4).rows(0).layers(3).build();

        assert_eq!(
            grid.validate(),
            Err(ConfigurationError::EmptyGridAxis { axis: GridAxis::Rows })
        );
        assert_eq!(grid.num_points(), 0);
    }

    #[test]
    fn non_finite_corner_is_rejected() {
        let grid = GridParams::builder()
            .max_corner([1.0, f64::INFINITY, 1.0])
            .build();

        assert_eq!(grid.validate(), Err(ConfigurationError::NonFiniteGridCorner));
    }

    #[test]
    fn overflowing_point_count_is_rejected() {
        let grid = GridParams::builder()
            .columns(usize::MAX / 2 + 1)
            .rows(2)
            .layers(1)
            .build();

        assert_eq!(grid.checked_num_points(), None);
        assert_eq!(grid.num_points(), usize::MAX);
        assert_eq!(
            grid.validate(),
            Err(ConfigurationError::GridTooLarge {
                columns: usize::MAX / 2 + 1,
                rows: 2,
                layers: 1,
            })
        );
    }

    #[test]
    fn enclosing_grid_with_tiny_spacing_is_too_large() {
        let samples = vec![
            SourceSample::from(([0.0, 0.0, 0.0], [1.0, 0.0, 0.0])),
            SourceSample::from(([5.0, 5.0, 5.0], [0.0, 1.0, 0.0])),
        ];

        assert!(matches!(
            GridParams::enclosing(&samples, 1e-290, 0.0),
            Err(ConfigurationError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn enclosing_grid_snaps_and_pads_extents() {
        let samples = vec![
            SourceSample::from(([0.4, 0.0, 1.2], [1.0, 0.0, 0.0])),
            SourceSample::from(([3.6, 0.0, 2.9], [0.0, 0.0, 1.0])),
        ];

        let grid = GridParams::enclosing(&samples, 1.0, 0.0).unwrap();

        assert_eq!(grid.min_corner, Vector3::new(-1.0, -1.0, 0.0));
        assert_eq!(grid.max_corner, Vector3::new(5.0, 1.0, 4.0));
        assert_eq!((grid.columns, grid.rows, grid.layers), (7, 3, 5));
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn enclosing_grid_requires_positive_spacing_and_samples() {
        let samples = vec![SourceSample::from(([0.0; 3], [1.0, 0.0, 0.0]))];

        assert_eq!(
            GridParams::enclosing(&samples, 0.0, 0.0),
            Err(ConfigurationError::InvalidGridSpacing { spacing: 0.0 })
        );
        assert_eq!(
            GridParams::enclosing(&[], 1.0, 0.0),
            Err(ConfigurationError::NoSourceSamples)
        );
    }
}
