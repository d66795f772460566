/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines sampled field snapshots and the cache that publishes them to readers.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{error::FieldError, grid::SampleGrid, rbf::FieldInterpolator};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use steerfield_rbf_utils::Vector3;

/// A grid point paired with the interpolated vector there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    pub point: Vector3,
    pub vector: Vector3,
}

/// The full set of field samples produced by one recomputation.
///
/// Sample `i` belongs to grid point `i` of the grid it was computed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// Increases by one with every successful recomputation.
    pub generation: u64,
    pub min_corner: Vector3,
    pub max_corner: Vector3,
    pub samples: Vec<FieldSample>,
}

impl FieldSnapshot {
    /// Evaluates `interpolator` at every point of `grid`.
    ///
    /// With `check_finite` set, a NaN or infinite vector fails the whole
    /// snapshot rather than being stored.
    pub fn compute(
        grid: &SampleGrid,
        interpolator: &FieldInterpolator,
        generation: u64,
        check_finite: bool,
    ) -> Result<Self, FieldError> {
        let points = grid.points();

        let vectors = match check_finite {
            true => interpolator.evaluate_many_checked(&points)?,
            false => interpolator.evaluate_many(&points),
        };

        let samples = points
            .into_iter()
            .zip(vectors)
            .map(|(point, vector)| FieldSample { point, vector })
            .collect();

        let (min_corner, max_corner) = grid.bounds();

        Ok(Self {
            generation,
            min_corner,
            max_corner,
            samples,
        })
    }

    pub fn bounds(&self) -> (Vector3, Vector3) {
        (self.min_corner, self.max_corner)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Holds the most recently published [`FieldSnapshot`].
///
/// Publishing swaps a single handle, so a reader holding a snapshot keeps
/// seeing that complete set while a newer one is published.
#[derive(Debug, Default)]
pub struct FieldCache {
    current: RwLock<Option<Arc<FieldSnapshot>>>,
}

impl FieldCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current snapshot.
    pub fn publish(&self, snapshot: FieldSnapshot) -> Arc<FieldSnapshot> {
        let snapshot = Arc::new(snapshot);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// The current snapshot, if one has been published.
    pub fn snapshot(&self) -> Option<Arc<FieldSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Generation of the current snapshot, if any.
    pub fn generation(&self) -> Option<u64> {
        self.snapshot().map(|s| s.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GridParams, interpolant_config::KernelKind, rbf::SourceSample};
    use std::thread;

    fn snapshot_with(generation: u64, value: f64) -> FieldSnapshot {
        FieldSnapshot {
            generation,
            min_corner: Vector3::ZERO,
            max_corner: Vector3::new(1.0, 1.0, 1.0),
            samples: vec![
                FieldSample {
                    point: Vector3::ZERO,
                    vector: Vector3::new(value, value, value),
                };
                64
            ],
        }
    }

    #[test]
    fn compute_pairs_grid_points_with_vectors() {
        let samples = vec![
            SourceSample::from(([0.0, 0.0, 0.0], [1.0, 0.0, 0.0])),
            SourceSample::from(([10.0, 0.0, 0.0], [-1.0, 0.0, 0.0])),
        ];
        let interpolator = FieldInterpolator::fit(samples, KernelKind::Biharmonic).unwrap();
        let grid = SampleGrid::new(
            GridParams::builder()
                .columns(3)
                .rows(1)
                .layers(1)
                .min_corner([0.0; 3])
                .max_corner([10.0, 0.0, 0.0])
                .build(),
        )
        .unwrap();

        let snapshot = FieldSnapshot::compute(&grid, &interpolator, 1, true).unwrap();

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.bounds(), grid.bounds());
        for (sample, point) in snapshot.samples.iter().zip(grid.iter()) {
            assert_eq!(sample.point, point);
            assert_eq!(sample.vector, interpolator.evaluate(&point));
        }
        assert!((snapshot.samples[0].vector.x - 1.0).abs() < 1e-12);
        assert!(snapshot.samples[1].vector.norm() < 1e-12);
    }

    #[test]
    fn publish_replaces_snapshot_without_touching_held_handles() {
        let cache = FieldCache::new();
        assert!(cache.snapshot().is_none());

        cache.publish(snapshot_with(1, 1.0));
        let held = cache.snapshot().unwrap();

        cache.publish(snapshot_with(2, 2.0));

        assert_eq!(held.generation, 1);
        assert!(held.samples.iter().all(|s| s.vector.x == 1.0));
        assert_eq!(cache.generation(), Some(2));
    }

    #[test]
    fn readers_never_observe_a_mixed_snapshot() {
        let cache = Arc::new(FieldCache::new());
        cache.publish(snapshot_with(0, 0.0));

        let reader = {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for _ in 0..2000 {
                    let snap = cache.snapshot().unwrap();
                    let expected = snap.generation as f64;
                    assert!(snap.samples.iter().all(|s| s.vector.x == expected));
                }
            })
        };

        for generation in 1..200u64 {
            cache.publish(snapshot_with(generation, generation as f64));
        }

        reader.join().unwrap();
        assert_eq!(cache.generation(), Some(199));
    }
}
