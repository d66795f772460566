/////////////////////////////////////////////////////////////////////////////////////////////
//
// Host-facing engine that owns the sources, refits the field, and publishes sampled snapshots.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! The call surface a host (renderer, agent simulation) drives.
//!
//! Setters only record the new configuration; nothing is applied until
//! [`VectorFieldEngine::recompute`] runs the whole pipeline: fit the three axis
//! systems, evaluate the sample grid, publish the snapshot. Readers on other
//! threads take a handle from [`VectorFieldEngine::cache`] and always see a
//! complete snapshot.
use crate::{
    config::{GridParams, Params},
    error::{ConfigurationError, FieldError},
    field::{FieldCache, FieldSnapshot},
    generated::GenerationOutput,
    grid::SampleGrid,
    interpolant_config::KernelKind,
    progress::{self, ProgressMsg, ProgressSink},
    rbf::{FieldInterpolator, SourceSample},
};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use steerfield_rbf_utils::Vector3;

/// Outcome of a successful [`VectorFieldEngine::recompute`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecomputeSummary {
    /// Generation of the snapshot now published.
    pub generation: u64,
    pub num_sources: usize,
    pub num_grid_points: usize,
    /// `false` when nothing had changed and the published field was kept.
    pub recomputed: bool,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct VectorFieldEngine {
    params: Params,
    grid: SampleGrid,
    sources: Vec<SourceSample>,
    interpolator: Option<FieldInterpolator>,
    cache: Arc<FieldCache>,
    generation: u64,
    dirty: bool,
    progress_callback: Option<Arc<dyn ProgressSink>>,
}

impl VectorFieldEngine {
    /// Creates an engine with no sources and nothing published.
    pub fn new(params: Params) -> Result<Self, ConfigurationError> {
        params.interpolant_settings.validate()?;
        let grid = SampleGrid::new(params.grid)?;

        Ok(Self {
            params,
            grid,
            sources: Vec::new(),
            interpolator: None,
            cache: Arc::new(FieldCache::new()),
            generation: 0,
            dirty: true,
            progress_callback: None,
        })
    }

    /// Attaches a sink for solve and publication events.
    pub fn with_progress_callback(mut self, progress_callback: Arc<dyn ProgressSink>) -> Self {
        self.progress_callback = Some(progress_callback);
        self
    }

    /// Replaces the whole source set.
    pub fn set_sources<I, S>(&mut self, sources: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<SourceSample>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self.dirty = true;
    }

    /// Replaces the source set with the arrows of a generator response.
    pub fn set_sources_from_generation(&mut self, output: &GenerationOutput) {
        self.set_sources(output.to_source_samples());
    }

    /// Selects the kernel used by the next recompute.
    pub fn set_kernel(&mut self, kernel: KernelKind) -> Result<(), ConfigurationError> {
        kernel.validate()?;
        self.params.interpolant_settings.kernel = kernel;
        self.dirty = true;
        Ok(())
    }

    /// Selects a Gaussian kernel, with the default shape parameter when `beta` is `None`.
    pub fn set_kernel_with_beta(&mut self, beta: Option<f64>) -> Result<(), ConfigurationError> {
        self.set_kernel(KernelKind::gaussian_with_beta(beta))
    }

    /// Changes the sample grid used by the next recompute.
    ///
    /// An invalid layout is rejected here and the current grid is kept.
    pub fn configure_grid(&mut self, grid: GridParams) -> Result<(), ConfigurationError> {
        self.grid = SampleGrid::new(grid)?;
        self.params.grid = grid;
        self.dirty = true;
        Ok(())
    }

    /// Applies pending changes.
    ///
    /// Does nothing when no setter has run since the last successful
    /// recompute. On failure the previous interpolator and snapshot stay in
    /// place and the changes remain pending.
    pub fn recompute(&mut self) -> Result<RecomputeSummary, FieldError> {
        if !self.dirty {
            if let Some(snapshot) = self.cache.snapshot() {
                return Ok(RecomputeSummary {
                    generation: snapshot.generation,
                    num_sources: self.sources.len(),
                    num_grid_points: snapshot.len(),
                    recomputed: false,
                    elapsed: Duration::ZERO,
                });
            }
        }

        let start = Instant::now();

        let (interpolator, snapshot) = match self.run_pipeline() {
            Ok(v) => v,
            Err(e) => {
                progress::emit(
                    &self.progress_callback,
                    ProgressMsg::RecomputeFailed {
                        reason: e.to_string(),
                    },
                );
                return Err(e);
            }
        };

        let elapsed = start.elapsed();
        let summary = RecomputeSummary {
            generation: snapshot.generation,
            num_sources: interpolator.num_points(),
            num_grid_points: snapshot.len(),
            recomputed: true,
            elapsed,
        };

        self.generation = snapshot.generation;
        self.interpolator = Some(interpolator);
        self.cache.publish(snapshot);
        self.dirty = false;

        progress::emit(
            &self.progress_callback,
            ProgressMsg::FieldRecomputed {
                generation: summary.generation,
                num_sources: summary.num_sources,
                num_grid_points: summary.num_grid_points,
                elapsed,
            },
        );

        Ok(summary)
    }

    fn run_pipeline(&self) -> Result<(FieldInterpolator, FieldSnapshot), FieldError> {
        let settings = self.params.interpolant_settings;

        let mut builder = FieldInterpolator::builder(self.sources.clone(), settings);
        if let Some(sink) = &self.progress_callback {
            builder = builder.progress_callback(Arc::clone(sink));
        }
        let interpolator = builder.build()?;

        let snapshot = FieldSnapshot::compute(
            &self.grid,
            &interpolator,
            self.generation + 1,
            settings.check_finite,
        )?;

        Ok((interpolator, snapshot))
    }

    /// The most recently published field, if any.
    pub fn field_samples(&self) -> Option<Arc<FieldSnapshot>> {
        self.cache.snapshot()
    }

    /// Corners of the published field, or of the configured grid before the first publish.
    pub fn bounds(&self) -> (Vector3, Vector3) {
        match self.cache.snapshot() {
            Some(snapshot) => snapshot.bounds(),
            None => self.grid.bounds(),
        }
    }

    /// Shared handle for readers on other threads.
    pub fn cache(&self) -> Arc<FieldCache> {
        Arc::clone(&self.cache)
    }

    /// The interpolator behind the published field.
    pub fn interpolator(&self) -> Option<&FieldInterpolator> {
        self.interpolator.as_ref()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn sources(&self) -> &[SourceSample] {
        &self.sources
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a setter has run since the last successful recompute.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::GridAxis, interpolant_config::InterpolantSettings, linear_system::Axis};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingSink {
        messages: Mutex<Vec<ProgressMsg>>,
    }

    impl ProgressSink for RecordingSink {
        fn emit(&self, msg: ProgressMsg) {
            self.messages.lock().unwrap().push(msg);
        }
    }

    fn line_grid() -> GridParams {
        GridParams::builder()
            .columns(3)
            .rows(1)
            .layers(1)
            .min_corner([0.0; 3])
            .max_corner([10.0, 0.0, 0.0])
            .build()
    }

    fn opposing_sources() -> Vec<([f64; 3], [f64; 3])> {
        vec![
            ([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            ([10.0, 0.0, 0.0], [-1.0, 0.0, 0.0]),
        ]
    }

    fn engine() -> VectorFieldEngine {
        let params = Params::builder().grid(line_grid()).build();
        let mut engine = VectorFieldEngine::new(params).unwrap();
        engine.set_sources(opposing_sources());
        engine
    }

    #[test]
    fn recompute_without_sources_publishes_nothing() {
        let mut engine = VectorFieldEngine::new(Params::default()).unwrap();

        let err = engine.recompute().unwrap_err();

        assert_eq!(err, FieldError::Configuration(ConfigurationError::NoSourceSamples));
        assert!(engine.field_samples().is_none());
        assert!(engine.interpolator().is_none());
        assert_eq!(engine.bounds(), (Vector3::new(-10.0, 10.0, -10.0), Vector3::new(10.0, 10.0, 10.0)));
    }

    #[test]
    fn recompute_publishes_then_is_idempotent() {
        let mut engine = engine();

        let first = engine.recompute().unwrap();
        assert!(first.recomputed);
        assert_eq!(first.generation, 1);
        assert_eq!(first.num_sources, 2);
        assert_eq!(first.num_grid_points, 3);
        assert!(!engine.is_dirty());

        let second = engine.recompute().unwrap();
        assert!(!second.recomputed);
        assert_eq!(second.generation, 1);

        let snapshot = engine.field_samples().unwrap();
        assert_eq!(snapshot.generation, 1);
        assert!((snapshot.samples[0].vector.x - 1.0).abs() < 1e-12);
        assert!(snapshot.samples[1].vector.norm() < 1e-12);
        assert!((snapshot.samples[2].vector.x + 1.0).abs() < 1e-12);
    }

    #[test]
    fn rerun_with_unchanged_inputs_is_bit_identical() {
        let mut engine = engine();
        engine.recompute().unwrap();
        let first = engine.field_samples().unwrap();

        engine.set_sources(opposing_sources());
        let summary = engine.recompute().unwrap();
        assert!(summary.recomputed);
        let second = engine.field_samples().unwrap();

        assert_eq!(second.generation, first.generation + 1);
        assert_eq!(first.samples.len(), second.samples.len());
        for (a, b) in first.samples.iter().zip(second.samples.iter()) {
            let bits = |v: Vector3| v.to_array().map(f64::to_bits);
            assert_eq!(bits(a.point), bits(b.point));
            assert_eq!(bits(a.vector), bits(b.vector));
        }
    }

    #[test]
    fn oversized_grid_is_rejected_and_previous_grid_kept() {
        let mut engine = engine();

        let err = engine
            .configure_grid(GridParams {
                columns: usize::MAX / 2 + 1,
                rows: 2,
                ..line_grid()
            })
            .unwrap_err();

        assert!(matches!(err, ConfigurationError::GridTooLarge { .. }));
        assert_eq!(engine.params().grid, line_grid());
        assert_eq!(engine.recompute().unwrap().num_grid_points, 3);
    }

    #[test]
    fn engine_rejects_invalid_pivot_tolerance() {
        let settings = InterpolantSettings::builder(KernelKind::Biharmonic)
            .pivot_tolerance(f64::NAN)
            .build();
        let params = Params::builder().interpolant_settings(settings).build();

        assert!(matches!(
            VectorFieldEngine::new(params).unwrap_err(),
            ConfigurationError::InvalidPivotTolerance { .. }
        ));
    }

    #[test]
    fn changes_apply_only_on_recompute() {
        let mut engine = engine();
        engine.recompute().unwrap();

        engine.set_sources(vec![
            ([0.0; 3], [0.0, 2.0, 0.0]),
            ([0.0, 0.0, 5.0], [0.0, 2.0, 0.0]),
            ([5.0, 0.0, 0.0], [0.0, 2.0, 0.0]),
        ]);
        assert!(engine.is_dirty());
        assert_eq!(engine.field_samples().unwrap().generation, 1);
        assert_eq!(engine.interpolator().unwrap().num_points(), 2);

        let summary = engine.recompute().unwrap();
        assert_eq!(summary.generation, 2);
        assert_eq!(engine.interpolator().unwrap().num_points(), 3);
    }

    #[test]
    fn kernel_switch_changes_published_field() {
        let mut engine = engine();
        engine.configure_grid(line_grid_with_columns(6)).unwrap();
        engine.recompute().unwrap();
        let biharmonic = engine.field_samples().unwrap();

        engine.set_kernel_with_beta(None).unwrap();
        engine.recompute().unwrap();
        let gaussian = engine.field_samples().unwrap();

        assert_eq!(gaussian.generation, biharmonic.generation + 1);
        // x = 2 is the second grid column
        let b = biharmonic.samples[1].vector;
        let g = gaussian.samples[1].vector;
        assert!((b.x - 0.6).abs() < 1e-12);
        assert!((b - g).norm() > 1e-3);
    }

    #[test]
    fn failed_recompute_keeps_previous_field() {
        let mut engine = engine();
        engine.recompute().unwrap();
        let before = engine.field_samples().unwrap();

        engine.set_sources(vec![
            ([1.0, 1.0, 1.0], [1.0, 0.0, 0.0]),
            ([1.0, 1.0, 1.0], [0.0, 1.0, 0.0]),
        ]);
        let err = engine.recompute().unwrap_err();

        assert!(matches!(err, FieldError::SingularSystem { axis: Axis::X, .. }));
        assert!(engine.is_dirty());
        assert_eq!(engine.generation(), 1);
        assert_eq!(*engine.field_samples().unwrap(), *before);
        assert_eq!(engine.interpolator().unwrap().num_points(), 2);
    }

    #[test]
    fn invalid_settings_are_rejected_immediately() {
        let mut engine = engine();

        assert_eq!(
            engine.configure_grid(line_grid_with_columns(0)),
            Err(ConfigurationError::EmptyGridAxis { axis: GridAxis::Columns })
        );
        assert_eq!(engine.params().grid, line_grid());

        assert_eq!(
            engine.set_kernel_with_beta(Some(-1.0)),
            Err(ConfigurationError::InvalidShapeParameter { beta: -1.0 })
        );
        assert_eq!(engine.params().interpolant_settings.kernel, KernelKind::Biharmonic);
    }

    fn line_grid_with_columns(columns: usize) -> GridParams {
        GridParams { columns, ..line_grid() }
    }

    #[test]
    fn readers_share_the_published_cache() {
        let mut engine = engine();
        let cache = engine.cache();
        assert!(cache.snapshot().is_none());

        engine.recompute().unwrap();

        let from_reader = std::thread::spawn(move || cache.generation())
            .join()
            .unwrap();
        assert_eq!(from_reader, Some(1));
    }

    #[test]
    fn generated_payload_drives_the_field() {
        let output = GenerationOutput::from_json(
            r#"{"style":"calm","vectors":[
                {"s":{"x":-5,"y":2,"z":0},"e":{"x":-3,"y":0,"z":0}},
                {"s":{"x":5,"y":2,"z":0},"e":{"x":5,"y":0,"z":3}}
            ]}"#,
        )
        .unwrap();

        let mut engine = VectorFieldEngine::new(Params::default()).unwrap();
        engine.set_sources_from_generation(&output);
        engine.recompute().unwrap();

        let interpolator = engine.interpolator().unwrap();
        let v = interpolator.evaluate(&Vector3::new(-5.0, 0.0, 0.0));
        assert!((v - Vector3::new(2.0, 0.0, 0.0)).norm() < 1e-9);
        assert_eq!(engine.field_samples().unwrap().len(), 8);
    }

    #[test]
    fn progress_sink_sees_solves_and_publication() {
        let sink = Arc::new(RecordingSink::default());
        let params = Params::builder().grid(line_grid()).build();
        let mut engine = VectorFieldEngine::new(params)
            .unwrap()
            .with_progress_callback(sink.clone());
        engine.set_sources(opposing_sources());

        engine.recompute().unwrap();
        engine.set_sources(Vec::<SourceSample>::new());
        assert!(engine.recompute().is_err());

        let messages = sink.messages.lock().unwrap();
        let solved: Vec<Axis> = messages
            .iter()
            .filter_map(|m| match m {
                ProgressMsg::SystemSolved { axis, .. } => Some(*axis),
                _ => None,
            })
            .collect();
        assert_eq!(solved, Axis::ALL.to_vec());
        assert!(matches!(
            messages[3],
            ProgressMsg::FieldRecomputed { generation: 1, num_sources: 2, num_grid_points: 3, .. }
        ));
        assert!(matches!(messages[4], ProgressMsg::RecomputeFailed { .. }));
    }
}
