/////////////////////////////////////////////////////////////////////////////////////////////
//
// Defines shared helpers for random sample generation, extent padding, and CSV I/O.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

use crate::{field::FieldSample, rbf::SourceSample};
use csv::{ReaderBuilder, Writer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::fs::File;
use std::path::Path;
use steerfield_rbf_utils::Vector3;

/// Round a value down to the nearest multiple of resolution
pub(crate) fn round_down(value: &f64, resolution: &f64) -> f64 {
    (value / resolution).floor() * resolution
}

/// Round a value up to the nearest multiple of resolution
pub(crate) fn round_up(value: &f64, resolution: &f64) -> f64 {
    (value / resolution).ceil() * resolution
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn random_in_box(rng: &mut StdRng, min: &Vector3, max: &Vector3) -> Vector3 {
    let mut lerp = |lo: f64, hi: f64| -> f64 {
        let t: f64 = rng.random_range(0.0..1.0);
        lo + (hi - lo) * t
    };
    Vector3::new(lerp(min.x, max.x), lerp(min.y, max.y), lerp(min.z, max.z))
}

/// Generate `n` random points inside the box `[min, max)`.
///
/// # Parameters
/// - `seed`: Optional random seed.
///   - If `Some(seed)` is provided, the same sequence of points will be generated
///     deterministically across runs and platforms (useful for reproducible tests).
///   - If `None`, the generator is seeded from the operating system's randomness source.
///
/// # Example
/// ```
/// use steerfield_rbf::generate_random_points;
/// use steerfield_rbf_utils::Vector3;
///
/// let pts = generate_random_points(100, Vector3::ZERO, Vector3::new(1.0, 1.0, 1.0), Some(42));
/// assert_eq!(pts.len(), 100);
/// ```
pub fn generate_random_points(n: usize, min: Vector3, max: Vector3, seed: Option<u64>) -> Vec<Vector3> {
    let mut rng = seeded_rng(seed);

    (0..n).map(|_| random_in_box(&mut rng, &min, &max)).collect()
}

/// Generate `n` random source samples with positions inside `[min, max)` and
/// vector components in `[-1, 1)`.
pub fn generate_random_samples(n: usize, min: Vector3, max: Vector3, seed: Option<u64>) -> Vec<SourceSample> {
    let mut rng = seeded_rng(seed);
    let unit_min = Vector3::new(-1.0, -1.0, -1.0);
    let unit_max = Vector3::new(1.0, 1.0, 1.0);

    (0..n)
        .map(|_| {
            let position = random_in_box(&mut rng, &min, &max);
            let vector = random_in_box(&mut rng, &unit_min, &unit_max);
            SourceSample::new(position, vector)
        })
        .collect()
}

/// Pads and snaps 3D extents to the nearest multiple of resolution,
/// then expands the bounds by one resolution unit and the given buffer.
///
/// # Returns
/// The padded and snapped `(min, max)` corners.
pub fn pad_and_snap_extents(
    min: &Vector3,
    max: &Vector3,
    resolution: &f64,
    buffer: &f64,
) -> (Vector3, Vector3) {
    let lower = |v: f64| round_down(&v, resolution) - resolution - buffer;
    let upper = |v: f64| round_up(&v, resolution) + resolution + buffer;

    (
        Vector3::new(lower(min.x), lower(min.y), lower(min.z)),
        Vector3::new(upper(max.x), upper(max.y), upper(max.z)),
    )
}

/// Load source samples from a CSV file with columns `X, Y, Z, VX, VY, VZ`.
///
/// # Arguments
/// * `file_path` - Path to the CSV file.
/// * `has_headers` - Whether the file has a single header row to skip.
pub fn csv_to_source_samples<P: AsRef<Path>>(
    file_path: P,
    has_headers: bool,
) -> Result<Vec<SourceSample>, Box<dyn Error>> {
    let file = File::open(file_path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(has_headers)
        .from_reader(file);

    let mut samples = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.len() != 6 {
            return Err(format!(
                "expected 6 columns (X, Y, Z, VX, VY, VZ), found {}",
                record.len()
            )
            .into());
        }

        let mut values = [0.0; 6];
        for (slot, value) in values.iter_mut().zip(record.iter()) {
            *slot = value.trim().parse()?;
        }

        samples.push(SourceSample::new(
            Vector3::new(values[0], values[1], values[2]),
            Vector3::new(values[3], values[4], values[5]),
        ));
    }

    Ok(samples)
}

/// Write sampled field vectors to a CSV file.
///
/// Each row holds the grid point followed by its vector, with headers
/// `X, Y, Z, VX, VY, VZ`.
///
/// # Errors
/// Returns an error if writing to disk fails.
pub fn field_samples_to_csv<P: AsRef<Path>>(
    samples: &[FieldSample],
    filename: P,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_path(filename)?;

    wtr.write_record(["X", "Y", "Z", "VX", "VY", "VZ"])?;

    for sample in samples {
        let record: Vec<String> = sample
            .point
            .to_array()
            .iter()
            .chain(sample.vector.to_array().iter())
            .map(|c| c.to_string())
            .collect();
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_generation_is_reproducible() {
        let max = Vector3::new(2.0, 3.0, 4.0);
        let a = generate_random_samples(16, Vector3::ZERO, max, Some(5));
        let b = generate_random_samples(16, Vector3::ZERO, max, Some(5));

        assert_eq!(a, b);
        for s in &a {
            assert!(s.position.x >= 0.0 && s.position.x < 2.0);
            assert!(s.position.y >= 0.0 && s.position.y < 3.0);
            assert!(s.position.z >= 0.0 && s.position.z < 4.0);
            assert!(s.vector.to_array().iter().all(|c| (-1.0..1.0).contains(c)));
        }
    }

    #[test]
    fn degenerate_box_collapses_to_corner() {
        let corner = Vector3::new(1.0, 2.0, 3.0);
        let pts = generate_random_points(4, corner, corner, Some(1));

        assert!(pts.iter().all(|p| *p == corner));
    }

    #[test]
    fn pad_and_snap_expands_by_resolution_and_buffer() {
        let (min, max) = pad_and_snap_extents(
            &Vector3::new(1.5, -2.5, 0.0),
            &Vector3::new(3.2, 4.0, 0.5),
            &1.0,
            &0.5,
        );

        assert_eq!(min, Vector3::new(-0.5, -4.5, -1.5));
        assert_eq!(max, Vector3::new(5.5, 5.5, 2.5));
    }

    #[test]
    fn csv_round_trip_of_field_samples() {
        let samples = vec![
            FieldSample {
                point: Vector3::new(0.0, 1.0, 2.0),
                vector: Vector3::new(0.5, -0.25, 1.0),
            },
            FieldSample {
                point: Vector3::new(-1.0, 0.0, 3.5),
                vector: Vector3::new(0.0, 2.0, -3.0),
            },
        ];

        let path = std::env::temp_dir().join("steerfield_rbf_field_samples.csv");
        field_samples_to_csv(&samples, &path).unwrap();
        let read_back = csv_to_source_samples(&path, true).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(read_back.len(), 2);
        for (s, r) in samples.iter().zip(read_back.iter()) {
            assert_eq!(s.point, r.position);
            assert_eq!(s.vector, r.vector);
        }
    }
}
