/////////////////////////////////////////////////////////////////////////////////////////////
//
// Decodes externally generated steering vectors into source samples.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

//! Decoding of generated steering payloads.
//!
//! A generator describes a flow as a behaviour style plus a list of arrows,
//! each with a start `s` and an end `e`:
//!
//! ```json
//! { "style": "calm", "vectors": [ { "s": {"x": 0, "y": 3, "z": 1}, "e": {"x": 2, "y": 0, "z": 1} } ] }
//! ```
//!
//! Arrows are anchored on the ground plane: the source position is
//! `(s.x, 0, s.z)` and the source vector points from there to `e`.
use crate::rbf::SourceSample;
use serde::{Deserialize, Serialize};
use steerfield_rbf_utils::Vector3;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedCoordinate {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<GeneratedCoordinate> for Vector3 {
    fn from(c: GeneratedCoordinate) -> Self {
        Vector3::new(c.x, c.y, c.z)
    }
}

/// One generated arrow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratedVector {
    /// Start.
    pub s: GeneratedCoordinate,
    /// End.
    pub e: GeneratedCoordinate,
}

impl GeneratedVector {
    pub fn to_source_sample(&self) -> SourceSample {
        let position = Vector3::new(self.s.x, 0.0, self.s.z);
        let head: Vector3 = self.e.into();
        SourceSample::new(position, head - position)
    }
}

/// A decoded generator response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationOutput {
    #[serde(default)]
    pub style: String,

    #[serde(default)]
    pub vectors: Vec<GeneratedVector>,
}

impl GenerationOutput {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_source_samples(&self) -> Vec<SourceSample> {
        self.vectors.iter().map(GeneratedVector::to_source_sample).collect()
    }
}
