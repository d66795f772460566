/////////////////////////////////////////////////////////////////////////////////////////////
//
// Lookup table of named flocking behaviour presets that accompany generated fields.
//
// Created on: 15 Nov 2025     Author: Daniel Owen 
//
// Copyright (c) 2025, Maptek Pty Ltd. All rights reserved. Licensed under the MIT License. 
//
/////////////////////////////////////////////////////////////////////////////////////////////

use serde::Serialize;

/// Flocking parameters associated with a behaviour style.
///
/// Carried alongside a generated field for consumers that steer agents;
/// interpolation itself never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StylePreset {
    pub name: &'static str,
    pub cohesion_force_factor: f64,
    pub cohesion_radius: f64,
    pub separation_force_factor: f64,
    pub separation_radius: f64,
    pub alignment_force_factor: f64,
    pub alignment_radius: f64,
    pub max_speed: f64,
    pub min_speed: f64,
    pub drag: f64,
    pub has_flow: bool,
    pub has_vector_field: bool,
}

const fn preset(name: &'static str, v: [f64; 9]) -> StylePreset {
    StylePreset {
        name,
        cohesion_force_factor: v[0],
        cohesion_radius: v[1],
        separation_force_factor: v[2],
        separation_radius: v[3],
        alignment_force_factor: v[4],
        alignment_radius: v[5],
        max_speed: v[6],
        min_speed: v[7],
        drag: v[8],
        has_flow: true,
        has_vector_field: true,
    }
}

pub const DEFAULT_STYLE: &str = "calm";

const PRESETS: [StylePreset; 7] = [
    preset("calm", [0.8, 4.0, 0.5, 2.0, 0.7, 3.0, 5.0, 2.0, 0.2]),
    preset("aggressive", [1.2, 3.0, 1.5, 2.5, 1.3, 2.5, 12.0, 6.0, 0.1]),
    preset("exploratory", [0.4, 5.0, 0.8, 2.0, 0.3, 4.0, 8.0, 4.0, 0.15]),
    preset("formation", [1.5, 3.0, 1.2, 1.5, 2.0, 4.0, 6.0, 4.0, 0.1]),
    preset("social", [1.4, 3.5, 0.8, 1.8, 1.2, 4.0, 6.0, 3.0, 0.15]),
    preset("independent", [0.2, 5.0, 1.5, 3.0, 0.3, 4.0, 7.0, 4.0, 0.1]),
    preset("chaotic", [0.4, 4.0, 1.2, 2.5, 0.3, 3.5, 11.0, 5.0, 0.05]),
];

/// Names of every known style, in table order.
pub const AVAILABLE_STYLES: [&str; 7] = [
    "calm",
    "aggressive",
    "exploratory",
    "formation",
    "social",
    "independent",
    "chaotic",
];

/// Case-insensitive lookup.
pub fn find_preset(name: &str) -> Option<&'static StylePreset> {
    let name = name.trim();
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Like [`find_preset`], falling back to the `calm` preset for unknown names.
pub fn get_preset(name: &str) -> &'static StylePreset {
    find_preset(name).unwrap_or(&PRESETS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_style_resolves() {
        for name in AVAILABLE_STYLES {
            assert_eq!(find_preset(name).map(|p| p.name), Some(name));
        }
        assert_eq!(PRESETS[0].name, DEFAULT_STYLE);
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let p = get_preset("  Aggressive ");

        assert_eq!(p.name, "aggressive");
        assert_eq!(p.max_speed, 12.0);
        assert_eq!(p.min_speed, 6.0);
    }

    #[test]
    fn unknown_style_falls_back_to_calm() {
        assert!(find_preset("sleepy").is_none());

        let p = get_preset("sleepy");
        assert_eq!(p.name, "calm");
        assert_eq!(p.drag, 0.2);
        assert!(p.has_flow && p.has_vector_field);
    }
}
