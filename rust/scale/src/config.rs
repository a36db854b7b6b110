// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tuning parameters for scale detection

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the scale detection pipeline
///
/// All values are empirical. Missing fields in a JSON document fall back
/// to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Samples brighter than this (0-255, mean of R, G, B) are open floor;
    /// anything at or below it is wall
    pub wall_brightness: f64,
    /// Pixels skipped outside the text box before scanning starts
    pub scan_padding: u32,
    /// Minimum room width and height in pixels
    pub min_room_extent: f64,
    /// Largest accepted fractional disagreement between axis scales
    pub max_deviation: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            wall_brightness: 180.0,
            scan_padding: 2,
            min_room_extent: 20.0,
            max_deviation: 0.25,
        }
    }
}

impl DetectionConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=255.0).contains(&self.wall_brightness) {
            return Err(Error::InvalidConfig(format!(
                "wall_brightness must be within 0..=255, got {}",
                self.wall_brightness
            )));
        }
        if !self.min_room_extent.is_finite() || self.min_room_extent < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_room_extent must be a non-negative number, got {}",
                self.min_room_extent
            )));
        }
        if !self.max_deviation.is_finite() || self.max_deviation < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max_deviation must be a non-negative number, got {}",
                self.max_deviation
            )));
        }
        Ok(())
    }
}
