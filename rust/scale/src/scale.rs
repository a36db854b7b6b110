// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pixels-per-centimeter scale and its conversions

use crate::error::{Error, Result};
use crate::types::Point2D;
use serde::{Deserialize, Serialize};
use std::fmt;

const CM_PER_FOOT: f64 = 30.48;
const CM_PER_INCH: f64 = 2.54;

/// Unit a stored scale value is expressed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScaleUnit {
    PixelsPerCm,
    PixelsPerFoot,
    PixelsPerInch,
}

/// Image scale in pixels per centimeter
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Scale {
    pixels_per_cm: f64,
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl Scale {
    pub fn new(pixels_per_cm: f64) -> Result<Self> {
        if !positive(pixels_per_cm) {
            return Err(Error::InvalidScale(pixels_per_cm));
        }
        Ok(Self { pixels_per_cm })
    }

    /// Scale from a line drawn over a feature of known length
    pub fn from_reference_line(start: Point2D, end: Point2D, length_cm: f64) -> Result<Self> {
        if !positive(length_cm) {
            return Err(Error::InvalidLength(length_cm));
        }
        let pixel_length = start.distance_to(&end);
        if !pixel_length.is_finite() || pixel_length < 1.0 {
            return Err(Error::InvalidReferenceLine);
        }
        Self::new(pixel_length / length_cm)
    }

    /// Convert a scale stored in another unit
    pub fn from_unit(value: f64, unit: ScaleUnit) -> Result<Self> {
        let per_cm = match unit {
            ScaleUnit::PixelsPerCm => value,
            ScaleUnit::PixelsPerFoot => value / CM_PER_FOOT,
            ScaleUnit::PixelsPerInch => value / CM_PER_INCH,
        };
        Self::new(per_cm)
    }

    pub fn pixels_per_cm(&self) -> f64 {
        self.pixels_per_cm
    }

    /// Rescale for an image drawn at `rendered_width` instead of its native width
    pub fn for_display(&self, rendered_width: f64, native_width: f64) -> Result<Self> {
        if !positive(rendered_width) {
            return Err(Error::InvalidLength(rendered_width));
        }
        if !positive(native_width) {
            return Err(Error::InvalidLength(native_width));
        }
        Self::new(self.pixels_per_cm * rendered_width / native_width)
    }

    pub fn cm_to_pixels(&self, cm: f64) -> f64 {
        cm * self.pixels_per_cm
    }

    pub fn pixels_to_cm(&self, pixels: f64) -> f64 {
        pixels / self.pixels_per_cm
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} px/cm", self.pixels_per_cm)
    }
}
