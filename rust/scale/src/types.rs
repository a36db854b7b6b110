// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for scale auto-detection

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 2D point in image pixel coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn distance_to(&self, other: &Point2D) -> f64 {
        nalgebra::distance(&self.to_nalgebra(), &other.to_nalgebra())
    }
}

/// Axis-aligned box in pixel coordinates, as reported by the OCR engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BoundingBox {
    /// Create a box, swapping corners if needed so that `x1 >= x0` and `y1 >= y0`
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn normalized(&self) -> Self {
        Self::new(self.x0, self.y0, self.x1, self.y1)
    }

    pub fn center(&self) -> Point2D {
        Point2D::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }
}

/// One recognized text line from the OCR engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrLine {
    pub text: String,
    pub bbox: BoundingBox,
}

impl OcrLine {
    pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// Two room dimensions parsed from text, already normalized to meters.
///
/// The order is the order in which they were written; which one is the
/// room width is decided later by the scorer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionText {
    pub raw_text: String,
    pub value_a: f64,
    pub value_b: f64,
}

/// Dimension text located in the image
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextCandidate {
    pub text: String,
    pub meter_a: f64,
    pub meter_b: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub bbox: BoundingBox,
}

impl TextCandidate {
    pub fn from_dimension(dimension: DimensionText, bbox: BoundingBox) -> Self {
        let center = bbox.center();
        Self {
            text: dimension.raw_text,
            meter_a: dimension.value_a,
            meter_b: dimension.value_b,
            center_x: center.x,
            center_y: center.y,
            bbox,
        }
    }
}

/// Room extents found by scanning outward from a text candidate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeometryMatch {
    pub candidate: TextCandidate,
    /// Box spanned by the four wall hits
    pub room: BoundingBox,
    /// Horizontal distance between the left and right wall hits
    pub pixel_width: f64,
    /// Vertical distance between the top and bottom wall hits
    pub pixel_height: f64,
}

/// Which written dimension was mapped onto the horizontal scan axis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Orientation {
    /// First written value is the room width
    AsWritten,
    /// Second written value is the room width
    Swapped,
}

/// A scored geometry match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScaleCandidate {
    pub candidate: TextCandidate,
    pub room: BoundingBox,
    pub pixel_width: f64,
    pub pixel_height: f64,
    /// Pixels per centimeter in native image coordinates
    pub scale: f64,
    /// Fractional disagreement between the two axis scales (lower is better)
    pub deviation: f64,
    pub orientation: Orientation,
}

impl ScaleCandidate {
    /// Room width and height in meters under the chosen orientation
    pub fn meter_dimensions(&self) -> (f64, f64) {
        match self.orientation {
            Orientation::AsWritten => (self.candidate.meter_a, self.candidate.meter_b),
            Orientation::Swapped => (self.candidate.meter_b, self.candidate.meter_a),
        }
    }

    /// Scale adjusted for an image rendered at `rendered_width` instead of `native_width`
    pub fn display_scale(&self, rendered_width: f64, native_width: f64) -> crate::Result<f64> {
        Ok(crate::Scale::new(self.scale)?
            .for_display(rendered_width, native_width)?
            .pixels_per_cm())
    }
}

impl fmt::Display for ScaleCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" ({}m x {}m): {:.2} px/cm, deviation {:.1}%",
            self.candidate.text,
            self.candidate.meter_a,
            self.candidate.meter_b,
            self.scale,
            self.deviation * 100.0
        )
    }
}

/// Why a text candidate did not produce a scale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RejectReason {
    /// A scan ray reached the image edge before hitting a wall
    BoundaryNotFound,
    /// The enclosing room is smaller than the configured minimum extent
    BelowMinimumExtent,
    /// The two axis scales disagree by more than the allowed deviation
    LowConfidence,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RejectReason::BoundaryNotFound => "wall boundary not found",
            RejectReason::BelowMinimumExtent => "room too small",
            RejectReason::LowConfidence => "axis scales disagree",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rejection {
    pub text: String,
    pub reason: RejectReason,
}

/// Overall outcome of one detection run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DetectionStatus {
    /// No OCR line looked like a room dimension
    NoDimensionText,
    /// Dimension text was found but every candidate was rejected
    NoValidCandidates,
    /// At least one candidate produced a scale
    Found,
}

/// Complete detection result
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DetectionResult {
    /// Lowest-deviation candidate, if any passed
    pub best: Option<ScaleCandidate>,
    /// Every accepted candidate, sorted by ascending deviation
    pub all_candidates: Vec<ScaleCandidate>,
    /// Number of OCR lines that matched the dimension pattern
    pub text_candidates: usize,
    /// Candidates dropped along the way, in OCR order
    pub rejections: Vec<Rejection>,
}

impl DetectionResult {
    pub fn status(&self) -> DetectionStatus {
        if self.best.is_some() {
            DetectionStatus::Found
        } else if self.text_candidates == 0 {
            DetectionStatus::NoDimensionText
        } else {
            DetectionStatus::NoValidCandidates
        }
    }
}
