// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scale consistency scoring
//!
//! Dividing each pixel extent by its real-world length gives two
//! independent scale estimates. For a correct match they agree; the
//! fractional disagreement is the candidate's deviation.

use crate::config::DetectionConfig;
use crate::types::{GeometryMatch, Orientation, RejectReason, ScaleCandidate};

const CM_PER_METER: f64 = 100.0;

/// Scale and deviation for one width/height assignment
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisFit {
    scale: f64,
    deviation: f64,
}

impl AxisFit {
    fn new(pixel_width: f64, pixel_height: f64, width_m: f64, height_m: f64) -> Self {
        let scale_w = pixel_width / (width_m * CM_PER_METER);
        let scale_h = pixel_height / (height_m * CM_PER_METER);
        let mean = (scale_w + scale_h) / 2.0;
        Self {
            scale: mean,
            deviation: (scale_w - scale_h).abs() / mean,
        }
    }
}

/// Score a geometry match under both orientations and keep the better one.
///
/// The written order of the two dimensions says nothing about which one is
/// horizontal, so both assignments are tried. The as-written orientation is
/// kept only when its deviation is strictly lower; on a tie the swapped
/// orientation wins.
pub fn score_match(
    found: GeometryMatch,
    config: &DetectionConfig,
) -> Result<ScaleCandidate, RejectReason> {
    let GeometryMatch {
        candidate,
        room,
        pixel_width,
        pixel_height,
    } = found;

    let as_written = AxisFit::new(pixel_width, pixel_height, candidate.meter_a, candidate.meter_b);
    let swapped = AxisFit::new(pixel_width, pixel_height, candidate.meter_b, candidate.meter_a);

    let (fit, orientation) = if as_written.deviation < swapped.deviation {
        (as_written, Orientation::AsWritten)
    } else {
        (swapped, Orientation::Swapped)
    };

    if !fit.deviation.is_finite() || !fit.scale.is_finite() || fit.scale <= 0.0 {
        return Err(RejectReason::LowConfidence);
    }
    if fit.deviation > config.max_deviation {
        return Err(RejectReason::LowConfidence);
    }

    Ok(ScaleCandidate {
        candidate,
        room,
        pixel_width,
        pixel_height,
        scale: fit.scale,
        deviation: fit.deviation,
        orientation,
    })
}
