// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room dimension text extraction from OCR lines
//!
//! Floor plans usually print each room's size inside the room, e.g.
//! `4.0 x 3.5`, `3.6m x 3.0m` or `4000 x 3500`. Authors mix units and OCR
//! drops decimal points, so each number is normalized to meters by
//! magnitude alone.

use crate::types::{DimensionText, OcrLine, TextCandidate};
use regex::Regex;
use std::sync::LazyLock;

/// Two ASCII decimal numbers, each optionally followed by `m`, separated by `x` or `X`
static DIMENSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*m?\s*[xX]\s*([0-9]+(?:\.[0-9]+)?)\s*m?")
        .expect("dimension pattern is valid")
});

/// Convert a raw number to meters by magnitude.
///
/// - `>= 1000`: millimeters
/// - `>= 100`: centimeters
/// - `>= 20`: meters with the decimal point lost (`36` is `3.6`)
/// - otherwise: meters
///
/// A genuine 20m+ room cannot be told apart from a misread decimal point.
pub fn normalize_to_meters(value: f64) -> f64 {
    if value >= 1000.0 {
        value / 1000.0
    } else if value >= 100.0 {
        value / 100.0
    } else if value >= 20.0 {
        value / 10.0
    } else {
        value
    }
}

/// Parse a single line of text as room dimensions
pub fn parse_dimension_text(text: &str) -> Option<DimensionText> {
    let text = text.trim();
    let captures = DIMENSION_PATTERN.captures(text)?;

    let value_a = normalize_to_meters(captures.get(1)?.as_str().parse().ok()?);
    let value_b = normalize_to_meters(captures.get(2)?.as_str().parse().ok()?);

    // A zero dimension can never yield a scale
    if !is_usable(value_a) || !is_usable(value_b) {
        return None;
    }

    Some(DimensionText {
        raw_text: text.to_string(),
        value_a,
        value_b,
    })
}

fn is_usable(meters: f64) -> bool {
    meters.is_finite() && meters > 0.0
}

/// Extract every line that contains room dimensions, in OCR order
pub fn extract_text_candidates(lines: &[OcrLine]) -> Vec<TextCandidate> {
    lines
        .iter()
        .filter_map(|line| {
            if !line.bbox.is_finite() {
                tracing::debug!(text = %line.text, "skipping OCR line with invalid bounding box");
                return None;
            }
            let dimension = parse_dimension_text(&line.text)?;
            let candidate = TextCandidate::from_dimension(dimension, line.bbox.normalized());
            tracing::debug!(
                text = %candidate.text,
                meter_a = candidate.meter_a,
                meter_b = candidate.meter_b,
                "found dimension text"
            );
            Some(candidate)
        })
        .collect()
}
