// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scale detection pipeline
//!
//! Runs text extraction once, then wall scanning and scoring per
//! candidate. Failed candidates are recorded and skipped; they never abort
//! the run.

use crate::config::DetectionConfig;
use crate::error::Result;
use crate::pixels::PixelBuffer;
use crate::scorer::score_match;
use crate::text_candidates::extract_text_candidates;
use crate::types::{DetectionResult, OcrLine, Rejection, ScaleCandidate};
use crate::wall_scanner::scan_walls;

/// Detect the image scale from OCR lines and the decoded image they came from.
///
/// OCR line coordinates must be in the same pixel space as `pixels`. The
/// returned scale is in native image pixels per centimeter; see
/// [`crate::Scale::for_display`] for on-screen use.
///
/// Only an invalid `config` is an error. Finding nothing is reported through
/// [`DetectionResult::status`].
pub fn detect_scale<P: PixelBuffer + ?Sized>(
    lines: &[OcrLine],
    pixels: &P,
    config: &DetectionConfig,
) -> Result<DetectionResult> {
    config.validate()?;

    let text_candidates = extract_text_candidates(lines);
    let mut accepted: Vec<ScaleCandidate> = Vec::with_capacity(text_candidates.len());
    let mut rejections = Vec::new();

    for candidate in &text_candidates {
        let scored = scan_walls(candidate, pixels, config).and_then(|found| {
            tracing::debug!(
                text = %candidate.text,
                pixel_width = found.pixel_width,
                pixel_height = found.pixel_height,
                "room boundary found"
            );
            score_match(found, config)
        });

        match scored {
            Ok(scale) => {
                tracing::debug!(
                    text = %candidate.text,
                    scale = scale.scale,
                    deviation = scale.deviation,
                    orientation = ?scale.orientation,
                    "scale candidate accepted"
                );
                accepted.push(scale);
            }
            Err(reason) => {
                tracing::debug!(text = %candidate.text, %reason, "scale candidate rejected");
                rejections.push(Rejection {
                    text: candidate.text.clone(),
                    reason,
                });
            }
        }
    }

    // Stable: equal deviations keep OCR order
    accepted.sort_by(|a, b| a.deviation.total_cmp(&b.deviation));

    let result = DetectionResult {
        best: accepted.first().cloned(),
        all_candidates: accepted,
        text_candidates: text_candidates.len(),
        rejections,
    };

    tracing::info!(
        lines = lines.len(),
        text_candidates = result.text_candidates,
        accepted = result.all_candidates.len(),
        best_scale = result.best.as_ref().map(|b| b.scale),
        "scale detection finished"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::{blank_plan, draw_room};
    use crate::types::{BoundingBox, DetectionStatus, RejectReason};
    use approx::assert_relative_eq;

    #[test]
    fn test_no_dimension_text() {
        let img = blank_plan(100, 100);
        let lines = vec![OcrLine::new("Living Room", BoundingBox::new(10.0, 10.0, 50.0, 20.0))];

        let result = detect_scale(&lines, &img, &DetectionConfig::default()).unwrap();

        assert!(result.best.is_none());
        assert!(result.all_candidates.is_empty());
        assert!(result.rejections.is_empty());
        assert_eq!(result.status(), DetectionStatus::NoDimensionText);
    }

    #[test]
    fn test_no_lines() {
        let img = blank_plan(100, 100);
        let result = detect_scale(&[], &img, &DetectionConfig::default()).unwrap();
        assert_eq!(result, DetectionResult::default());
    }

    #[test]
    fn test_ranks_by_deviation() {
        let mut img = blank_plan(600, 400);
        // 200 x 150 px room, exact at 0.5 px/cm for 4 x 3 m
        draw_room(&mut img, 50, 35, 250, 185);
        // 210 x 150 px room, slightly off for 4 x 3 m
        draw_room(&mut img, 300, 35, 510, 185);

        let lines = vec![
            OcrLine::new("4.0 x 3.0", BoundingBox::new(350.0, 100.0, 450.0, 120.0)),
            OcrLine::new("4.0 x 3.0", BoundingBox::new(100.0, 100.0, 200.0, 120.0)),
        ];

        let result = detect_scale(&lines, &img, &DetectionConfig::default()).unwrap();

        assert_eq!(result.status(), DetectionStatus::Found);
        assert_eq!(result.all_candidates.len(), 2);
        let best = result.best.unwrap();
        assert_eq!(best.candidate.center_x, 150.0);
        assert_relative_eq!(best.scale, 0.5, epsilon = 1e-12);
        assert!(result.all_candidates[0].deviation <= result.all_candidates[1].deviation);
    }

    #[test]
    fn test_rejections_do_not_abort_run() {
        let mut img = blank_plan(400, 400);
        draw_room(&mut img, 50, 35, 250, 185);

        let lines = vec![
            // Open to the image edge
            OcrLine::new("5.0 x 5.0", BoundingBox::new(300.0, 300.0, 360.0, 320.0)),
            // Wrong aspect for this room
            OcrLine::new("4.0 x 1.0", BoundingBox::new(100.0, 130.0, 200.0, 150.0)),
            OcrLine::new("4.0 x 3.0", BoundingBox::new(100.0, 100.0, 200.0, 120.0)),
        ];

        let result = detect_scale(&lines, &img, &DetectionConfig::default()).unwrap();

        assert_eq!(result.text_candidates, 3);
        assert_eq!(result.all_candidates.len(), 1);
        assert_eq!(
            result.rejections,
            vec![
                Rejection {
                    text: "5.0 x 5.0".into(),
                    reason: RejectReason::BoundaryNotFound,
                },
                Rejection {
                    text: "4.0 x 1.0".into(),
                    reason: RejectReason::LowConfidence,
                },
            ]
        );
    }

    #[test]
    fn test_all_rejected() {
        let img = blank_plan(400, 400);
        let lines = vec![OcrLine::new("4.0 x 3.0", BoundingBox::new(100.0, 100.0, 200.0, 120.0))];

        let result = detect_scale(&lines, &img, &DetectionConfig::default()).unwrap();

        assert!(result.best.is_none());
        assert_eq!(result.status(), DetectionStatus::NoValidCandidates);
    }

    #[test]
    fn test_invalid_config() {
        let img = blank_plan(10, 10);
        let config = DetectionConfig {
            wall_brightness: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            detect_scale(&[], &img, &config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
