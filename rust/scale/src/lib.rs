// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor plan scale auto-detection
//!
//! Floor plans often print room sizes inside each room (`4.0 x 3.5`). This
//! crate pairs such OCR text with the walls around it to estimate the
//! drawing's scale in pixels per centimeter:
//! 1. Extract dimension text from OCR lines and normalize it to meters
//! 2. Scan outward from each text box to the enclosing walls
//! 3. Score both width/height assignments and keep the consistent ones
//! 4. Rank candidates by deviation
//!
//! OCR itself and image decoding happen outside this crate.
//!
//! # Usage
//!
//! ```rust,ignore
//! use floorplan_scale::{detect_scale, DetectionConfig, OcrLine};
//!
//! let result = detect_scale(&ocr_lines, &rgba_image, &DetectionConfig::default())?;
//! if let Some(best) = &result.best {
//!     let on_screen = best.display_scale(rendered_width, native_width)?;
//! }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod pixels;
pub mod scale;
pub mod scorer;
pub mod text_candidates;
pub mod types;
pub mod wall_scanner;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types and functions
pub use config::DetectionConfig;
pub use error::{Error, Result};
pub use pipeline::detect_scale;
pub use pixels::{rgba_buffer, PixelBuffer};
pub use scale::{Scale, ScaleUnit};
pub use scorer::score_match;
pub use text_candidates::{extract_text_candidates, normalize_to_meters, parse_dimension_text};
pub use types::{
    BoundingBox, DetectionResult, DetectionStatus, DimensionText, GeometryMatch, OcrLine,
    Orientation, Point2D, RejectReason, Rejection, ScaleCandidate, TextCandidate,
};
pub use wall_scanner::scan_walls;

/// Detect the scale from raw RGBA bytes
///
/// Convenience for callers holding canvas-style pixel data.
///
/// # Arguments
///
/// * `lines` - OCR lines in image pixel coordinates
/// * `rgba_data` - RGBA pixel data (4 bytes per pixel)
/// * `width` - Image width
/// * `height` - Image height
/// * `config` - Detection configuration
pub fn detect_scale_from_rgba(
    lines: &[OcrLine],
    rgba_data: &[u8],
    width: u32,
    height: u32,
    config: &DetectionConfig,
) -> Result<DetectionResult> {
    let pixels = rgba_buffer(rgba_data, width, height);
    detect_scale(lines, &pixels, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_detect_from_rgba() {
        let (width, height) = (400u32, 400u32);
        let mut rgba = vec![255u8; (width * height * 4) as usize];
        let mut wall = |x: u32, y: u32| {
            let i = ((y * width + x) * 4) as usize;
            rgba[i..i + 3].copy_from_slice(&[0, 0, 0]);
        };
        for x in 50..=250 {
            wall(x, 35);
            wall(x, 185);
        }
        for y in 35..=185 {
            wall(50, y);
            wall(250, y);
        }

        let lines = vec![OcrLine::new("4000 x 3000", BoundingBox::new(100.0, 100.0, 200.0, 120.0))];
        let result =
            detect_scale_from_rgba(&lines, &rgba, width, height, &DetectionConfig::default())
                .unwrap();

        let best = result.best.unwrap();
        assert_relative_eq!(best.scale, 0.5, epsilon = 1e-12);
        assert_relative_eq!(best.deviation, 0.0, epsilon = 1e-12);
    }
}
