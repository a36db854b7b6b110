// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall boundary scanning around dimension text
//!
//! Dimension text sits roughly in the middle of its room, and walls are
//! drawn darker than the floor. Walking outward from the text box in the
//! four axis directions until the first dark pixel gives the room's pixel
//! extents.

use crate::config::DetectionConfig;
use crate::pixels::PixelBuffer;
use crate::types::{BoundingBox, GeometryMatch, RejectReason, TextCandidate};

/// Walk from `start` in `step` increments while `inside` and `open` hold.
/// Returns the position where the walk stopped.
fn walk(start: i64, step: i64, inside: impl Fn(i64) -> bool, open: impl Fn(i64) -> bool) -> i64 {
    let mut pos = start;
    while inside(pos) && open(pos) {
        pos += step;
    }
    pos
}

/// First pixel of a walk, offset from a box edge and clamped to `[-1, limit]`.
/// Positions outside that range stop a walk immediately either way.
fn scan_start(edge: f64, offset: i64, limit: i64) -> i64 {
    (edge.floor() as i64).saturating_add(offset).clamp(-1, limit)
}

/// Scan outward from a text candidate to the surrounding walls.
///
/// Scans start `scan_padding` pixels outside the text box so the text's own
/// glyphs are not mistaken for walls. Horizontal scans run along the box's
/// center row, vertical scans along its center column.
///
/// Fails with [`RejectReason::BoundaryNotFound`] if any scan reaches the
/// image edge, and with [`RejectReason::BelowMinimumExtent`] if the room is
/// narrower or shorter than `min_room_extent`.
pub fn scan_walls<P: PixelBuffer + ?Sized>(
    candidate: &TextCandidate,
    pixels: &P,
    config: &DetectionConfig,
) -> Result<GeometryMatch, RejectReason> {
    let width = pixels.width() as i64;
    let height = pixels.height() as i64;
    let padding = config.scan_padding as i64;
    let threshold = config.wall_brightness;

    let center_x = candidate.center_x.floor() as i64;
    let center_y = candidate.center_y.floor() as i64;
    let bbox = &candidate.bbox;

    let open_row = |x: i64| pixels.brightness(x, center_y) > threshold;
    let open_column = |y: i64| pixels.brightness(center_x, y) > threshold;

    let left = walk(scan_start(bbox.x0, -padding, width), -1, |x| x > 0, open_row);
    let right = walk(scan_start(bbox.x1, padding, width), 1, |x| x < width, open_row);
    let top = walk(scan_start(bbox.y0, -padding, height), -1, |y| y > 0, open_column);
    let bottom = walk(scan_start(bbox.y1, padding, height), 1, |y| y < height, open_column);

    if left <= 0 || right >= width || top <= 0 || bottom >= height {
        return Err(RejectReason::BoundaryNotFound);
    }

    let pixel_width = (right - left) as f64;
    let pixel_height = (bottom - top) as f64;

    if pixel_width < config.min_room_extent || pixel_height < config.min_room_extent {
        return Err(RejectReason::BelowMinimumExtent);
    }

    Ok(GeometryMatch {
        candidate: candidate.clone(),
        room: BoundingBox::new(left as f64, top as f64, right as f64, bottom as f64),
        pixel_width,
        pixel_height,
    })
}
