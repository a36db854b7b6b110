// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synthetic floor plans for unit tests

use crate::types::{BoundingBox, DimensionText, TextCandidate};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

const WALL: Rgba<u8> = Rgba([0, 0, 0, 255]);
const FLOOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub(crate) fn blank_plan(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, FLOOR)
}

/// Draw a 1px wall outline with inclusive corners `(x0, y0)` and `(x1, y1)`
pub(crate) fn draw_room(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32) {
    let rect = Rect::at(x0, y0).of_size((x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32);
    draw_hollow_rect_mut(img, rect, WALL);
}

pub(crate) fn candidate_at(bbox: BoundingBox, meter_a: f64, meter_b: f64) -> TextCandidate {
    TextCandidate::from_dimension(
        DimensionText {
            raw_text: format!("{} x {}", meter_a, meter_b),
            value_a: meter_a,
            value_b: meter_b,
        },
        bbox,
    )
}
