// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only pixel access for wall scanning

use image::{ImageBuffer, Luma, Rgb, Rgba, RgbaImage};
use std::ops::Deref;

/// A decoded image the scanner can sample brightness from.
///
/// Coordinates outside the buffer read as 0 (black), so a scan that runs
/// off the image always terminates.
pub trait PixelBuffer {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Brightness (0-255) of an in-bounds pixel
    fn sample(&self, x: u32, y: u32) -> f64;

    fn brightness(&self, x: i64, y: i64) -> f64 {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return 0.0;
        }
        self.sample(x as u32, y as u32)
    }
}

fn mean_rgb(r: u8, g: u8, b: u8) -> f64 {
    (r as f64 + g as f64 + b as f64) / 3.0
}

impl<C> PixelBuffer for ImageBuffer<Rgba<u8>, C>
where
    C: Deref<Target = [u8]>,
{
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn sample(&self, x: u32, y: u32) -> f64 {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        mean_rgb(r, g, b)
    }
}

impl<C> PixelBuffer for ImageBuffer<Rgb<u8>, C>
where
    C: Deref<Target = [u8]>,
{
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn sample(&self, x: u32, y: u32) -> f64 {
        let [r, g, b] = self.get_pixel(x, y).0;
        mean_rgb(r, g, b)
    }
}

impl<C> PixelBuffer for ImageBuffer<Luma<u8>, C>
where
    C: Deref<Target = [u8]>,
{
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn sample(&self, x: u32, y: u32) -> f64 {
        self.get_pixel(x, y).0[0] as f64
    }
}

/// Wrap raw RGBA bytes (4 bytes per pixel, row-major) as an image.
///
/// Pixels past the end of a short slice read as transparent black.
pub fn rgba_buffer(rgba: &[u8], width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let i = (y as usize * width as usize + x as usize) * 4;
        match rgba.get(i..i + 4) {
            Some(px) => Rgba([px[0], px[1], px[2], px[3]]),
            None => Rgba([0, 0, 0, 0]),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage};

    #[test]
    fn test_brightness_is_mean_of_channels() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([255, 0, 0, 255]));

        assert_eq!(img.brightness(0, 0), 255.0);
        assert_eq!(img.brightness(1, 0), 85.0);
    }

    #[test]
    fn test_out_of_bounds_reads_black() {
        let img = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));

        assert_eq!(img.brightness(-1, 0), 0.0);
        assert_eq!(img.brightness(0, -1), 0.0);
        assert_eq!(img.brightness(4, 0), 0.0);
        assert_eq!(img.brightness(0, 4), 0.0);
        assert_eq!(img.brightness(3, 3), 255.0);
    }

    #[test]
    fn test_gray_uses_luma_directly() {
        let img = GrayImage::from_pixel(1, 1, Luma([200]));
        assert_eq!(img.brightness(0, 0), 200.0);
    }

    #[test]
    fn test_rgba_buffer() {
        let rgba = vec![
            255, 255, 255, 255, // White
            0, 0, 0, 255, // Black
            255, 0, 0, 255, // Red
        ];

        let img = rgba_buffer(&rgba, 2, 2);

        assert_eq!(img.brightness(0, 0), 255.0);
        assert_eq!(img.brightness(1, 0), 0.0);
        assert_eq!(img.brightness(0, 1), 85.0);
        // Missing fourth pixel
        assert_eq!(img.brightness(1, 1), 0.0);
    }
}
