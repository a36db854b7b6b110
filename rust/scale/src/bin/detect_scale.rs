// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: detect the scale of a floor plan image from OCR output
//!
//! The OCR JSON may be a bare array of `{ "text", "bbox" }` lines, an
//! object with a `lines` array, or a Tesseract.js result
//! (`{ "data": { "lines": [...] } }`).
//!
//! Usage:
//!   detect-scale <image_path> <ocr_json> [options]

use floorplan_scale::{
    detect_scale, BoundingBox, DetectionConfig, DetectionResult, DetectionStatus, Error, OcrLine,
};
use image::{ImageReader, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
struct OcrPage {
    lines: Vec<OcrLine>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OcrInput {
    Lines(Vec<OcrLine>),
    Page(OcrPage),
    Tesseract { data: OcrPage },
}

impl OcrInput {
    fn into_lines(self) -> Vec<OcrLine> {
        match self {
            OcrInput::Lines(lines) => lines,
            OcrInput::Page(page) | OcrInput::Tesseract { data: page } => page.lines,
        }
    }
}

struct Options {
    image_path: String,
    ocr_path: String,
    config_path: Option<String>,
    display_width: Option<f64>,
    json_output: bool,
    debug_path: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let options = parse_options(&args);

    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn parse_options(args: &[String]) -> Options {
    let mut options = Options {
        image_path: args[1].clone(),
        ocr_path: args[2].clone(),
        config_path: None,
        display_width: None,
        json_output: false,
        debug_path: None,
    };

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                options.config_path = Some(option_value(args, i, "--config").to_string());
            }
            "--display-width" => {
                i += 1;
                let value = option_value(args, i, "--display-width");
                match value.parse() {
                    Ok(width) => options.display_width = Some(width),
                    Err(_) => {
                        eprintln!("Invalid display width: {}", value);
                        std::process::exit(1);
                    }
                }
            }
            "--json" => {
                options.json_output = true;
            }
            "--debug" => {
                i += 1;
                options.debug_path = Some(option_value(args, i, "--debug").to_string());
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    options
}

fn option_value<'a>(args: &'a [String], i: usize, name: &str) -> &'a str {
    match args.get(i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {}", name);
            std::process::exit(1);
        }
    }
}

fn run(options: &Options) -> Result<(), Error> {
    let config = match &options.config_path {
        Some(path) => DetectionConfig::from_json(&fs::read_to_string(path)?)?,
        None => DetectionConfig::default(),
    };

    let image = ImageReader::open(&options.image_path)?
        .with_guessed_format()?
        .decode()?
        .to_rgba8();
    tracing::info!(
        path = %options.image_path,
        width = image.width(),
        height = image.height(),
        "image loaded"
    );

    let ocr: OcrInput = serde_json::from_str(&fs::read_to_string(&options.ocr_path)?)?;
    let lines = ocr.into_lines();
    tracing::info!(path = %options.ocr_path, lines = lines.len(), "OCR lines loaded");

    let result = detect_scale(&lines, &image, &config)?;

    if let Some(path) = &options.debug_path {
        save_debug_image(&image, &result, path)?;
    }

    if options.json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result, image.width(), options.display_width)?;
    }

    Ok(())
}

fn print_summary(
    result: &DetectionResult,
    native_width: u32,
    display_width: Option<f64>,
) -> Result<(), Error> {
    match result.status() {
        DetectionStatus::NoDimensionText => {
            println!(
                "No room dimensions found in the image text (looking for '4.0 x 3.5' or '4000 x 3500')."
            );
        }
        DetectionStatus::NoValidCandidates => {
            println!(
                "Found {} dimension text(s) but no matching walls around them:",
                result.text_candidates
            );
            for rejection in &result.rejections {
                println!("  \"{}\": {}", rejection.text, rejection.reason);
            }
        }
        DetectionStatus::Found => {
            println!("Candidates (best first):");
            for (i, candidate) in result.all_candidates.iter().enumerate() {
                println!("  {:2}: {}", i, candidate);
            }
            for rejection in &result.rejections {
                println!("  rejected \"{}\": {}", rejection.text, rejection.reason);
            }

            if let Some(best) = &result.best {
                let (width_m, height_m) = best.meter_dimensions();
                println!();
                println!("Detected scale based on text \"{}\"", best.candidate.text);
                println!("  Dimensions: {}m x {}m", width_m, height_m);
                println!("  Scale: {:.2} px/cm", best.scale);
                if let Some(display_width) = display_width {
                    let shown = best.display_scale(display_width, native_width as f64)?;
                    println!("  Display scale: {:.2} px/cm at {} px wide", shown, display_width);
                }
                println!("  Deviation: {:.1}% (lower is better)", best.deviation * 100.0);
            }
        }
    }
    Ok(())
}

/// Pixel rectangle for `bbox`, cut to a `width` x `height` image.
/// `None` if nothing of the box is visible.
fn to_rect(bbox: &BoundingBox, width: u32, height: u32) -> Option<Rect> {
    if !bbox.is_finite() || width == 0 || height == 0 {
        return None;
    }
    let bbox = bbox.normalized();
    let max_x = f64::from(width - 1);
    let max_y = f64::from(height - 1);
    if bbox.x1 < 0.0 || bbox.y1 < 0.0 || bbox.x0 > max_x || bbox.y0 > max_y {
        return None;
    }

    let x0 = bbox.x0.round().clamp(0.0, max_x);
    let y0 = bbox.y0.round().clamp(0.0, max_y);
    let x1 = bbox.x1.round().clamp(x0, max_x);
    let y1 = bbox.y1.round().clamp(y0, max_y);
    Some(Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32 + 1, (y1 - y0) as u32 + 1))
}

/// Save a copy of the image with text boxes and matched rooms outlined
fn save_debug_image(image: &RgbaImage, result: &DetectionResult, path: &str) -> Result<(), Error> {
    let text_color = Rgba([30, 100, 255, 255]);
    let room_color = Rgba([0, 200, 0, 255]);
    let best_color = Rgba([255, 87, 34, 255]);

    let mut overlay = image.clone();
    for (i, candidate) in result.all_candidates.iter().enumerate() {
        let color = if i == 0 { best_color } else { room_color };
        if let Some(rect) = to_rect(&candidate.room, image.width(), image.height()) {
            draw_hollow_rect_mut(&mut overlay, rect, color);
        }
        if let Some(rect) = to_rect(&candidate.candidate.bbox, image.width(), image.height()) {
            draw_hollow_rect_mut(&mut overlay, rect, text_color);
        }
    }

    overlay.save(Path::new(path))?;
    tracing::info!(path, "debug image saved");
    Ok(())
}

fn print_usage() {
    println!("detect-scale - Detect floor plan scale from OCR dimension text");
    println!();
    println!("Usage:");
    println!("  detect-scale <image_path> <ocr_json> [options]");
    println!();
    println!("Options:");
    println!("  --config <file>        JSON detection config (missing fields use defaults)");
    println!("  --display-width <px>   Also report the scale for the image drawn at this width");
    println!("  --json                 Print the full detection result as JSON");
    println!("  --debug <out.png>      Save an overlay of text boxes and matched rooms");
    println!("  -h, --help             Show this help");
    println!();
    println!("Environment:");
    println!("  RUST_LOG               Log filter (default: info)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_covers_inclusive_box() {
        let rect = to_rect(&BoundingBox::new(50.0, 35.0, 250.0, 185.0), 400, 400).unwrap();
        assert_eq!((rect.left(), rect.top()), (50, 35));
        assert_eq!((rect.width(), rect.height()), (201, 151));
    }

    #[test]
    fn test_rect_is_cut_to_image() {
        let rect = to_rect(&BoundingBox::new(-1e300, 100.0, 1e300, 120.0), 400, 300).unwrap();
        assert_eq!((rect.left(), rect.top()), (0, 100));
        assert_eq!((rect.width(), rect.height()), (400, 21));
    }

    #[test]
    fn test_rect_outside_image_is_skipped() {
        assert!(to_rect(&BoundingBox::new(500.0, 10.0, 600.0, 20.0), 400, 400).is_none());
        assert!(to_rect(&BoundingBox::new(-30.0, -30.0, -10.0, -10.0), 400, 400).is_none());
        assert!(to_rect(&BoundingBox::new(0.0, 0.0, 10.0, 10.0), 0, 0).is_none());

        let nan = BoundingBox {
            x0: f64::NAN,
            y0: 0.0,
            x1: 10.0,
            y1: 10.0,
        };
        assert!(to_rect(&nan, 400, 400).is_none());
    }

    #[test]
    fn test_overlay_survives_huge_candidate_box() {
        let image = RgbaImage::from_pixel(40, 40, Rgba([255, 255, 255, 255]));
        let huge = BoundingBox::new(0.0, 0.0, 1e300, 1e300);
        let rect = to_rect(&huge, image.width(), image.height()).unwrap();
        let mut overlay = image.clone();
        draw_hollow_rect_mut(&mut overlay, rect, Rgba([255, 0, 0, 255]));
        assert_eq!(overlay.get_pixel(39, 39), &Rgba([255, 0, 0, 255]));
    }
}
