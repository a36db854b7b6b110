// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for scale detection.
//!
//! Individual candidates that fail to match are not errors; they are
//! reported as [`crate::Rejection`] values on the detection result.

/// Result type alias for scale operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A detection parameter is out of range.
    #[error("invalid detection config: {0}")]
    InvalidConfig(String),

    /// The reference line has no measurable pixel length.
    #[error("reference line must be at least one pixel long")]
    InvalidReferenceLine,

    /// A real-world length was zero, negative or not a number.
    #[error("length must be a positive number, got {0}")]
    InvalidLength(f64),

    /// A scale value was zero, negative or not a number.
    #[error("scale must be a positive number, got {0}")]
    InvalidScale(f64),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
