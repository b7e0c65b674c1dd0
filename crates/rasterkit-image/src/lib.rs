#![deny(missing_docs)]
//! Image types with dual-encoding pixel storage and aliasing sub-image views

/// Per-pixel channel tuples.
pub mod color;

/// Error types for the image module.
pub mod error;

/// Sizes, points and rectangles for addressing pixels and sub-regions.
pub mod geometry;

/// Image views over shared pixel storage.
pub mod image;

/// Dense row-major sample buffers with narrow and wide encodings.
pub mod storage;

pub use crate::color::Color;
pub use crate::error::ImageError;
pub use crate::geometry::{ImageSize, Point, Rect};
pub use crate::image::{Image, SAMPLE_EPSILON};
pub use crate::storage::{quantize_u8, PixelData, PixelEncoding, PixelStorage};
