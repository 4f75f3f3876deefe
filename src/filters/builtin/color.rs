//! Per-pixel color filters: grayscale, invert, brightness and contrast.

use super::map_samples;
use crate::core::error::FilterResult;
use crate::core::types::{Color, PixelBuffer};

/// Rec. 601 luma in integer arithmetic, rounded half-up.
///
/// `(299 R + 587 G + 114 B + 500) / 1000`; the weights sum to 1000 so the
/// result never exceeds 255.
#[inline]
pub fn luma(color: Color) -> u8 {
    let weighted = 299 * color.r as u32 + 587 * color.g as u32 + 114 * color.b as u32;
    ((weighted + 500) / 1000) as u8
}

/// Replace r, g and b with the pixel's luma. Alpha is kept.
pub fn grayscale(buffer: &PixelBuffer) -> FilterResult<PixelBuffer> {
    map_samples(buffer, "grayscale", |c| {
        let y = luma(c);
        Color::rgba(y, y, y, c.a)
    })
}

/// `255 - c` on r, g and b. Alpha is kept.
pub fn invert(buffer: &PixelBuffer) -> FilterResult<PixelBuffer> {
    map_samples(buffer, "invert", |c| c.map_rgb(|v| 255 - v))
}

/// Linear rescale `c * scale + offset` of every channel, alpha included.
///
/// Results are rounded to the nearest integer and clamped to [0, 255].
pub fn rescale(buffer: &PixelBuffer, scale: f32, offset: f32) -> FilterResult<PixelBuffer> {
    rescale_named(buffer, "rescale", scale, offset)
}

/// Add `delta` to every channel, alpha included.
pub fn brightness(buffer: &PixelBuffer, delta: i32) -> FilterResult<PixelBuffer> {
    rescale_named(buffer, "brightness", 1.0, delta as f32)
}

/// Multiply every channel, alpha included, by `factor`.
///
/// This is a raw scale with no centering around mid-gray, so factors above 1
/// brighten and large factors saturate quickly.
pub fn contrast(buffer: &PixelBuffer, factor: f32) -> FilterResult<PixelBuffer> {
    rescale_named(buffer, "contrast", factor, 0.0)
}

fn rescale_named(
    buffer: &PixelBuffer,
    operation: &str,
    scale: f32,
    offset: f32,
) -> FilterResult<PixelBuffer> {
    let (scale, offset) = (scale as f64, offset as f64);
    map_samples(buffer, operation, move |c| {
        c.map(|v| (v as f64 * scale + offset).round().clamp(0.0, 255.0) as u8)
    })
}
