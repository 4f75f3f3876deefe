//! Core value types: colors and the pixel buffer every filter operates on.
//!
//! A [`PixelBuffer`] is a fixed-size, row-major grid of [`Color`] samples.
//! Channels are `u8`, so the [0, 255] range invariant is carried by the type.

use crate::core::error::{FilterError, FilterResult};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Create a color from all four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channels in r, g, b, a order.
    pub const fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build a color from channels in r, g, b, a order.
    pub const fn from_channels(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    /// Apply `f` to every channel, alpha included.
    #[inline]
    pub fn map(self, f: impl Fn(u8) -> u8) -> Self {
        Self::rgba(f(self.r), f(self.g), f(self.b), f(self.a))
    }

    /// Apply `f` to r, g and b, keeping alpha.
    #[inline]
    pub fn map_rgb(self, f: impl Fn(u8) -> u8) -> Self {
        Self::rgba(f(self.r), f(self.g), f(self.b), self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(p: image::Rgba<u8>) -> Self {
        Color::from_channels(p.0)
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(c: Color) -> Self {
        image::Rgba(c.channels())
    }
}

/// A width x height grid of RGBA samples stored row-major.
///
/// Buffers handed out by a session are shared behind `Arc` and never mutated;
/// `set_pixel` needs `&mut self` and is only meant for buffers under
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<Color>,
}

impl PixelBuffer {
    /// Create a buffer with every sample set to `fill`.
    ///
    /// Zero-area buffers are allowed here; kernel ops reject them.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            samples: vec![fill; width as usize * height as usize],
        }
    }

    /// Wrap existing row-major samples.
    pub fn from_samples(width: u32, height: u32, samples: Vec<Color>) -> FilterResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| {
                FilterError::invalid_input(
                    "from_samples",
                    format!("{}x{} overflows the address space", width, height),
                )
            })?;

        if samples.len() != expected {
            return Err(FilterError::invalid_input(
                "from_samples",
                format!(
                    "{}x{} buffer needs {} samples, got {}",
                    width,
                    height,
                    expected,
                    samples.len()
                ),
            ));
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every position.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
        let mut samples = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                samples.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            samples,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of samples.
    pub fn area(&self) -> usize {
        self.samples.len()
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// All samples, row-major.
    pub fn samples(&self) -> &[Color] {
        &self.samples
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        // chunks(0) panics; an empty buffer has no rows either way
        self.samples.chunks(self.width.max(1) as usize)
    }

    /// Iterate over `(x, y, color)`.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let width = self.width.max(1);
        self.samples
            .iter()
            .enumerate()
            .map(move |(i, c)| ((i as u32) % width, (i as u32) / width, *c))
    }

    /// Read the sample at `(x, y)`.
    pub fn get_pixel(&self, x: u32, y: u32) -> FilterResult<Color> {
        let index = self.index_of("get_pixel", x, y)?;
        Ok(self.samples[index])
    }

    /// Overwrite the sample at `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> FilterResult<()> {
        let index = self.index_of("set_pixel", x, y)?;
        self.samples[index] = color;
        Ok(())
    }

    /// Fail with `InvalidInput` when the buffer has zero area.
    pub fn ensure_not_empty(&self, operation: &str) -> FilterResult<()> {
        if self.is_empty() {
            return Err(FilterError::invalid_input(
                operation,
                format!("buffer is {}x{}", self.width, self.height),
            ));
        }
        Ok(())
    }

    /// Sample at `(x, y)` with coordinates clamped into the buffer.
    ///
    /// Caller guarantees the buffer is not empty.
    #[inline]
    pub(crate) fn clamped(&self, x: i64, y: i64) -> Color {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.samples[y * self.width as usize + x]
    }

    fn index_of(&self, operation: &str, x: u32, y: u32) -> FilterResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(FilterError::OutOfRange {
                operation: operation.to_string(),
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }
}

impl From<&RgbaImage> for PixelBuffer {
    fn from(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            samples: image.pixels().map(|p| Color::from(*p)).collect(),
        }
    }
}

impl From<&PixelBuffer> for RgbaImage {
    fn from(buffer: &PixelBuffer) -> Self {
        let raw: Vec<u8> = buffer.samples.iter().flat_map(|c| c.channels()).collect();
        // Length is width * height * 4 by the buffer invariant.
        RgbaImage::from_raw(buffer.width, buffer.height, raw)
            .unwrap_or_else(|| RgbaImage::new(buffer.width, buffer.height))
    }
}

impl fmt::Display for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PixelBuffer({}x{})", self.width, self.height)
    }
}
