//! 3x3 convolution and the fixed blur kernel.

use super::build_rows;
use crate::core::error::{FilterError, FilterResult};
use crate::core::types::{Color, PixelBuffer};
use serde::{Deserialize, Serialize};

/// A 3x3 kernel with integer weights and a common divisor.
///
/// Weights are row-major, centered on the output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kernel3x3 {
    pub weights: [i32; 9],
    pub divisor: i32,
}

/// `[1 2 1; 2 4 2; 1 2 1] / 16`.
pub const BLUR_KERNEL: Kernel3x3 = Kernel3x3 {
    weights: [1, 2, 1, 2, 4, 2, 1, 2, 1],
    divisor: 16,
};

impl Kernel3x3 {
    /// Weights as fractions of the divisor.
    pub fn normalized(&self) -> [f32; 9] {
        self.weights.map(|w| w as f32 / self.divisor as f32)
    }

    fn validate(&self) -> FilterResult<()> {
        if self.divisor <= 0 {
            return Err(FilterError::invalid_input(
                "convolve3x3",
                format!("kernel divisor must be positive, got {}", self.divisor),
            ));
        }
        Ok(())
    }
}

/// Blur with [`BLUR_KERNEL`].
pub fn blur(buffer: &PixelBuffer) -> FilterResult<PixelBuffer> {
    convolve_named(buffer, "blur", &BLUR_KERNEL)
}

/// Convolve every channel, alpha included, with a 3x3 kernel.
///
/// Neighbors outside the buffer take the value of the nearest edge pixel, so
/// the output has the input's dimensions. Each sum is divided by the divisor,
/// rounded half-up and clamped to [0, 255].
pub fn convolve3x3(buffer: &PixelBuffer, kernel: &Kernel3x3) -> FilterResult<PixelBuffer> {
    convolve_named(buffer, "convolve3x3", kernel)
}

fn convolve_named(
    buffer: &PixelBuffer,
    operation: &str,
    kernel: &Kernel3x3,
) -> FilterResult<PixelBuffer> {
    kernel.validate()?;

    build_rows(buffer, operation, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            *out = convolve_at(buffer, kernel, x as i64, y as i64);
        }
    })
}

#[inline]
fn convolve_at(buffer: &PixelBuffer, kernel: &Kernel3x3, x: i64, y: i64) -> Color {
    let mut sums = [0i64; 4];

    for ky in 0..3i64 {
        for kx in 0..3i64 {
            let weight = kernel.weights[(ky * 3 + kx) as usize] as i64;
            if weight == 0 {
                continue;
            }
            let sample = buffer.clamped(x + kx - 1, y + ky - 1).channels();
            for (sum, channel) in sums.iter_mut().zip(sample) {
                *sum += weight * channel as i64;
            }
        }
    }

    let divisor = kernel.divisor as i64;
    // Round half-up: floor((2 * sum + divisor) / (2 * divisor)).
    Color::from_channels(
        sums.map(|sum| (2 * sum + divisor).div_euclid(2 * divisor).clamp(0, 255) as u8),
    )
}
