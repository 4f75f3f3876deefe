//! Built-in filter implementations.
//!
//! Every op is a pure function from a borrowed [`PixelBuffer`] to a freshly
//! allocated one of the same dimensions. Large buffers are processed on the
//! rayon pool; the output does not depend on how the work was split.

mod blur;
mod color;

use crate::core::error::FilterResult;
use crate::core::types::{Color, PixelBuffer};
use rayon::prelude::*;

pub use blur::{blur, convolve3x3, Kernel3x3, BLUR_KERNEL};
pub use color::{brightness, contrast, grayscale, invert, luma, rescale};

/// Buffers with at least this many samples are processed in parallel.
pub const PARALLEL_MIN_PIXELS: usize = 128 * 128;

/// Map every sample independently.
pub(crate) fn map_samples<F>(buffer: &PixelBuffer, operation: &str, f: F) -> FilterResult<PixelBuffer>
where
    F: Fn(Color) -> Color + Sync,
{
    buffer.ensure_not_empty(operation)?;

    let samples: Vec<Color> = if buffer.area() >= PARALLEL_MIN_PIXELS {
        buffer.samples().par_iter().map(|c| f(*c)).collect()
    } else {
        buffer.samples().iter().map(|c| f(*c)).collect()
    };

    PixelBuffer::from_samples(buffer.width(), buffer.height(), samples)
}

/// Build an output of the same dimensions row by row.
///
/// `fill(y, row)` writes every sample of output row `y`.
pub(crate) fn build_rows<F>(buffer: &PixelBuffer, operation: &str, fill: F) -> FilterResult<PixelBuffer>
where
    F: Fn(u32, &mut [Color]) + Sync,
{
    buffer.ensure_not_empty(operation)?;

    let width = buffer.width() as usize;
    let mut samples = vec![Color::TRANSPARENT; buffer.area()];

    if buffer.area() >= PARALLEL_MIN_PIXELS {
        samples
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill(y as u32, row));
    } else {
        samples
            .chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill(y as u32, row));
    }

    PixelBuffer::from_samples(buffer.width(), buffer.height(), samples)
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::core::types::{Color, PixelBuffer};
    use proptest::prelude::*;

    /// Arbitrary non-empty buffers up to 12x12.
    pub fn arb_buffer() -> impl Strategy<Value = PixelBuffer> {
        (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
            proptest::collection::vec(any::<[u8; 4]>(), (w * h) as usize).prop_map(move |raw| {
                let samples = raw.into_iter().map(Color::from_channels).collect();
                PixelBuffer::from_samples(w, h, samples).unwrap()
            })
        })
    }

    /// Zero-area buffers of every shape.
    pub fn arb_empty_buffer() -> impl Strategy<Value = PixelBuffer> {
        prop_oneof![
            (0u32..16).prop_map(|w| PixelBuffer::new(w, 0, Color::WHITE)),
            (0u32..16).prop_map(|h| PixelBuffer::new(0, h, Color::WHITE)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::testing::arb_empty_buffer;
    use super::*;
    use crate::core::error::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn test_parallel_and_serial_paths_agree() {
        let big = PixelBuffer::from_fn(130, 130, |x, y| {
            Color::rgba((x * 7) as u8, (y * 3) as u8, (x ^ y) as u8, (x + y) as u8)
        });
        assert!(big.area() >= PARALLEL_MIN_PIXELS);

        // Cropping the same content below the threshold must give the same pixels.
        let small = PixelBuffer::from_fn(100, 100, |x, y| big.get_pixel(x, y).unwrap());
        let big_out = blur(&big).unwrap();
        let small_out = blur(&small).unwrap();
        for y in 1..99 {
            for x in 1..99 {
                assert_eq!(big_out.get_pixel(x, y), small_out.get_pixel(x, y));
            }
        }

        let inverted = invert(&big).unwrap();
        assert!(big
            .samples()
            .iter()
            .zip(inverted.samples())
            .all(|(a, b)| b.r == 255 - a.r && b.a == a.a));
    }

    proptest! {
        #[test]
        fn prop_every_op_rejects_empty_buffers(buffer in arb_empty_buffer()) {
            let results = [
                grayscale(&buffer),
                invert(&buffer),
                blur(&buffer),
                brightness(&buffer, 10),
                contrast(&buffer, 1.5),
            ];
            for result in results {
                prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidInput);
            }
        }
    }
}
