//! Image codec boundary.
//!
//! Decoding and encoding are delegated to the `image` crate behind the
//! [`ImageCodec`] trait, so a session never touches file formats itself and
//! tests can substitute their own codec.

use crate::core::error::CodecError;
use crate::core::types::PixelBuffer;
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// File formats a buffer can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
    Tiff,
}

impl ExportFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, CodecError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        extension.parse()
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Bmp => "bmp",
            ExportFormat::Tiff => "tiff",
        }
    }

    /// Whether the format stores an alpha channel.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, ExportFormat::Jpeg)
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Jpeg => image::ImageFormat::Jpeg,
            ExportFormat::Bmp => image::ImageFormat::Bmp,
            ExportFormat::Tiff => image::ImageFormat::Tiff,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            "bmp" => Ok(ExportFormat::Bmp),
            "tif" | "tiff" => Ok(ExportFormat::Tiff),
            other => Err(CodecError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Decodes files into pixel buffers and encodes buffers back to files.
pub trait ImageCodec: Send + Sync {
    /// Read and decode an image file.
    fn decode(&self, path: &Path) -> Result<PixelBuffer, CodecError>;

    /// Encode `buffer` and write it to `path`.
    fn encode(&self, buffer: &PixelBuffer, path: &Path, format: ExportFormat) -> Result<(), CodecError>;
}

/// Codec backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateCodec;

impl ImageCodec for ImageCrateCodec {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, CodecError> {
        let image = image::open(path).map_err(|source| CodecError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            "Decoded {} ({}x{}, {:?})",
            path.display(),
            image.width(),
            image.height(),
            image.color()
        );
        Ok(PixelBuffer::from(&image.to_rgba8()))
    }

    fn encode(&self, buffer: &PixelBuffer, path: &Path, format: ExportFormat) -> Result<(), CodecError> {
        let rgba = RgbaImage::from(buffer);
        let image = if format.supports_alpha() {
            DynamicImage::ImageRgba8(rgba)
        } else {
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8())
        };

        image
            .save_with_format(path, format.image_format())
            .map_err(|source| CodecError::Encode {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("Encoded {} as {}", path.display(), format);
        Ok(())
    }
}
