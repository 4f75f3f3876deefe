//! # Retouch - Deterministic Image Filters
//!
//! Retouch applies one pixel-level filter at a time to a decoded image and
//! hands back a new image, leaving the original untouched.
//!
//! ## Features
//!
//! - **Pure kernel ops**: grayscale, invert, 3x3 blur, brightness and contrast,
//!   each a function from a borrowed buffer to a new buffer of the same size
//! - **Last filter wins**: a session recomputes every request from the
//!   original image, so filters never stack
//! - **Immutable snapshots**: published images are shared behind `Arc` and
//!   never written to again
//! - **Pluggable codec**: decoding and encoding go through the `ImageCodec`
//!   trait, backed by the `image` crate
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use retouch::prelude::*;
//! use std::path::Path;
//!
//! let codec = ImageCrateCodec;
//! let mut session = FilterSession::new();
//! session.open(&codec, Path::new("input.jpg"))?;
//!
//! session.apply_filter(FilterRequest::Grayscale)?;
//! // Recomputed from the original, not from the grayscale image.
//! session.apply_filter(FilterRequest::Brightness(40))?;
//!
//! session.export(&codec, Path::new("output.png"))?;
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Colors, pixel buffers and error types
//! - [`filters`]: Kernel ops, filter requests and the filter registry
//! - [`session`]: The filter session and its thread-safe handle
//! - [`codec`]: The image codec boundary

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod core;
pub mod filters;
pub mod session;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use retouch::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::types::{Color, PixelBuffer};

    // Errors
    pub use crate::core::error::{
        CodecError, ConfigError, ErrorKind, FilterError, FilterResult, RetouchError,
        RetouchResult, SessionId,
    };

    // Filters
    pub use crate::filters::builtin::{
        blur, brightness, contrast, convolve3x3, grayscale, invert, Kernel3x3, BLUR_KERNEL,
    };
    pub use crate::filters::registry::{Category, FilterDescriptor, FilterRegistry, ParameterSpec};
    pub use crate::filters::request::FilterRequest;

    // Sessions
    pub use crate::session::{FilterSession, SessionOptions, SharedSession};

    // Codec
    pub use crate::codec::{ExportFormat, ImageCodec, ImageCrateCodec};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "retouch");
    }

    #[test]
    fn test_registry_and_session_agree() {
        let registry = FilterRegistry::with_builtins();
        let mut session = FilterSession::new();
        session.load(PixelBuffer::new(3, 3, Color::rgba(100, 100, 100, 255)));

        for descriptor in registry.iter() {
            let request = registry.request(descriptor.id, None).unwrap();
            let out = session.apply_filter(request).unwrap();
            assert_eq!(out.dimensions(), (3, 3));
        }
    }

    #[test]
    fn test_reset_after_filter_scenario() {
        let original = PixelBuffer::from_fn(4, 4, |x, y| Color::rgba(x as u8 * 60, y as u8 * 60, 0, 255));
        let mut session = FilterSession::new();
        session.load(original.clone());
        session.apply_filter(FilterRequest::Contrast(2.0)).unwrap();
        session.reset().unwrap();
        assert_eq!(*session.current_image().unwrap(), original);
    }
}
