//! Core types for the Retouch image filter engine.
//!
//! This module contains the foundational types every other module builds on:
//! - Colors and the pixel buffer
//! - Error types and their classification

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CodecError, ConfigError, ErrorKind, FilterError, RetouchError, SessionId};
pub use types::{Color, PixelBuffer};
