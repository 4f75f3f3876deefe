//! Session options.
//!
//! Options are plain serde data so a shell can keep them in a TOML file:
//!
//! ```toml
//! cache_capacity = 16
//! export_format = "png"
//! ```

use crate::codec::ExportFormat;
use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on cached filter outputs per session.
pub const MAX_CACHE_CAPACITY: usize = 256;

/// Options for a filter session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionOptions {
    /// Number of filter outputs kept per loaded image (0 disables caching).
    pub cache_capacity: usize,
    /// Format used by `export`.
    pub export_format: ExportFormat,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            cache_capacity: 8,
            export_format: ExportFormat::Png,
        }
    }
}

impl SessionOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Disable result caching.
    pub fn without_cache(self) -> Self {
        self.with_cache_capacity(0)
    }

    /// Set the export format.
    pub fn with_export_format(mut self, format: ExportFormat) -> Self {
        self.export_format = format;
        self
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let options: SessionOptions = toml::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_capacity > MAX_CACHE_CAPACITY {
            return Err(ConfigError::Invalid {
                field: "cache_capacity".to_string(),
                reason: format!("must be at most {}", MAX_CACHE_CAPACITY),
            });
        }
        Ok(())
    }
}
