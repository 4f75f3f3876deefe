//! The filter session: an original image and the one filter applied to it.
//!
//! A session is either empty or holds a loaded image. Each filter request is
//! computed from the pristine original, never from the previously filtered
//! image, so the last request wins and filters do not stack.

use crate::codec::ImageCodec;
use crate::core::error::{FilterError, FilterResult, RetouchResult, SessionId};
use crate::core::types::PixelBuffer;
use crate::filters::request::{FilterRequest, RequestKey};
use crate::session::options::SessionOptions;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Image state held by a loaded session.
#[derive(Debug, Clone)]
struct LoadedImage {
    original: Arc<PixelBuffer>,
    current: Arc<PixelBuffer>,
    active: Option<FilterRequest>,
}

/// Owner of the original and current buffers.
pub struct FilterSession {
    id: SessionId,
    options: SessionOptions,
    image: Option<LoadedImage>,
    cache: Option<LruCache<RequestKey, Arc<PixelBuffer>>>,
}

impl std::fmt::Debug for FilterSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterSession")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("loaded", &self.image.as_ref().map(|i| i.original.dimensions()))
            .field("active", &self.active_filter())
            .field("cached", &self.cache.as_ref().map(|c| c.len()))
            .finish()
    }
}

impl Default for FilterSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterSession {
    /// Create an empty session with default options.
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    /// Create an empty session.
    pub fn with_options(options: SessionOptions) -> Self {
        let cache = NonZeroUsize::new(options.cache_capacity).map(LruCache::new);
        Self {
            id: SessionId::new(),
            options,
            image: None,
            cache,
        }
    }

    /// Session identifier, used as log context.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Session options.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Whether an image is loaded.
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Make `buffer` the original and current image, replacing any previous one.
    pub fn load(&mut self, buffer: PixelBuffer) {
        log::info!(
            "[{}] Loaded {}x{} image",
            self.id,
            buffer.width(),
            buffer.height()
        );

        let original = Arc::new(buffer);
        self.image = Some(LoadedImage {
            current: Arc::clone(&original),
            original,
            active: None,
        });
        self.clear_cache();
    }

    /// Decode `path` with `codec` and load the result.
    ///
    /// The session is unchanged when decoding fails.
    pub fn open(&mut self, codec: &dyn ImageCodec, path: &Path) -> RetouchResult<()> {
        let buffer = codec.decode(path)?;
        self.load(buffer);
        Ok(())
    }

    /// Drop the loaded image.
    pub fn clear(&mut self) {
        if self.image.take().is_some() {
            log::info!("[{}] Cleared", self.id);
        }
        self.clear_cache();
    }

    /// Restore the current image to the original.
    pub fn reset(&mut self) -> FilterResult<()> {
        let image = self.loaded_mut("reset")?;
        image.current = Arc::clone(&image.original);
        image.active = None;
        log::info!("[{}] Reset to original", self.id);
        Ok(())
    }

    /// Replace the current image with `request` applied to the original.
    ///
    /// On failure the current image is left as it was.
    pub fn apply_filter(&mut self, request: FilterRequest) -> FilterResult<Arc<PixelBuffer>> {
        let id = self.id;
        let original = Arc::clone(&self.loaded("apply_filter")?.original);

        if let Err(e) = request.validate() {
            log::warn!("[{}] Rejected {}: {}", id, request, e);
            return Err(e);
        }

        let key = request.key();
        let cached = self.cache.as_mut().and_then(|c| c.get(&key).cloned());

        let output = match cached {
            Some(output) => {
                log::debug!("[{}] {} served from cache", id, request);
                output
            }
            None => {
                let start = Instant::now();
                let output = Arc::new(request.apply(&original)?);
                log::debug!(
                    "[{}] {} on {}x{} took {:?}",
                    id,
                    request,
                    original.width(),
                    original.height(),
                    start.elapsed()
                );
                if let Some(cache) = self.cache.as_mut() {
                    cache.put(key, Arc::clone(&output));
                }
                output
            }
        };

        let image = self.loaded_mut("apply_filter")?;
        image.current = Arc::clone(&output);
        image.active = Some(request);
        Ok(output)
    }

    /// The image a shell should display or export.
    pub fn current_image(&self) -> FilterResult<Arc<PixelBuffer>> {
        Ok(Arc::clone(&self.loaded("current_image")?.current))
    }

    /// The image as loaded.
    pub fn original_image(&self) -> FilterResult<Arc<PixelBuffer>> {
        Ok(Arc::clone(&self.loaded("original_image")?.original))
    }

    /// The request that produced the current image, `None` when it is the original.
    pub fn active_filter(&self) -> Option<FilterRequest> {
        self.image.as_ref().and_then(|i| i.active)
    }

    /// Encode the current image to `path` in the configured export format.
    pub fn export(&self, codec: &dyn ImageCodec, path: &Path) -> RetouchResult<()> {
        let current = self.current_image()?;
        codec.encode(&current, path, self.options.export_format)?;
        log::info!(
            "[{}] Exported {}x{} image to {} as {}",
            self.id,
            current.width(),
            current.height(),
            path.display(),
            self.options.export_format
        );
        Ok(())
    }

    /// Number of cached filter outputs.
    pub fn cached_results(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.len())
    }

    fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }

    fn loaded(&self, operation: &str) -> FilterResult<&LoadedImage> {
        self.image
            .as_ref()
            .ok_or_else(|| FilterError::illegal_state(operation))
    }

    fn loaded_mut(&mut self, operation: &str) -> FilterResult<&mut LoadedImage> {
        self.image
            .as_mut()
            .ok_or_else(|| FilterError::illegal_state(operation))
    }
}
