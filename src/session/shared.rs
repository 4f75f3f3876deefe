//! Thread-safe session handle.
//!
//! Several triggers (a slider, a button, an export job) may drive one
//! session. Every call takes the session lock for its whole duration, so a
//! filter can never read the original while a `load` is replacing it. Images
//! come back as `Arc` snapshots that stay valid after the lock is released.

use crate::codec::ImageCodec;
use crate::core::error::{FilterResult, RetouchResult, SessionId};
use crate::core::types::PixelBuffer;
use crate::filters::request::FilterRequest;
use crate::session::options::SessionOptions;
use crate::session::state::FilterSession;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;

/// Cloneable handle to a [`FilterSession`] shared between threads.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<FilterSession>>,
}

impl SharedSession {
    /// Create an empty shared session.
    pub fn new(options: SessionOptions) -> Self {
        Self::from_session(FilterSession::with_options(options))
    }

    /// Wrap an existing session.
    pub fn from_session(session: FilterSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.inner.lock().id()
    }

    /// See [`FilterSession::load`].
    pub fn load(&self, buffer: PixelBuffer) {
        self.inner.lock().load(buffer);
    }

    /// See [`FilterSession::open`]. Decoding happens outside the lock.
    pub fn open(&self, codec: &dyn ImageCodec, path: &Path) -> RetouchResult<()> {
        let buffer = codec.decode(path)?;
        self.load(buffer);
        Ok(())
    }

    /// See [`FilterSession::reset`].
    pub fn reset(&self) -> FilterResult<()> {
        self.inner.lock().reset()
    }

    /// See [`FilterSession::apply_filter`].
    pub fn apply_filter(&self, request: FilterRequest) -> FilterResult<Arc<PixelBuffer>> {
        self.inner.lock().apply_filter(request)
    }

    /// See [`FilterSession::current_image`].
    pub fn current_image(&self) -> FilterResult<Arc<PixelBuffer>> {
        self.inner.lock().current_image()
    }

    /// See [`FilterSession::active_filter`].
    pub fn active_filter(&self) -> Option<FilterRequest> {
        self.inner.lock().active_filter()
    }

    /// Export a snapshot of the current image. Encoding happens outside the lock.
    pub fn export(&self, codec: &dyn ImageCodec, path: &Path) -> RetouchResult<()> {
        let (current, format) = {
            let session = self.inner.lock();
            (session.current_image()?, session.options().export_format)
        };
        codec.encode(&current, path, format)?;
        Ok(())
    }

    /// Run `f` with exclusive access to the session.
    pub fn with_session<R>(&self, f: impl FnOnce(&mut FilterSession) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
