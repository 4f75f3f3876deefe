//! Filter sessions.
//!
//! - [`FilterSession`]: single-owner state machine (empty or loaded)
//! - [`SharedSession`]: lock-serialized handle for multi-threaded shells
//! - [`SessionOptions`]: cache and export settings

pub mod options;
pub mod shared;
pub mod state;

pub use options::SessionOptions;
pub use shared::SharedSession;
pub use state::FilterSession;
