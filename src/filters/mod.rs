//! Filter module.
//!
//! Contains the pure kernel ops, the request type that dispatches to them and
//! the registry describing them.

pub mod builtin;
pub mod registry;
pub mod request;

pub use registry::{Category, FilterDescriptor, FilterRegistry, ParameterSpec};
pub use request::{FilterRequest, RequestKey};
