//! Configuration models for slot classes and pricing.

pub mod registry;

pub use registry::*;
