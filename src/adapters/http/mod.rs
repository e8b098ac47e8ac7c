//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod estimation;

pub use estimation::{estimation_routes, EstimationHandlers};
