//! # Observability
//!
//! - `logging`: tracing subscriber setup for the binary
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the host.

pub mod logging;

pub use logging::init_logging;
