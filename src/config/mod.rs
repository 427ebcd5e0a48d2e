//! # Configuration
//!
//! Process-level settings for the generator host.
//!
//! Module configuration (what a developer or platform engineer declares for one
//! module instance) lives with each generator; this module only covers the
//! operator-level knobs read from the environment.

mod generator;

pub use generator::GeneratorConfig;
