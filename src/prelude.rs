//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ## Usage
//!
//! ```rust
//! use resource_synth::prelude::*;
//! ```

// Generator contract and supervision
pub use crate::generator::{
    generate_supervised, merge_config, CancellationToken, Generator, GeneratorRequest,
    GeneratorResponse, ModuleConfig,
};

// Module generators
pub use crate::generator::manifest::{ManifestConfig, ManifestGenerator};
pub use crate::generator::postgres::{PostgresConfig, PostgresGenerator};

// Resource model
pub use crate::resource::{
    kubernetes_resource_id, reference_to, terraform_resource_id, Patcher, ProviderConfig,
    Resource, ResourceType, Resources, SymbolicReference,
};

// Config and errors
pub use crate::config::GeneratorConfig;
pub use crate::error::{GenerateError, Result};
