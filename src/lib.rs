//! Resource Synthesis Library
//!
//! Turns the merged developer and platform configuration of one module instance
//! into an ordered set of identified infrastructure resources, wired together
//! with symbolic references a provisioning engine resolves later.
//! Tests are included in the module files (e.g., generator/postgres/alicloud.rs).
//!
//! ## Quick Start
//!
//! ```rust
//! use resource_synth::prelude::*;
//!
//! let generator = PostgresGenerator::new().with_default_region(Some("cn-hangzhou".into()));
//! let request = GeneratorRequest {
//!     project: "shop".to_string(),
//!     app: "orders".to_string(),
//!     ..Default::default()
//! };
//! let response = generate_supervised(&generator, &request, &CancellationToken::new()).unwrap();
//! assert_eq!(response.resources.len(), 5);
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod observability;
pub mod prelude;
pub mod resource;
