//! # Generators
//!
//! A generator turns one module instance's configuration into an ordered set of
//! infrastructure resources.
//!
//! ## Flow
//!
//! 1. **Merge** developer and platform config fragments ([`merge`])
//! 2. **Validate** the effective config
//! 3. **Build** the resource set ([`postgres`] or [`manifest`])
//!
//! Hosts should call generators through [`generate_supervised`], which turns a
//! panic inside a generator into a reported [`GenerateError::InternalPanic`].
//!
//! [`GenerateError::InternalPanic`]: crate::error::GenerateError::InternalPanic

pub mod cancel;
pub mod manifest;
pub mod merge;
pub mod postgres;
pub mod supervisor;

pub use cancel::CancellationToken;
pub use merge::{merge_config, ModuleConfig};
pub use supervisor::generate_supervised;

use crate::error::Result;
use crate::resource::{Patcher, Resource};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request handed to a generator by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorRequest {
    /// Project name, also the Kubernetes namespace of generated objects
    #[serde(default)]
    pub project: String,
    /// Stack (environment) name
    #[serde(default)]
    pub stack: String,
    /// Logical name of the module instance
    #[serde(default)]
    pub app: String,
    /// Config fragment written by the application developer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_config: Option<Value>,
    /// Config fragment written by the platform engineer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_config: Option<Value>,
    /// Extra context such as resource references from sibling modules
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub context: Map<String, Value>,
}

/// Result of a successful generation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorResponse {
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patcher: Option<Patcher>,
}

/// A module generator
///
/// Implementations hold no mutable state: concurrent calls for different
/// module instances need no coordination.
pub trait Generator: Send + Sync {
    /// Module name used in logs and diagnostics
    fn name(&self) -> &'static str;

    /// Generate the full resource set, or fail without any partial result
    fn generate(
        &self,
        request: &GeneratorRequest,
        cancel: &CancellationToken,
    ) -> Result<GeneratorResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_deserializes_camel_case() {
        let request: GeneratorRequest = serde_json::from_value(json!({
            "project": "shop",
            "stack": "dev",
            "app": "orders",
            "devConfig": {"size": 20},
            "platformConfig": {"category": "serverless_basic"},
        }))
        .unwrap();
        assert_eq!(request.app, "orders");
        assert_eq!(request.dev_config, Some(json!({"size": 20})));
        assert!(request.context.is_empty());
    }

    #[test]
    fn test_response_omits_missing_patcher() {
        let response = GeneratorResponse::default();
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({"resources": []}));
    }
}
