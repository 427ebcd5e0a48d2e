//! # Kubernetes Manifest Generator
//!
//! Passes raw Kubernetes manifests through as resources, one per document.
//!
//! ## Components
//!
//! - **file_finder**: expands paths into manifest files
//! - **decoder**: decodes a file into YAML or JSON documents
//! - **flatten**: converts documents into identified resources

mod decoder;
mod file_finder;
mod flatten;

pub use decoder::decode_documents;
pub use file_finder::{find_manifest_files, has_manifest_extension};
pub use flatten::{document_to_resource, flatten};

use super::merge::{merge_list, ModuleConfig};
use super::{merge_config, CancellationToken, Generator, GeneratorRequest, GeneratorResponse};
use crate::error::{GenerateError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Manifest module options
///
/// # Example
///
/// ```yaml
/// paths:
///   - deploy/base
///   - deploy/overlays/prod/service.yaml
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ManifestConfig {
    /// Manifest files or directories; developer paths come first
    #[serde(default)]
    pub paths: Vec<String>,
}

impl ModuleConfig for ManifestConfig {
    fn merge_platform(self, platform: Self) -> Self {
        Self {
            paths: merge_list(self.paths, platform.paths),
        }
    }
}

impl ManifestConfig {
    /// Reject a config without any manifest path
    pub fn validate(&self) -> Result<()> {
        if self.paths.is_empty() {
            return Err(GenerateError::validation("paths", "should not be empty"));
        }
        Ok(())
    }
}

/// Generator for the `k8s_manifest` module
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestGenerator;

impl Generator for ManifestGenerator {
    fn name(&self) -> &'static str {
        "k8s_manifest"
    }

    fn generate(
        &self,
        request: &GeneratorRequest,
        cancel: &CancellationToken,
    ) -> Result<GeneratorResponse> {
        let config = merge_config::<ManifestConfig>(
            request.dev_config.as_ref(),
            request.platform_config.as_ref(),
        )?;
        config.validate()?;
        debug!(app = %request.app, paths = ?config.paths, "Flattening manifests");

        Ok(GeneratorResponse {
            resources: flatten(&config.paths, cancel)?,
            patcher: None,
        })
    }
}
