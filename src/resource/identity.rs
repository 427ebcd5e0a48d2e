//! # Resource Identity
//!
//! Deterministic resource ids. Re-running generation against unchanged config
//! must reproduce byte-identical ids: the provisioning engine compares them to
//! tell "no change" apart from "replace".

use crate::constants::DEFAULT_TERRAFORM_HOST;
use crate::error::{GenerateError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Terraform-style provider configuration
///
/// # Example
///
/// ```rust
/// use resource_synth::resource::ProviderConfig;
///
/// let provider = ProviderConfig::new("aliyun/alicloud", "1.209.1").with_region("cn-hangzhou");
/// assert_eq!(provider.region(), Some("cn-hangzhou"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// `namespace/name` or `host/namespace/name`
    pub source: String,
    pub version: String,
    #[serde(default)]
    pub provider_meta: Map<String, Value>,
}

impl ProviderConfig {
    pub fn new(source: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            version: version.into(),
            provider_meta: Map::new(),
        }
    }

    /// Specialize the provider with a region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.provider_meta
            .insert("region".to_string(), Value::String(region.into()));
        self
    }

    /// Region carried in the provider metadata, if any non-empty one is set
    pub fn region(&self) -> Option<&str> {
        self.provider_meta
            .get("region")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    /// Full provider URL: `host/namespace/name/version`
    pub fn provider_url(&self) -> Result<String> {
        let invalid = |reason: &str| GenerateError::InvalidProviderConfig {
            provider_source: self.source.clone(),
            reason: reason.to_string(),
        };

        if self.version.trim().is_empty() {
            return Err(invalid("provider version is empty"));
        }

        let parts: Vec<&str> = self.source.split('/').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(invalid("provider source has an empty segment"));
        }

        match parts.len() {
            2 => Ok(format!(
                "{DEFAULT_TERRAFORM_HOST}/{}/{}",
                self.source, self.version
            )),
            3 => Ok(format!("{}/{}", self.source, self.version)),
            _ => Err(invalid(
                "provider source must be 'namespace/name' or 'host/namespace/name'",
            )),
        }
    }
}

/// Id of a provider-managed resource
///
/// Format: `<provider namespace>:<provider name>:<resource type>:<logical name>`
pub fn terraform_resource_id(
    provider: &ProviderConfig,
    resource_type: &str,
    name: &str,
) -> Result<String> {
    let url = provider.provider_url()?;
    // host/namespace/name/version
    let segments: Vec<&str> = url.split('/').collect();
    Ok(format!(
        "{}:{}:{resource_type}:{name}",
        segments[1], segments[2]
    ))
}

/// Id of a Kubernetes object, derived from its own coordinates
///
/// `apiVersion:kind:name` without a namespace, else `apiVersion:kind:namespace:name`.
/// An empty namespace counts as absent.
pub fn kubernetes_resource_id(
    api_version: &str,
    kind: &str,
    namespace: Option<&str>,
    name: &str,
) -> String {
    match namespace.filter(|ns| !ns.is_empty()) {
        Some(ns) => format!("{api_version}:{kind}:{ns}:{name}"),
        None => format!("{api_version}:{kind}:{name}"),
    }
}
