//! # Resources
//!
//! The typed output of a generation pass and the helpers that give each
//! resource its identity and wire resources together.
//!
//! ## Components
//!
//! - **identity**: deterministic resource ids for provider-managed and Kubernetes resources
//! - **reference**: symbolic forward-references resolved by the provisioning engine
//! - **patcher**: instructions for injecting generated values into a consuming workload

pub mod identity;
pub mod patcher;
pub mod reference;

pub use identity::{kubernetes_resource_id, terraform_resource_id, ProviderConfig};
pub use patcher::{secret_key_env, Patcher};
pub use reference::{reference_to, SymbolicReference};

use crate::error::{GenerateError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// Kind of provisioning engine a resource is handed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    /// Managed through a Terraform-style provider
    #[serde(rename = "Terraform")]
    ProviderManaged,
    /// Applied directly to the Kubernetes API
    Kubernetes,
}

/// One unit of infrastructure to be provisioned
///
/// `attributes` may hold literal values or [`SymbolicReference`] strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub attributes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl Resource {
    /// Wrap provider resource attributes into a provider-managed resource
    ///
    /// The provider URL, provider metadata and resource type travel in the
    /// extensions so the engine can pick the right provider plugin.
    pub fn provider_managed(
        provider: &ProviderConfig,
        resource_type: &str,
        id: String,
        attributes: Map<String, Value>,
    ) -> Result<Self> {
        let mut extensions = Map::new();
        extensions.insert("provider".to_string(), Value::String(provider.provider_url()?));
        extensions.insert(
            "providerMeta".to_string(),
            Value::Object(provider.provider_meta.clone()),
        );
        extensions.insert(
            "resourceType".to_string(),
            Value::String(resource_type.to_string()),
        );

        Ok(Self {
            id,
            resource_type: ResourceType::ProviderManaged,
            attributes,
            extensions: Some(extensions),
        })
    }

    /// Wrap a decoded Kubernetes object into a Kubernetes resource
    pub fn kubernetes(id: String, attributes: Map<String, Value>) -> Self {
        Self {
            id,
            resource_type: ResourceType::Kubernetes,
            attributes,
            extensions: None,
        }
    }

    /// All symbolic references found anywhere in the attributes
    pub fn references(&self) -> Vec<SymbolicReference> {
        let mut found = Vec::new();
        for value in self.attributes.values() {
            collect_references(value, &mut found);
        }
        found
    }
}

fn collect_references(value: &Value, found: &mut Vec<SymbolicReference>) {
    match value {
        Value::String(s) => {
            if let Some(reference) = SymbolicReference::parse(s) {
                found.push(reference);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_references(item, found);
            }
        }
        Value::Object(map) => {
            for item in map.values() {
                collect_references(item, found);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Ordered resource collection of one generation response
///
/// Resources are never mutated once appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resources {
    items: Vec<Resource>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a resource to the end of the collection
    pub fn push(&mut self, resource: Resource) {
        debug!(id = %resource.id, "Appending resource");
        self.items.push(resource);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Verify every symbolic reference points at a resource emitted earlier
    pub fn check_references(&self) -> Result<()> {
        let mut emitted: HashSet<&str> = HashSet::new();
        for resource in &self.items {
            for reference in resource.references() {
                if !emitted.contains(reference.resource_id()) {
                    return Err(GenerateError::DanglingReference {
                        resource: resource.id.clone(),
                        target: reference.resource_id().to_string(),
                    });
                }
            }
            emitted.insert(resource.id.as_str());
        }
        Ok(())
    }

    pub fn into_vec(self) -> Vec<Resource> {
        self.items
    }
}

impl From<Vec<Resource>> for Resources {
    fn from(items: Vec<Resource>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_resource_type_wire_names() {
        assert_eq!(
            serde_json::to_value(ResourceType::ProviderManaged).unwrap(),
            json!("Terraform")
        );
        assert_eq!(
            serde_json::to_value(ResourceType::Kubernetes).unwrap(),
            json!("Kubernetes")
        );
    }

    #[test]
    fn test_kubernetes_resource_has_no_extensions() {
        let resource = Resource::kubernetes("v1:Service:web".to_string(), Map::new());
        let value = serde_json::to_value(&resource).unwrap();
        assert!(value.get("extensions").is_none());
        assert_eq!(value["type"], json!("Kubernetes"));
    }

    #[test]
    fn test_provider_managed_extensions() {
        let provider = ProviderConfig::new("aliyun/alicloud", "1.209.1").with_region("cn-hangzhou");
        let resource = Resource::provider_managed(
            &provider,
            "alicloud_db_instance",
            "aliyun:alicloud:alicloud_db_instance:db".to_string(),
            Map::new(),
        )
        .unwrap();
        let extensions = resource.extensions.unwrap();
        assert_eq!(
            extensions["provider"],
            json!("registry.terraform.io/aliyun/alicloud/1.209.1")
        );
        assert_eq!(extensions["providerMeta"], json!({"region": "cn-hangzhou"}));
        assert_eq!(extensions["resourceType"], json!("alicloud_db_instance"));
    }

    #[test]
    fn test_references_found_in_nested_attributes() {
        let resource = Resource::kubernetes(
            "v1:Secret:ns:db".to_string(),
            object(json!({
                "stringData": {"password": "$kusion_path.a:b:c:d.result"},
                "list": ["plain", "$kusion_path.x.id"],
            })),
        );
        let targets: Vec<String> = resource
            .references()
            .iter()
            .map(|r| r.resource_id().to_string())
            .collect();
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&"a:b:c:d".to_string()));
        assert!(targets.contains(&"x".to_string()));
    }

    #[test]
    fn test_check_references_accepts_backward_references() {
        let mut resources = Resources::new();
        resources.push(Resource::kubernetes("first".to_string(), Map::new()));
        resources.push(Resource::kubernetes(
            "second".to_string(),
            object(json!({"ref": "$kusion_path.first.id"})),
        ));
        assert!(resources.check_references().is_ok());
    }

    #[test]
    fn test_check_references_rejects_forward_references() {
        let mut resources = Resources::new();
        resources.push(Resource::kubernetes(
            "second".to_string(),
            object(json!({"ref": "$kusion_path.first.id"})),
        ));
        resources.push(Resource::kubernetes("first".to_string(), Map::new()));
        let err = resources.check_references().unwrap_err();
        assert!(matches!(
            err,
            GenerateError::DanglingReference { ref target, .. } if target == "first"
        ));
    }
}
