//! # Symbolic References
//!
//! A symbolic reference stands in for a value that only exists once another
//! resource has been provisioned (a generated password, an instance id, a
//! connection string). The provisioning engine substitutes it; this crate only
//! builds and recognizes the encoding `$kusion_path.<resource id>.<attribute>`.

use crate::constants::REFERENCE_PREFIX;
use serde::{Serialize, Serializer};
use std::fmt;

/// Output attribute `attribute` of resource `resource_id`, resolved after provisioning
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolicReference {
    resource_id: String,
    attribute: String,
}

/// Build a reference to `attribute` of `resource_id`
///
/// Never checks that `resource_id` is emitted; callers only pass ids they produced.
pub fn reference_to(resource_id: &str, attribute: &str) -> SymbolicReference {
    SymbolicReference {
        resource_id: resource_id.to_string(),
        attribute: attribute.to_string(),
    }
}

impl SymbolicReference {
    /// Recognize an encoded reference
    ///
    /// Ids may contain dots (`apps/v1:Deployment:ns:web.v2`); the attribute is
    /// whatever follows the final dot.
    pub fn parse(encoded: &str) -> Option<Self> {
        let rest = encoded.strip_prefix(REFERENCE_PREFIX)?.strip_prefix('.')?;
        let (resource_id, attribute) = rest.rsplit_once('.')?;
        if resource_id.is_empty() || attribute.is_empty() {
            return None;
        }
        Some(reference_to(resource_id, attribute))
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }
}

impl fmt::Display for SymbolicReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{REFERENCE_PREFIX}.{}.{}", self.resource_id, self.attribute)
    }
}

impl Serialize for SymbolicReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
