//! # PostgreSQL Module Config
//!
//! The config shape both fragments decode into, the completed config the graph
//! builder consumes, and its validation.

use crate::constants::{
    DB_SECRET_SUFFIX, DEFAULT_POSTGRES_CATEGORY, DEFAULT_POSTGRES_PRIVATE_ROUTING,
    DEFAULT_POSTGRES_SECURITY_IP, DEFAULT_POSTGRES_SIZE, DEFAULT_POSTGRES_TYPE,
    DEFAULT_POSTGRES_USERNAME,
};
use crate::error::{GenerateError, Result};
use crate::generator::merge::{merge_list, merge_option, merge_string, ModuleConfig};
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// PostgreSQL options as written in a developer or platform config fragment
///
/// # Example
///
/// ```yaml
/// type: alicloud
/// category: serverless_basic
/// size: 20
/// securityIPs:
///   - 0.0.0.0/0
/// username: admin
/// privateRouting: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostgresConfig {
    /// Cloud provider hosting the database (only `alicloud` is supported)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    /// PostgreSQL engine version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Instance class, e.g. `pg.n2.serverless.1c`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    /// Storage size in GB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Edition; a category containing `serverless` selects the serverless tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Name of the generated database account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// IP allow-list of the instance
    #[serde(default, rename = "securityIPs", skip_serializing_if = "Vec::is_empty")]
    pub security_ips: Vec<String>,
    /// VSwitch (subnet) the instance is placed in
    #[serde(default, rename = "subnetID", skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    /// Route workload traffic over the private network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_routing: Option<bool>,
    /// Instance name, defaults to the module instance's app name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
}

impl ModuleConfig for PostgresConfig {
    fn merge_platform(self, platform: Self) -> Self {
        Self {
            provider_type: merge_string(self.provider_type, platform.provider_type),
            version: merge_string(self.version, platform.version),
            instance_type: merge_string(self.instance_type, platform.instance_type),
            size: merge_option(self.size, platform.size),
            category: merge_string(self.category, platform.category),
            username: merge_string(self.username, platform.username),
            security_ips: merge_list(self.security_ips, platform.security_ips),
            subnet_id: merge_string(self.subnet_id, platform.subnet_id),
            private_routing: merge_option(self.private_routing, platform.private_routing),
            database_name: merge_string(self.database_name, platform.database_name),
        }
    }
}

impl PostgresConfig {
    /// Apply module defaults for options neither fragment set
    pub fn complete(self, app: &str) -> PostgreSQL {
        let security_ips = if self.security_ips.is_empty() {
            vec![DEFAULT_POSTGRES_SECURITY_IP.to_string()]
        } else {
            self.security_ips
        };

        PostgreSQL {
            provider_type: self
                .provider_type
                .unwrap_or_else(|| DEFAULT_POSTGRES_TYPE.to_string()),
            version: self.version,
            instance_type: self.instance_type,
            size: self.size.unwrap_or(DEFAULT_POSTGRES_SIZE),
            category: self
                .category
                .unwrap_or_else(|| DEFAULT_POSTGRES_CATEGORY.to_string()),
            username: self
                .username
                .unwrap_or_else(|| DEFAULT_POSTGRES_USERNAME.to_string()),
            security_ips,
            subnet_id: self.subnet_id,
            private_routing: self
                .private_routing
                .unwrap_or(DEFAULT_POSTGRES_PRIVATE_ROUTING),
            database_name: self.database_name.unwrap_or_else(|| app.to_string()),
        }
    }
}

/// Effective PostgreSQL config of one module instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgreSQL {
    pub provider_type: String,
    pub version: Option<String>,
    pub instance_type: Option<String>,
    pub size: u32,
    pub category: String,
    pub username: String,
    pub security_ips: Vec<String>,
    pub subnet_id: Option<String>,
    pub private_routing: bool,
    pub database_name: String,
}

impl PostgreSQL {
    /// Whether the category selects the serverless tier
    pub fn is_serverless(&self) -> bool {
        self.category.contains("serverless")
    }

    /// Reject configs the graph builder cannot turn into resources
    ///
    /// Never repairs a value.
    pub fn validate(&self) -> Result<()> {
        if !self.provider_type.eq_ignore_ascii_case(DEFAULT_POSTGRES_TYPE) {
            return Err(GenerateError::validation(
                "type",
                format!(
                    "'{}' is not supported (supported: {DEFAULT_POSTGRES_TYPE})",
                    self.provider_type
                ),
            ));
        }

        if self.size == 0 {
            return Err(GenerateError::validation("size", "must be greater than 0"));
        }

        if self.username.trim().is_empty() {
            return Err(GenerateError::validation("username", "should not be empty"));
        }

        if self.security_ips.iter().any(|ip| ip.trim().is_empty()) {
            return Err(GenerateError::validation(
                "securityIPs",
                "should not contain empty entries",
            ));
        }

        validate_database_name(&self.database_name)
    }
}

/// The database name also names the credentials Secret, so it must be a
/// valid Kubernetes name once the secret suffix is appended
fn validate_database_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(GenerateError::validation(
            "databaseName",
            "should not be empty (set it or give the module instance an app name)",
        ));
    }

    let max_len = 253 - DB_SECRET_SUFFIX.len();
    if name.len() > max_len {
        return Err(GenerateError::validation(
            "databaseName",
            format!(
                "'{name}' exceeds maximum length of {max_len} characters (got {})",
                name.len()
            ),
        ));
    }

    // RFC 1123 subdomain
    let name_regex =
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
            .map_err(|e| GenerateError::validation("databaseName", format!("regex: {e}")))?;

    if !name_regex.is_match(name) {
        return Err(GenerateError::validation(
            "databaseName",
            format!(
                "'{name}' must be a valid Kubernetes name (lowercase alphanumeric, hyphens, dots; cannot start/end with hyphen or dot)"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::merge::merge_config;
    use serde_json::json;

    fn completed(dev: serde_json::Value) -> PostgreSQL {
        merge_config::<PostgresConfig>(Some(&dev), None)
            .unwrap()
            .complete("orders")
    }

    mod decode_tests {
        use super::*;

        #[test]
        fn test_wire_names() {
            let config: PostgresConfig = serde_json::from_value(json!({
                "type": "alicloud",
                "instanceType": "pg.n2.serverless.1c",
                "securityIPs": ["10.0.0.0/8"],
                "subnetID": "vsw-123",
                "privateRouting": false,
                "databaseName": "orders-db",
            }))
            .unwrap();
            assert_eq!(config.provider_type.as_deref(), Some("alicloud"));
            assert_eq!(config.instance_type.as_deref(), Some("pg.n2.serverless.1c"));
            assert_eq!(config.security_ips, vec!["10.0.0.0/8"]);
            assert_eq!(config.subnet_id.as_deref(), Some("vsw-123"));
            assert_eq!(config.private_routing, Some(false));
            assert_eq!(config.database_name.as_deref(), Some("orders-db"));
        }

        #[test]
        fn test_wrong_type_is_parse_error() {
            let dev = json!({"size": "twenty"});
            let err = merge_config::<PostgresConfig>(Some(&dev), None).unwrap_err();
            assert!(matches!(err, GenerateError::ConfigParse { .. }));
        }
    }

    mod merge_tests {
        use super::*;

        #[test]
        fn test_developer_options_never_overwritten() {
            let dev = json!({"size": 20, "username": "admin", "privateRouting": false});
            let platform = json!({"size": 100, "username": "platform", "privateRouting": true, "subnetID": "vsw-1"});
            let merged = merge_config::<PostgresConfig>(Some(&dev), Some(&platform)).unwrap();
            assert_eq!(merged.size, Some(20));
            assert_eq!(merged.username.as_deref(), Some("admin"));
            assert_eq!(merged.private_routing, Some(false));
            assert_eq!(merged.subnet_id.as_deref(), Some("vsw-1"));
        }

        #[test]
        fn test_security_ips_are_additive() {
            let dev = json!({"securityIPs": ["10.0.0.0/8", "172.16.0.0/12"]});
            let platform = json!({"securityIPs": ["172.16.0.0/12", "192.168.0.0/16"]});
            let merged = merge_config::<PostgresConfig>(Some(&dev), Some(&platform)).unwrap();
            assert_eq!(
                merged.security_ips,
                vec!["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16"]
            );
        }
    }

    mod complete_tests {
        use super::*;

        #[test]
        fn test_defaults_applied() {
            let postgres = completed(json!({}));
            assert_eq!(postgres.provider_type, "alicloud");
            assert_eq!(postgres.size, 10);
            assert_eq!(postgres.category, "Basic");
            assert_eq!(postgres.username, "root");
            assert_eq!(postgres.security_ips, vec!["0.0.0.0/0"]);
            assert!(postgres.private_routing);
            assert_eq!(postgres.database_name, "orders");
            assert!(!postgres.is_serverless());
        }

        #[test]
        fn test_explicit_values_kept() {
            let postgres = completed(json!({
                "category": "serverless_basic",
                "databaseName": "billing",
                "privateRouting": false,
            }));
            assert!(postgres.is_serverless());
            assert_eq!(postgres.database_name, "billing");
            assert!(!postgres.private_routing);
        }
    }

    mod validate_tests {
        use super::*;

        #[test]
        fn test_completed_defaults_are_valid() {
            assert!(completed(json!({})).validate().is_ok());
        }

        #[test]
        fn test_unsupported_type() {
            let err = completed(json!({"type": "aws"})).validate().unwrap_err();
            assert!(err.to_string().contains("type"));
            assert!(err.to_string().contains("aws"));
        }

        #[test]
        fn test_type_is_case_insensitive() {
            assert!(completed(json!({"type": "Alicloud"})).validate().is_ok());
        }

        #[test]
        fn test_zero_size() {
            let err = completed(json!({"size": 0})).validate().unwrap_err();
            assert!(err.to_string().contains("size"));
        }

        #[test]
        fn test_missing_database_name() {
            let dev = json!({});
            let postgres = merge_config::<PostgresConfig>(Some(&dev), None)
                .unwrap()
                .complete("");
            let err = postgres.validate().unwrap_err();
            assert!(err.to_string().contains("databaseName"));
        }

        #[test]
        fn test_invalid_database_names() {
            for name in ["Orders", "orders_db", "-orders", "orders-", "orders db"] {
                let postgres = completed(json!({"databaseName": name}));
                assert!(
                    postgres.validate().is_err(),
                    "database name '{name}' should be invalid"
                );
            }
        }

        #[test]
        fn test_blank_security_ip_rejected() {
            let err = completed(json!({"securityIPs": ["10.0.0.0/8", " "]}))
                .validate()
                .unwrap_err();
            assert!(err.to_string().contains("securityIPs"));
        }
    }
}
