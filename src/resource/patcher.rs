//! # Patcher
//!
//! Side-channel instructions telling the host how to inject values produced by
//! one module into the workload that consumes it.

use k8s_openapi::api::core::v1::{EnvVar, EnvVarSource, SecretKeySelector};
use serde::{Deserialize, Serialize};

/// Values to inject into the consuming workload's containers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patcher {
    /// Environment variables appended to every container of the workload
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environments: Vec<EnvVar>,
}

/// Variable `name` read from key `key` of secret `secret_name`
pub fn secret_key_env(
    name: impl Into<String>,
    secret_name: impl Into<String>,
    key: impl Into<String>,
) -> EnvVar {
    EnvVar {
        name: name.into(),
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(SecretKeySelector {
                name: secret_name.into(),
                key: key.into(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_secret_key_env_wire_shape() {
        let env = secret_key_env("KUSION_DB_HOST_ORDERS", "orders-postgres", "hostAddress");
        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({
                "name": "KUSION_DB_HOST_ORDERS",
                "valueFrom": {"secretKeyRef": {"name": "orders-postgres", "key": "hostAddress"}}
            })
        );
    }

    #[test]
    fn test_patcher_round_trips_through_json() {
        let patcher = Patcher {
            environments: vec![secret_key_env("KUSION_DB_PASSWORD_ORDERS", "orders-postgres", "password")],
        };
        let wire = serde_json::to_string(&patcher).unwrap();
        assert_eq!(serde_json::from_str::<Patcher>(&wire).unwrap(), patcher);
    }
}
