//! # Credentials Secret
//!
//! Packs the database host address, username and password into a Kubernetes
//! Secret and describes how the consuming workload receives them as
//! environment variables.
//!
//! ## Convention
//!
//! | Secret key    | Environment variable           |
//! |---------------|--------------------------------|
//! | `hostAddress` | `KUSION_DB_HOST_<NAME>`        |
//! | `username`    | `KUSION_DB_USERNAME_<NAME>`    |
//! | `password`    | `KUSION_DB_PASSWORD_<NAME>`    |
//!
//! `<NAME>` is the database name upper-cased with every non-alphanumeric
//! character replaced by `_`.

use crate::constants::{
    DB_HOST_ENV_PREFIX, DB_PASSWORD_ENV_PREFIX, DB_SECRET_SUFFIX, DB_USERNAME_ENV_PREFIX,
};
use crate::error::Result;
use crate::resource::{kubernetes_resource_id, secret_key_env, Patcher, Resource, SymbolicReference};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

const HOST_ADDRESS_KEY: &str = "hostAddress";
const USERNAME_KEY: &str = "username";
const PASSWORD_KEY: &str = "password";

/// Build the credentials Secret resource and the environment patcher
///
/// `host_address` and `password` stay symbolic; only `username` is literal.
pub fn assemble_db_secret(
    database_name: &str,
    namespace: &str,
    host_address: &SymbolicReference,
    username: &str,
    password: &SymbolicReference,
) -> Result<(Resource, Patcher)> {
    let secret_name = format!("{database_name}{DB_SECRET_SUFFIX}");
    let namespace = Some(namespace).filter(|ns| !ns.is_empty());

    let mut data = BTreeMap::new();
    data.insert(HOST_ADDRESS_KEY.to_string(), host_address.to_string());
    data.insert(USERNAME_KEY.to_string(), username.to_string());
    data.insert(PASSWORD_KEY.to_string(), password.to_string());

    let secret = Secret {
        metadata: ObjectMeta {
            name: Some(secret_name.clone()),
            namespace: namespace.map(ToString::to_string),
            ..Default::default()
        },
        string_data: Some(data),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    };

    let id = kubernetes_resource_id(
        <Secret as k8s_openapi::Resource>::API_VERSION,
        <Secret as k8s_openapi::Resource>::KIND,
        namespace,
        &secret_name,
    );

    let attributes = super::to_attributes("credentials secret", &secret)?;

    let env_suffix = env_name_suffix(database_name);
    let patcher = Patcher {
        environments: vec![
            secret_key_env(
                format!("{DB_HOST_ENV_PREFIX}{env_suffix}"),
                &secret_name,
                HOST_ADDRESS_KEY,
            ),
            secret_key_env(
                format!("{DB_USERNAME_ENV_PREFIX}{env_suffix}"),
                &secret_name,
                USERNAME_KEY,
            ),
            secret_key_env(
                format!("{DB_PASSWORD_ENV_PREFIX}{env_suffix}"),
                &secret_name,
                PASSWORD_KEY,
            ),
        ],
    };

    Ok((Resource::kubernetes(id, attributes), patcher))
}

fn env_name_suffix(database_name: &str) -> String {
    database_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
