//! # Alicloud Resource Graph
//!
//! Builds the ordered resource set of a PostgreSQL instance on Alicloud RDS.
//!
//! ## Steps
//!
//! 1. Resolve the provider region (provider config, then the operator default)
//! 2. `random_password` for the account password
//! 3. `alicloud_db_instance`, with the serverless sub-config for serverless categories
//! 4. `alicloud_db_connection`, only when the allow-list is public
//! 5. `alicloud_rds_account`
//! 6. Host address selection
//! 7. Credentials Secret and workload patcher
//!
//! Every step may fail the whole build. Later steps only reference ids produced
//! by earlier ones.

use super::config::PostgreSQL;
use super::network::is_public_accessible;
use super::password::generate_random_password;
use super::secret::assemble_db_secret;
use super::to_attributes;
use crate::constants::{
    ALICLOUD_DB_CONNECTION, ALICLOUD_DB_INSTANCE, ALICLOUD_RDS_ACCOUNT, ALICLOUD_REGION_ENV,
    POSTGRES_ENGINE, POSTGRES_PORT, RDS_ACCOUNT_TYPE, SERVERLESS_CHARGE_TYPE,
    SERVERLESS_MAX_CAPACITY, SERVERLESS_MIN_CAPACITY, SERVERLESS_STORAGE_TYPE,
};
use crate::error::{GenerateError, Result};
use crate::generator::{CancellationToken, GeneratorResponse};
use crate::resource::{
    reference_to, terraform_resource_id, ProviderConfig, Resource, Resources, SymbolicReference,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
struct DbInstanceAttributes<'a> {
    category: &'a str,
    engine: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    engine_version: Option<&'a str>,
    instance_storage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    instance_type: Option<&'a str>,
    security_ips: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    vswitch_id: Option<&'a str>,
    instance_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_instance_storage_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    instance_charge_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    serverless_config: Option<[ServerlessConfig; 1]>,
}

#[derive(Debug, Serialize)]
struct ServerlessConfig {
    auto_pause: bool,
    switch_force: bool,
    max_capacity: u32,
    min_capacity: u32,
}

impl Default for ServerlessConfig {
    fn default() -> Self {
        Self {
            auto_pause: false,
            switch_force: false,
            max_capacity: SERVERLESS_MAX_CAPACITY,
            min_capacity: SERVERLESS_MIN_CAPACITY,
        }
    }
}

#[derive(Debug, Serialize)]
struct DbConnectionAttributes {
    instance_id: SymbolicReference,
    port: u16,
}

#[derive(Debug, Serialize)]
struct RdsAccountAttributes<'a> {
    account_name: &'a str,
    account_password: SymbolicReference,
    account_type: &'static str,
    db_instance_id: SymbolicReference,
}

/// Region the Alicloud provider runs in
///
/// The provider config's own region wins over the operator default.
pub fn resolve_region(provider: &ProviderConfig, default_region: Option<&str>) -> Result<String> {
    if let Some(region) = provider.region() {
        return Ok(region.to_string());
    }

    default_region
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(ToString::to_string)
        .ok_or(GenerateError::MissingRegion {
            env: ALICLOUD_REGION_ENV,
        })
}

/// Pick the reference the workload connects to
///
/// Fails when public routing is requested but no public connection was built.
pub fn select_host_address(
    private_routing: bool,
    instance_id: &str,
    connection_id: Option<&str>,
    database_name: &str,
) -> Result<SymbolicReference> {
    if private_routing {
        return Ok(reference_to(instance_id, "connection_string"));
    }

    connection_id
        .map(|id| reference_to(id, "connection_string"))
        .ok_or_else(|| GenerateError::MissingPublicConnection {
            database: database_name.to_string(),
        })
}

/// Build the complete resource graph for a validated PostgreSQL config
pub fn generate_alicloud_db(
    postgres: &PostgreSQL,
    provider: &ProviderConfig,
    default_region: Option<&str>,
    namespace: &str,
    cancel: &CancellationToken,
) -> Result<GeneratorResponse> {
    let region = resolve_region(provider, default_region)?;
    let provider = provider.clone().with_region(region.as_str());
    let database = postgres.database_name.as_str();
    debug!(database, %region, "Resolved Alicloud region");

    let mut resources = Resources::new();

    let (password, password_id) = generate_random_password(database)?;
    resources.push(password);

    let (instance, instance_id) = generate_db_instance(&provider, postgres)?;
    resources.push(instance);

    let connection_id = if is_public_accessible(&postgres.security_ips) {
        let (connection, connection_id) =
            generate_db_connection(&provider, database, &instance_id)?;
        resources.push(connection);
        Some(connection_id)
    } else {
        debug!(database, "Security IPs are not public, skipping public connection");
        None
    };

    resources.push(generate_rds_account(
        &provider,
        postgres,
        &password_id,
        &instance_id,
    )?);

    let host_address = select_host_address(
        postgres.private_routing,
        &instance_id,
        connection_id.as_deref(),
        database,
    )?;

    let (secret, patcher) = assemble_db_secret(
        database,
        namespace,
        &host_address,
        &postgres.username,
        &reference_to(&password_id, "result"),
    )?;
    resources.push(secret);

    resources.check_references()?;
    cancel.check()?;

    info!(
        database,
        resources = resources.len(),
        serverless = postgres.is_serverless(),
        "Built Alicloud PostgreSQL resources"
    );

    Ok(GeneratorResponse {
        resources: resources.into_vec(),
        patcher: Some(patcher),
    })
}

fn generate_db_instance(
    provider: &ProviderConfig,
    postgres: &PostgreSQL,
) -> Result<(Resource, String)> {
    let serverless = postgres.is_serverless();
    let attributes = DbInstanceAttributes {
        category: &postgres.category,
        engine: POSTGRES_ENGINE,
        engine_version: postgres.version.as_deref(),
        instance_storage: postgres.size,
        instance_type: postgres.instance_type.as_deref(),
        security_ips: &postgres.security_ips,
        vswitch_id: postgres.subnet_id.as_deref(),
        instance_name: &postgres.database_name,
        db_instance_storage_type: serverless.then_some(SERVERLESS_STORAGE_TYPE),
        instance_charge_type: serverless.then_some(SERVERLESS_CHARGE_TYPE),
        serverless_config: serverless.then(|| [ServerlessConfig::default()]),
    };

    let id = terraform_resource_id(provider, ALICLOUD_DB_INSTANCE, &postgres.database_name)?;
    let resource = Resource::provider_managed(
        provider,
        ALICLOUD_DB_INSTANCE,
        id.clone(),
        to_attributes("alicloud_db_instance attributes", &attributes)?,
    )?;
    Ok((resource, id))
}

fn generate_db_connection(
    provider: &ProviderConfig,
    database_name: &str,
    instance_id: &str,
) -> Result<(Resource, String)> {
    let attributes = DbConnectionAttributes {
        instance_id: reference_to(instance_id, "id"),
        port: POSTGRES_PORT,
    };

    let id = terraform_resource_id(provider, ALICLOUD_DB_CONNECTION, database_name)?;
    let resource = Resource::provider_managed(
        provider,
        ALICLOUD_DB_CONNECTION,
        id.clone(),
        to_attributes("alicloud_db_connection attributes", &attributes)?,
    )?;
    Ok((resource, id))
}

fn generate_rds_account(
    provider: &ProviderConfig,
    postgres: &PostgreSQL,
    password_id: &str,
    instance_id: &str,
) -> Result<Resource> {
    let attributes = RdsAccountAttributes {
        account_name: &postgres.username,
        account_password: reference_to(password_id, "result"),
        account_type: RDS_ACCOUNT_TYPE,
        db_instance_id: reference_to(instance_id, "id"),
    };

    let id = terraform_resource_id(provider, ALICLOUD_RDS_ACCOUNT, &postgres.database_name)?;
    Resource::provider_managed(
        provider,
        ALICLOUD_RDS_ACCOUNT,
        id,
        to_attributes("alicloud_rds_account attributes", &attributes)?,
    )
}
