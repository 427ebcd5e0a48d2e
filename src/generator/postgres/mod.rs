//! # PostgreSQL Generator
//!
//! Turns a PostgreSQL module instance into a managed Alicloud RDS instance,
//! its account, an optional public connection and a credentials Secret the
//! consuming workload reads through injected environment variables.

mod alicloud;
pub mod config;
mod network;
mod password;
mod secret;

pub use alicloud::{generate_alicloud_db, resolve_region, select_host_address};
pub use config::{PostgreSQL, PostgresConfig};
pub use network::is_public_accessible;
pub use password::generate_random_password;
pub use secret::assemble_db_secret;

use super::{merge_config, CancellationToken, Generator, GeneratorRequest, GeneratorResponse};
use crate::constants::{ALICLOUD_PROVIDER_SOURCE, ALICLOUD_PROVIDER_VERSION};
use crate::error::{GenerateError, Result};
use crate::resource::ProviderConfig;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Generator for the `postgres` module
#[derive(Debug, Clone)]
pub struct PostgresGenerator {
    alicloud_provider: ProviderConfig,
    default_region: Option<String>,
}

impl Default for PostgresGenerator {
    fn default() -> Self {
        Self {
            alicloud_provider: ProviderConfig::new(
                ALICLOUD_PROVIDER_SOURCE,
                ALICLOUD_PROVIDER_VERSION,
            ),
            default_region: None,
        }
    }
}

impl PostgresGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different Alicloud provider, e.g. one pinned to a region
    #[must_use]
    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.alicloud_provider = provider;
        self
    }

    /// Region used when the provider config carries none
    #[must_use]
    pub fn with_default_region(mut self, region: Option<String>) -> Self {
        self.default_region = region;
        self
    }
}

impl Generator for PostgresGenerator {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn generate(
        &self,
        request: &GeneratorRequest,
        cancel: &CancellationToken,
    ) -> Result<GeneratorResponse> {
        let postgres = merge_config::<PostgresConfig>(
            request.dev_config.as_ref(),
            request.platform_config.as_ref(),
        )?
        .complete(&request.app);
        postgres.validate()?;
        debug!(database = %postgres.database_name, ?postgres, "Effective PostgreSQL config");

        cancel.check()?;

        generate_alicloud_db(
            &postgres,
            &self.alicloud_provider,
            self.default_region.as_deref(),
            &request.project,
            cancel,
        )
    }
}

/// Serialize a typed attribute struct into a resource attribute map
pub(crate) fn to_attributes<T: Serialize>(
    what: &'static str,
    attributes: &T,
) -> Result<Map<String, Value>> {
    match serde_json::to_value(attributes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(GenerateError::validation(
            what,
            format!("expected an object, got {other}"),
        )),
        Err(source) => Err(GenerateError::Serialization { what, source }),
    }
}
