//! # Generated Password
//!
//! The database password is never known to the generator: a `random_password`
//! resource produces it at provisioning time and other resources reference its
//! `result` output.

use crate::constants::{
    PASSWORD_LENGTH, PASSWORD_OVERRIDE_SPECIAL, RANDOM_PASSWORD, RANDOM_PROVIDER_SOURCE,
    RANDOM_PROVIDER_VERSION,
};
use crate::error::Result;
use crate::resource::{terraform_resource_id, ProviderConfig, Resource};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RandomPasswordAttributes {
    length: u32,
    special: bool,
    override_special: &'static str,
}

/// Build the `random_password` resource for `database_name` and return it with its id
pub fn generate_random_password(database_name: &str) -> Result<(Resource, String)> {
    let provider = ProviderConfig::new(RANDOM_PROVIDER_SOURCE, RANDOM_PROVIDER_VERSION);
    let attributes = super::to_attributes(
        "random_password attributes",
        &RandomPasswordAttributes {
            length: PASSWORD_LENGTH,
            special: true,
            override_special: PASSWORD_OVERRIDE_SPECIAL,
        },
    )?;

    let id = terraform_resource_id(&provider, RANDOM_PASSWORD, database_name)?;
    let resource = Resource::provider_managed(&provider, RANDOM_PASSWORD, id.clone(), attributes)?;
    Ok((resource, id))
}
