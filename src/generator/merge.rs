//! # Config Merging
//!
//! Combines the developer and platform config fragments of one module instance.
//!
//! ## Precedence
//!
//! - An option set by the developer always wins
//! - The platform may only fill options the developer left unset or empty
//! - List options are additive: developer entries first, then platform entries
//!   not already present (compared by full value), without duplicates
//!
//! Merging never validates; a malformed fragment fails the whole merge and no
//! partially merged config is returned.

use crate::error::{ConfigFragment, GenerateError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Typed module configuration that can absorb a platform fragment
pub trait ModuleConfig: DeserializeOwned + Default {
    /// Fill options `self` (developer) left unset from `platform`
    #[must_use]
    fn merge_platform(self, platform: Self) -> Self;
}

/// Decode both fragments and merge them with developer precedence
///
/// Either fragment may be absent or `null`; both absent yields the default config.
pub fn merge_config<T: ModuleConfig>(
    dev_config: Option<&Value>,
    platform_config: Option<&Value>,
) -> Result<T> {
    let dev = decode_fragment::<T>(dev_config, ConfigFragment::Developer)?;
    let platform = decode_fragment::<T>(platform_config, ConfigFragment::Platform)?;
    Ok(dev.merge_platform(platform))
}

fn decode_fragment<T: ModuleConfig>(fragment: Option<&Value>, which: ConfigFragment) -> Result<T> {
    match fragment {
        None | Some(Value::Null) => {
            debug!("No {which} module config provided");
            Ok(T::default())
        }
        Some(value) => T::deserialize(value).map_err(|source| GenerateError::ConfigParse {
            fragment: which,
            source,
        }),
    }
}

/// Scalar option: developer value unless unset
pub fn merge_option<T>(dev: Option<T>, platform: Option<T>) -> Option<T> {
    dev.or(platform)
}

/// String option: empty (or blank) strings count as unset
pub fn merge_string(dev: Option<String>, platform: Option<String>) -> Option<String> {
    non_blank(dev).or_else(|| non_blank(platform))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// List option: developer entries, then platform-only entries, no duplicates
pub fn merge_list<T: PartialEq>(dev: Vec<T>, platform: Vec<T>) -> Vec<T> {
    let mut merged: Vec<T> = Vec::with_capacity(dev.len() + platform.len());
    for entry in dev.into_iter().chain(platform) {
        if !merged.contains(&entry) {
            merged.push(entry);
        }
    }
    merged
}
