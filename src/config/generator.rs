//! # Generator Configuration
//!
//! Host-level settings loaded from environment variables.

use crate::constants::ALICLOUD_REGION_ENV;

/// Host-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
/// None of these values reach the generators implicitly: the default region is
/// handed to [`crate::generator::postgres::PostgresGenerator`] explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Operator-level default Alicloud region
    /// Used only when the provider config does not carry a region
    pub default_region: Option<String>,
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    /// Enable color in text format logs
    pub log_enable_color: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_region: None,
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
            log_enable_color: false,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// `from_env` is a thin wrapper over this so tests never touch the real
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            default_region: lookup(ALICLOUD_REGION_ENV)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            log_level: var_or_default_str(&lookup, "LOG_LEVEL", &defaults.log_level),
            log_format: var_or_default_str(&lookup, "LOG_FORMAT", &defaults.log_format),
            log_enable_color: var_or_default_bool(
                &lookup,
                "LOG_ENABLE_COLOR",
                defaults.log_enable_color,
            ),
        }
    }

    /// Whether logs should be emitted as JSON lines
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Read variable as boolean or return default
fn var_or_default_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            let v_lower = v.to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}

/// Read variable as string or return default
fn var_or_default_str<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}
