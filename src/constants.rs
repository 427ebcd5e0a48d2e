//! # Constants
//!
//! Shared constants used throughout the generators.
//!
//! Provider sources, versions and attribute values are part of the contract
//! with the downstream provisioning engine and must not drift.

/// Environment variable holding the operator-level default Alicloud region
pub const ALICLOUD_REGION_ENV: &str = "ALICLOUD_REGION";

/// Terraform registry host used when a provider source omits one
pub const DEFAULT_TERRAFORM_HOST: &str = "registry.terraform.io";

/// Prefix of a symbolic reference resolved by the provisioning engine
pub const REFERENCE_PREFIX: &str = "$kusion_path";

/// Alicloud provider source and pinned version
pub const ALICLOUD_PROVIDER_SOURCE: &str = "aliyun/alicloud";
pub const ALICLOUD_PROVIDER_VERSION: &str = "1.209.1";

/// Random provider source and pinned version
pub const RANDOM_PROVIDER_SOURCE: &str = "hashicorp/random";
pub const RANDOM_PROVIDER_VERSION: &str = "3.5.1";

/// Terraform resource types emitted by the PostgreSQL generator
pub const RANDOM_PASSWORD: &str = "random_password";
pub const ALICLOUD_DB_INSTANCE: &str = "alicloud_db_instance";
pub const ALICLOUD_DB_CONNECTION: &str = "alicloud_db_connection";
pub const ALICLOUD_RDS_ACCOUNT: &str = "alicloud_rds_account";

/// PostgreSQL listener port exposed by the public connection
pub const POSTGRES_PORT: u16 = 5432;

/// Engine name passed to `alicloud_db_instance`
pub const POSTGRES_ENGINE: &str = "PostgreSQL";

/// Account type granted to the generated database account
pub const RDS_ACCOUNT_TYPE: &str = "Super";

/// Serverless capacity bounds (RCU)
pub const SERVERLESS_MAX_CAPACITY: u32 = 8;
pub const SERVERLESS_MIN_CAPACITY: u32 = 1;

/// Storage and charge types switched on for serverless categories
pub const SERVERLESS_STORAGE_TYPE: &str = "cloud_essd";
pub const SERVERLESS_CHARGE_TYPE: &str = "Serverless";

/// Generated password shape
pub const PASSWORD_LENGTH: u32 = 16;
pub const PASSWORD_OVERRIDE_SPECIAL: &str = "_";

/// PostgreSQL module defaults applied when neither config fragment sets an option
pub const DEFAULT_POSTGRES_TYPE: &str = "alicloud";
pub const DEFAULT_POSTGRES_SIZE: u32 = 10;
pub const DEFAULT_POSTGRES_CATEGORY: &str = "Basic";
pub const DEFAULT_POSTGRES_USERNAME: &str = "root";
pub const DEFAULT_POSTGRES_SECURITY_IP: &str = "0.0.0.0/0";
pub const DEFAULT_POSTGRES_PRIVATE_ROUTING: bool = true;

/// Suffix of the credentials secret name
pub const DB_SECRET_SUFFIX: &str = "-postgres";

/// Environment variable prefixes injected into consuming workloads
pub const DB_HOST_ENV_PREFIX: &str = "KUSION_DB_HOST_";
pub const DB_USERNAME_ENV_PREFIX: &str = "KUSION_DB_USERNAME_";
pub const DB_PASSWORD_ENV_PREFIX: &str = "KUSION_DB_PASSWORD_";

/// Manifest file extensions recognized during directory walks (case-insensitive)
pub const MANIFEST_FILE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];
