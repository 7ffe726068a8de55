//! Raw configuration key names
//!
//! Every key the loader reads from its [`crate::ConfigSource`]. The five
//! required keys are validated when the snapshot is constructed; the rest
//! are optional overrides consumed by the derived configurations.

/// Deployment stage, one of `dev` / `stg` / `prod` (required)
pub const STAGE: &str = "STAGE";
/// Project identifier, non-empty (required)
pub const PROJECT: &str = "PROJECT";
/// Cloud region identifier, non-empty (required)
pub const REGION: &str = "REGION";
/// Cloud account identifier, exactly 12 digits (required)
pub const ACCOUNT_ID: &str = "ACCOUNT_ID";
/// VPC CIDR block in IPv4 CIDR notation (required)
pub const CIDR_BLOCK: &str = "CIDR_BLOCK";

/// Maximum availability zones for the VPC, 1-3 (default 2)
pub const VPC_MAX_AZS: &str = "VPC_MAX_AZS";
/// Number of NAT gateways for the VPC (default 0)
pub const VPC_NAT_GATEWAYS: &str = "VPC_NAT_GATEWAYS";

/// Database instance class (default `t3.micro`)
pub const RDS_INSTANCE_TYPE: &str = "RDS_INSTANCE_TYPE";
/// Multi-zone database flag, `true` or anything else (default false)
pub const RDS_MULTI_AZ: &str = "RDS_MULTI_AZ";
/// Allocated database storage in GB (default 20)
pub const RDS_STORAGE: &str = "RDS_STORAGE";
/// Initial database name (default `cdkapp`)
pub const RDS_DB_NAME: &str = "RDS_DB_NAME";
/// Database admin username (default `postgres`)
pub const RDS_USERNAME: &str = "RDS_USERNAME";

/// Compute instance class (default `t3.micro`)
pub const EC2_INSTANCE_TYPE: &str = "EC2_INSTANCE_TYPE";
/// SSH key-pair name (no default)
pub const EC2_KEY_NAME: &str = "EC2_KEY_NAME";
