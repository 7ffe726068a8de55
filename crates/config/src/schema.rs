//! Configuration schema definitions

use crate::keys;
use crate::source::ConfigSource;
use crate::validation::Validator;
use serde::{Deserialize, Serialize};
use types::{ConfigError, Stage, Violation};

/// Raw, unvalidated values as read from a configuration source
///
/// Holds the five required keys. Reading them into one place up front means
/// validation and construction see the same values even if the underlying
/// source mutates mid-call.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    pub stage: Option<String>,
    pub project: Option<String>,
    pub region: Option<String>,
    pub account: Option<String>,
    pub cidr_block: Option<String>,
}

impl RawConfig {
    /// Read the required keys from a source
    pub fn read<S: ConfigSource>(source: &S) -> Self {
        Self {
            stage: source.get(keys::STAGE),
            project: source.get(keys::PROJECT),
            region: source.get(keys::REGION),
            account: source.get(keys::ACCOUNT_ID),
            cidr_block: source.get(keys::CIDR_BLOCK),
        }
    }
}

/// The validated, immutable configuration snapshot
///
/// Fields are private: `prefix` is always recomputed from `project` and
/// `stage` during construction and can never be set independently. The
/// snapshot serializes but deliberately does not deserialize, so the only
/// way to obtain one is through validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackConfig {
    stage: Stage,
    project: String,
    region: String,
    account: String,
    cidr_block: String,
    prefix: String,
}

impl StackConfig {
    /// Validate the raw values from a source and construct the snapshot
    ///
    /// All rule violations are collected into a single
    /// [`ConfigError::Invalid`]; nothing is partially constructed.
    pub fn from_source<S: ConfigSource>(source: &S) -> Result<Self, ConfigError> {
        Self::from_raw(RawConfig::read(source))
    }

    /// Validate already-read raw values and construct the snapshot
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let report = Validator::validate(&raw);
        for issue in report.warnings() {
            tracing::warn!(field = %issue.field, "{}", issue.message);
        }
        report.into_result()?;

        let stage: Stage = raw
            .stage
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(|e: types::ParseStageError| {
                ConfigError::Invalid(vec![Violation::new(keys::STAGE, e.to_string())])
            })?;
        let project = raw.project.unwrap_or_default();
        let prefix = format!("{}-{}", project, stage);

        Ok(Self {
            stage,
            project,
            region: raw.region.unwrap_or_default(),
            account: raw.account.unwrap_or_default(),
            cidr_block: raw.cidr_block.unwrap_or_default(),
            prefix,
        })
    }

    /// Deployment stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Project identifier
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Cloud region identifier
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Cloud account identifier (12 digits)
    pub fn account(&self) -> &str {
        &self.account
    }

    /// VPC CIDR block as validated at load time
    pub fn cidr_block(&self) -> &str {
        &self.cidr_block
    }

    /// Canonical `{project}-{stage}` namespace prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// True only when the stage is production
    pub fn is_production(&self) -> bool {
        self.stage.is_production()
    }

    /// True only when the stage is development
    pub fn is_development(&self) -> bool {
        self.stage.is_development()
    }
}

/// Network configuration derived on demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpcConfig {
    /// VPC CIDR block
    pub cidr_block: String,
    /// Maximum availability zones (1-3)
    #[serde(default = "default_max_azs")]
    pub max_azs: u32,
    /// Number of NAT gateways
    #[serde(default = "default_nat_gateways")]
    pub nat_gateways: u32,
}

/// Database configuration derived on demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdsConfig {
    /// Database instance class
    #[serde(default = "default_instance_type")]
    pub instance_type: String,
    /// Whether the database spans multiple zones
    #[serde(default)]
    pub multi_az: bool,
    /// Allocated storage in GB
    #[serde(default = "default_allocated_storage")]
    pub allocated_storage: u32,
    /// Initial database name
    #[serde(default = "default_db_name")]
    pub db_name: String,
    /// Database admin username
    #[serde(default = "default_username")]
    pub username: String,
}

/// Compute configuration derived on demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ec2Config {
    /// Compute instance class
    #[serde(default = "default_instance_type")]
    pub instance_type: String,
    /// SSH key-pair name, if any
    pub key_name: Option<String>,
}

// Default value functions

pub(crate) fn default_max_azs() -> u32 {
    2
}

pub(crate) fn default_nat_gateways() -> u32 {
    0
}

pub(crate) fn default_instance_type() -> String {
    "t3.micro".to_string()
}

pub(crate) fn default_allocated_storage() -> u32 {
    20
}

pub(crate) fn default_db_name() -> String {
    "cdkapp".to_string()
}

pub(crate) fn default_username() -> String {
    "postgres".to_string()
}
