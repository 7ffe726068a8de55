//! Configuration loader implementation
//!
//! The loader owns a raw source, validates it into a single shared
//! snapshot on first use, and derives the network/database/compute
//! configurations on demand so call-time overrides are always honored.

use crate::keys;
use crate::schema::{self, Ec2Config, RdsConfig, StackConfig, VpcConfig};
use crate::source::{ConfigSource, EnvSource};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;
use types::ConfigError;

/// Configuration loader bound to a raw source
///
/// The snapshot is constructed at most once per loader: the first call to
/// [`snapshot`](Self::snapshot) validates and freezes it, and every later
/// call returns the identical `Arc`. A failed attempt leaves the loader
/// unconstructed, so fixing the source and calling again can still succeed.
///
/// Construct one loader at process entry and pass it down by reference;
/// there is deliberately no hidden process-wide instance.
#[derive(Debug)]
pub struct ConfigLoader<S: ConfigSource = EnvSource> {
    source: S,
    snapshot: Mutex<Option<Arc<StackConfig>>>,
}

impl ConfigLoader<EnvSource> {
    /// Loader over the process environment
    pub fn from_env() -> Self {
        Self::new(EnvSource::new())
    }
}

impl<S: ConfigSource> ConfigLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            snapshot: Mutex::new(None),
        }
    }

    /// The process-wide configuration snapshot
    ///
    /// First call validates and constructs; subsequent calls return the
    /// same instance. On validation failure nothing is stored and the
    /// aggregated [`ConfigError::Invalid`] is returned.
    pub fn snapshot(&self) -> Result<Arc<StackConfig>, ConfigError> {
        let mut slot = self.lock_slot();
        if let Some(snapshot) = slot.as_ref() {
            return Ok(Arc::clone(snapshot));
        }

        let snapshot = Arc::new(StackConfig::from_source(&self.source)?);
        info!(
            stage = %snapshot.stage(),
            project = snapshot.project(),
            region = snapshot.region(),
            prefix = snapshot.prefix(),
            "configuration validated"
        );
        *slot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Discard the cached snapshot so the next access re-validates
    ///
    /// Intended for tests that mutate the source between constructions.
    pub fn reset(&self) {
        *self.lock_slot() = None;
    }

    /// Canonical `{project}-{stage}` prefix from the snapshot
    pub fn prefix(&self) -> Result<String, ConfigError> {
        Ok(self.snapshot()?.prefix().to_string())
    }

    /// True only when the configured stage is production
    pub fn is_production(&self) -> Result<bool, ConfigError> {
        Ok(self.snapshot()?.is_production())
    }

    /// True only when the configured stage is development
    pub fn is_development(&self) -> Result<bool, ConfigError> {
        Ok(self.snapshot()?.is_development())
    }

    /// Network configuration, re-derived from the source on every call
    pub fn vpc_config(&self) -> Result<VpcConfig, ConfigError> {
        let snapshot = self.snapshot()?;

        let max_azs = self
            .optional_u32(keys::VPC_MAX_AZS, "integer between 1 and 3")?
            .unwrap_or_else(schema::default_max_azs);
        if !(1..=3).contains(&max_azs) {
            return Err(ConfigError::InvalidOverride {
                key: keys::VPC_MAX_AZS.to_string(),
                expected: "integer between 1 and 3",
                value: max_azs.to_string(),
            });
        }

        let nat_gateways = self
            .optional_u32(keys::VPC_NAT_GATEWAYS, "non-negative integer")?
            .unwrap_or_else(schema::default_nat_gateways);

        // The block validated at load time, unless the source now carries a
        // newer value.
        let cidr_block = self
            .source
            .get(keys::CIDR_BLOCK)
            .unwrap_or_else(|| snapshot.cidr_block().to_string());

        Ok(VpcConfig {
            cidr_block,
            max_azs,
            nat_gateways,
        })
    }

    /// Database configuration, re-derived from the source on every call
    pub fn rds_config(&self) -> Result<RdsConfig, ConfigError> {
        self.snapshot()?;

        let multi_az = self
            .source
            .get(keys::RDS_MULTI_AZ)
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(RdsConfig {
            instance_type: self
                .source
                .get(keys::RDS_INSTANCE_TYPE)
                .unwrap_or_else(schema::default_instance_type),
            multi_az,
            allocated_storage: self
                .optional_u32(keys::RDS_STORAGE, "integer")?
                .unwrap_or_else(schema::default_allocated_storage),
            db_name: self
                .source
                .get(keys::RDS_DB_NAME)
                .unwrap_or_else(schema::default_db_name),
            username: self
                .source
                .get(keys::RDS_USERNAME)
                .unwrap_or_else(schema::default_username),
        })
    }

    /// Compute configuration, re-derived from the source on every call
    pub fn ec2_config(&self) -> Result<Ec2Config, ConfigError> {
        self.snapshot()?;

        Ok(Ec2Config {
            instance_type: self
                .source
                .get(keys::EC2_INSTANCE_TYPE)
                .unwrap_or_else(schema::default_instance_type),
            key_name: self.source.get(keys::EC2_KEY_NAME),
        })
    }

    /// Parse an optional numeric override, failing loudly on junk values
    /// instead of silently substituting the default.
    fn optional_u32(
        &self,
        key: &'static str,
        expected: &'static str,
    ) -> Result<Option<u32>, ConfigError> {
        match self.source.get(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<u32>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidOverride {
                    key: key.to_string(),
                    expected,
                    value: raw,
                }),
        }
    }

    fn lock_slot(&self) -> std::sync::MutexGuard<'_, Option<Arc<StackConfig>>> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
