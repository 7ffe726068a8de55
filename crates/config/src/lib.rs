//! Configuration management for the Envstack system
//!
//! This crate handles reading, validation, and management of the
//! environment-driven stack configuration: the immutable configuration
//! snapshot, and the network/database/compute values derived from it.

pub mod keys;
pub mod loader;
pub mod schema;
pub mod source;
pub mod validation;

pub use loader::ConfigLoader;
pub use schema::{Ec2Config, RawConfig, RdsConfig, StackConfig, VpcConfig};
pub use source::{ConfigSource, EnvSource, MemorySource};
pub use validation::{ValidationReport, Validator};
