//! Resource naming and tagging for the Envstack system
//!
//! Given a validated configuration snapshot, this crate derives
//! deterministic resource names, the canonical base tag set, and applies
//! tags and stack outputs to a provisioning scope.

pub mod context;
pub mod scope;

pub use context::{StackContext, MANAGED_BY, TAG_ENVIRONMENT, TAG_MANAGED_BY, TAG_PREFIX, TAG_PROJECT};
pub use scope::{
    ProvisioningScope, RecordingScope, StackOutput, TagApplication, DEFAULT_TAG_PRIORITY,
    GENERATED_RESOURCE_TAG_PRIORITY,
};
