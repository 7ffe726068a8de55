//! Deterministic resource names and canonical tags

use crate::scope::{ProvisioningScope, StackOutput, TagApplication, DEFAULT_TAG_PRIORITY};
use config::StackConfig;
use std::sync::Arc;
use tracing::debug;
use types::TagSet;

/// Tag key carrying the deployment stage
pub const TAG_ENVIRONMENT: &str = "Environment";
/// Tag key carrying the project identifier
pub const TAG_PROJECT: &str = "Project";
/// Tag key identifying the provisioning tool
pub const TAG_MANAGED_BY: &str = "ManagedBy";
/// Tag key carrying the resource name prefix
pub const TAG_PREFIX: &str = "Prefix";

/// Value of the `ManagedBy` tag on every resource
pub const MANAGED_BY: &str = "CDK";

/// Naming and tagging operations bound to a configuration snapshot
///
/// Every operation is either a pure function of the snapshot and its
/// arguments, or a side effect delegated to a [`ProvisioningScope`].
#[derive(Debug, Clone)]
pub struct StackContext {
    config: Arc<StackConfig>,
}

impl StackContext {
    pub fn new(config: Arc<StackConfig>) -> Self {
        Self { config }
    }

    /// The snapshot this context derives names and tags from
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Full resource name for a logical name: `{prefix}-{logical_name}`
    ///
    /// No normalization is applied; callers pass already-clean logical
    /// names. Identical inputs always produce identical output.
    pub fn resource_name(&self, logical_name: &str) -> String {
        format!("{}-{}", self.config.prefix(), logical_name)
    }

    /// Canonical base tag set for every resource of this stack
    pub fn common_tags(&self) -> TagSet {
        let mut tags = TagSet::new();
        tags.insert(TAG_ENVIRONMENT, self.config.stage().as_str());
        tags.insert(TAG_PROJECT, self.config.project());
        tags.insert(TAG_MANAGED_BY, MANAGED_BY);
        tags.insert(TAG_PREFIX, self.config.prefix());
        tags
    }

    /// Merge the given tags onto every resource under the scope
    pub fn apply_tags(&self, scope: &mut dyn ProvisioningScope, tags: &TagSet) {
        debug!(prefix = self.config.prefix(), count = tags.len(), "applying tags");
        for (key, value) in tags {
            scope.apply_tag(TagApplication {
                key: key.clone(),
                value: value.clone(),
                resource_types: None,
                priority: DEFAULT_TAG_PRIORITY,
            });
        }
    }

    /// Merge one tag onto resources of the named external types only
    ///
    /// `priority` resolves conflicting assignments at the same key in the
    /// engine, higher wins; pass
    /// [`GENERATED_RESOURCE_TAG_PRIORITY`](crate::GENERATED_RESOURCE_TAG_PRIORITY)
    /// to beat framework auto-tagging of generated resources.
    pub fn apply_tags_to_resource_types(
        &self,
        scope: &mut dyn ProvisioningScope,
        key: &str,
        value: &str,
        resource_types: &[&str],
        priority: u32,
    ) {
        debug!(key, priority, "applying tag to resource types");
        scope.apply_tag(TagApplication {
            key: key.to_string(),
            value: value.to_string(),
            resource_types: Some(resource_types.iter().map(|t| t.to_string()).collect()),
            priority,
        });
    }

    /// Register a named, described value for external consumption
    ///
    /// `export_name` defaults to `{prefix}-{name}`. Collision behavior for
    /// duplicate names is delegated to the engine.
    pub fn create_output(
        &self,
        scope: &mut dyn ProvisioningScope,
        name: &str,
        value: &str,
        description: Option<&str>,
        export_name: Option<&str>,
    ) {
        let export_name = match export_name {
            Some(explicit) => explicit.to_string(),
            None => format!("{}-{}", self.config.prefix(), name),
        };
        debug!(name, export_name, "registering stack output");
        scope.register_output(StackOutput {
            name: name.to_string(),
            value: value.to_string(),
            description: description.map(str::to_string),
            export_name,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{RecordingScope, GENERATED_RESOURCE_TAG_PRIORITY};
    use config::{MemorySource, StackConfig};

    fn context(stage: &str, project: &str) -> StackContext {
        let source = MemorySource::from_pairs([
            ("STAGE", stage),
            ("PROJECT", project),
            ("REGION", "us-east-1"),
            ("ACCOUNT_ID", "123456789012"),
            ("CIDR_BLOCK", "10.0.0.0/16"),
        ]);
        StackContext::new(Arc::new(StackConfig::from_source(&source).unwrap()))
    }

    #[test]
    fn test_resource_name_is_deterministic() {
        let ctx = context("dev", "test-project");
        assert_eq!(ctx.resource_name("vpc"), "test-project-dev-vpc");
        assert_eq!(ctx.resource_name("vpc"), "test-project-dev-vpc");
        assert_eq!(ctx.resource_name("db-subnet-group"), "test-project-dev-db-subnet-group");
    }

    #[test]
    fn test_resource_name_applies_no_normalization() {
        let ctx = context("dev", "test-project");
        assert_eq!(ctx.resource_name("My Vpc"), "test-project-dev-My Vpc");
    }

    #[test]
    fn test_common_tags_canonical_set() {
        let ctx = context("prod", "p");
        let tags = ctx.common_tags();

        assert_eq!(tags.len(), 4);
        assert_eq!(tags.get("Environment"), Some("prod"));
        assert_eq!(tags.get("Project"), Some("p"));
        assert_eq!(tags.get("ManagedBy"), Some("CDK"));
        assert_eq!(tags.get("Prefix"), Some("p-prod"));
    }

    #[test]
    fn test_apply_tags_forwards_every_tag_at_default_priority() {
        let ctx = context("stg", "shop");
        let mut scope = RecordingScope::new();

        let mut tags = ctx.common_tags();
        tags.insert("CostCenter", "42");
        ctx.apply_tags(&mut scope, &tags);

        assert_eq!(scope.tags().len(), 5);
        assert!(scope
            .tags()
            .iter()
            .all(|t| t.priority == DEFAULT_TAG_PRIORITY && t.resource_types.is_none()));
        assert!(scope
            .tags()
            .iter()
            .any(|t| t.key == "Prefix" && t.value == "shop-stg"));
    }

    #[test]
    fn test_caller_tags_merge_last_write_wins() {
        let ctx = context("dev", "shop");
        let mut tags = ctx.common_tags();
        let extra: TagSet = [("Environment", "sandbox"), ("Owner", "data-team")]
            .into_iter()
            .collect();
        tags.merge(&extra);

        assert_eq!(tags.get("Environment"), Some("sandbox"));
        assert_eq!(tags.get("Owner"), Some("data-team"));
        assert_eq!(tags.len(), 5);
    }

    #[test]
    fn test_apply_tags_to_resource_types_carries_filter_and_priority() {
        let ctx = context("dev", "shop");
        let mut scope = RecordingScope::new();

        ctx.apply_tags_to_resource_types(
            &mut scope,
            "Name",
            &ctx.resource_name("nat"),
            &["AWS::EC2::NatGateway"],
            GENERATED_RESOURCE_TAG_PRIORITY,
        );

        assert_eq!(scope.tags().len(), 1);
        let tag = &scope.tags()[0];
        assert_eq!(tag.key, "Name");
        assert_eq!(tag.value, "shop-dev-nat");
        assert_eq!(
            tag.resource_types.as_deref(),
            Some(&["AWS::EC2::NatGateway".to_string()][..])
        );
        assert_eq!(tag.priority, 300);
    }

    #[test]
    fn test_create_output_defaults_export_name_to_prefixed_name() {
        let ctx = context("dev", "shop");
        let mut scope = RecordingScope::new();

        ctx.create_output(&mut scope, "VpcId", "vpc-123", Some("VPC identifier"), None);
        ctx.create_output(&mut scope, "DbEndpoint", "db.internal", None, Some("shared-db"));

        assert_eq!(scope.outputs().len(), 2);
        assert_eq!(scope.outputs()[0].export_name, "shop-dev-VpcId");
        assert_eq!(scope.outputs()[0].description.as_deref(), Some("VPC identifier"));
        assert_eq!(scope.outputs()[1].export_name, "shared-db");
        assert_eq!(scope.outputs()[1].description, None);
    }
}
