//! Provisioning scope seam
//!
//! Tagging and output registration are side effects on the external
//! provisioning engine's resource tree. The engine is reached through
//! [`ProvisioningScope`]; this crate keeps no tag storage of its own.

use serde::Serialize;

/// Priority used for ordinary tag application
///
/// The engine resolves conflicting assignments at the same key by
/// priority, higher wins.
pub const DEFAULT_TAG_PRIORITY: u32 = 200;

/// Priority for call sites that must win over framework-level
/// auto-tagging of generated resources such as gateways
pub const GENERATED_RESOURCE_TAG_PRIORITY: u32 = 300;

/// A single tag assignment handed to the provisioning engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagApplication {
    /// Tag key
    pub key: String,
    /// Tag value
    pub value: String,
    /// External resource types the tag is limited to; `None` applies to
    /// every resource nested under the scope
    pub resource_types: Option<Vec<String>>,
    /// Conflict-resolution priority, higher wins
    pub priority: u32,
}

/// A named value registered for external consumption
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackOutput {
    /// Logical output name
    pub name: String,
    /// Output value
    pub value: String,
    /// Human-readable description, if any
    pub description: Option<String>,
    /// Cross-stack export name
    pub export_name: String,
}

/// A logical unit of resources in the external provisioning engine
///
/// Implementations forward tag applications and output registrations into
/// the engine's own consistency rules; in particular, idempotency and
/// collision behavior for duplicate output names are the engine's
/// responsibility, not this crate's.
pub trait ProvisioningScope {
    /// Merge a tag assignment onto every matching resource under this scope
    fn apply_tag(&mut self, tag: TagApplication);

    /// Register a named output on this scope
    fn register_output(&mut self, output: StackOutput);
}

/// In-memory scope that records every side effect
///
/// Stands in for the external engine in tests: the recorded applications
/// are the observable analogue of a synthesized resource template.
#[derive(Debug, Default, Serialize)]
pub struct RecordingScope {
    tags: Vec<TagApplication>,
    outputs: Vec<StackOutput>,
}

impl RecordingScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag applications in the order they were applied
    pub fn tags(&self) -> &[TagApplication] {
        &self.tags
    }

    /// Outputs in the order they were registered
    pub fn outputs(&self) -> &[StackOutput] {
        &self.outputs
    }
}

impl ProvisioningScope for RecordingScope {
    fn apply_tag(&mut self, tag: TagApplication) {
        self.tags.push(tag);
    }

    fn register_output(&mut self, output: StackOutput) {
        // Duplicate names are recorded as-is; resolution is the engine's.
        self.outputs.push(output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_scope_keeps_application_order() {
        let mut scope = RecordingScope::new();
        scope.apply_tag(TagApplication {
            key: "Environment".to_string(),
            value: "dev".to_string(),
            resource_types: None,
            priority: DEFAULT_TAG_PRIORITY,
        });
        scope.apply_tag(TagApplication {
            key: "Environment".to_string(),
            value: "prod".to_string(),
            resource_types: Some(vec!["AWS::EC2::NatGateway".to_string()]),
            priority: GENERATED_RESOURCE_TAG_PRIORITY,
        });

        assert_eq!(scope.tags().len(), 2);
        assert_eq!(scope.tags()[0].priority, 200);
        assert_eq!(scope.tags()[1].priority, 300);
    }

    #[test]
    fn test_duplicate_outputs_are_delegated_not_deduplicated() {
        let mut scope = RecordingScope::new();
        let output = StackOutput {
            name: "VpcId".to_string(),
            value: "vpc-123".to_string(),
            description: None,
            export_name: "demo-dev-VpcId".to_string(),
        };
        scope.register_output(output.clone());
        scope.register_output(output);
        assert_eq!(scope.outputs().len(), 2);
    }

    #[test]
    fn test_tag_application_serializes_for_template_inspection() {
        let tag = TagApplication {
            key: "ManagedBy".to_string(),
            value: "CDK".to_string(),
            resource_types: None,
            priority: DEFAULT_TAG_PRIORITY,
        };
        let json = serde_json::to_value(&tag).unwrap();
        assert_eq!(json["key"], "ManagedBy");
        assert_eq!(json["priority"], 200);
        assert!(json["resource_types"].is_null());
    }
}
