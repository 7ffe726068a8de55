//! Shared types for the Envstack system
//!
//! This crate contains the domain types shared across the envstack
//! crates: the deployment stage, the resource tag set, and the
//! configuration error taxonomy.

pub mod error;
pub mod stage;
pub mod tags;

// Re-export commonly used types
pub use error::{ConfigError, Violation};
pub use stage::{ParseStageError, Stage};
pub use tags::TagSet;
