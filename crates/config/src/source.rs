//! Raw configuration sources
//!
//! The loader reads from an opaque key → optional string mapping rather
//! than the process environment directly, so tests can inject a fake
//! source instead of mutating real environment variables.

use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex, PoisonError};

/// An opaque source of raw configuration values
pub trait ConfigSource {
    /// Look up the raw string value for a key, if present
    fn get(&self, key: &str) -> Option<String>;
}

/// Configuration source backed by the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl EnvSource {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// In-memory configuration source for tests
///
/// Clones share the same underlying storage, so a test can hand a clone to
/// a loader and keep another handle to mutate values between construction
/// attempts.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source from key-value pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            values: Arc::new(Mutex::new(values)),
        }
    }

    /// Set a value, replacing any existing one
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().insert(key.into(), value.into());
    }

    /// Remove a value if present
    pub fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ConfigSource for MemorySource {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_lookup() {
        let source = MemorySource::from_pairs([("STAGE", "dev"), ("PROJECT", "demo")]);
        assert_eq!(source.get("STAGE").as_deref(), Some("dev"));
        assert_eq!(source.get("REGION"), None);
    }

    #[test]
    fn test_memory_source_clones_share_storage() {
        let source = MemorySource::new();
        let handle = source.clone();

        handle.set("STAGE", "prod");
        assert_eq!(source.get("STAGE").as_deref(), Some("prod"));

        handle.remove("STAGE");
        assert_eq!(source.get("STAGE"), None);
    }

    #[test]
    fn test_env_source_reads_process_environment() {
        // Set a key unlikely to collide with anything else in the test run.
        env::set_var("ENVSTACK_SOURCE_TEST_KEY", "42");
        assert_eq!(
            EnvSource::new().get("ENVSTACK_SOURCE_TEST_KEY").as_deref(),
            Some("42")
        );
        env::remove_var("ENVSTACK_SOURCE_TEST_KEY");
        assert_eq!(EnvSource::new().get("ENVSTACK_SOURCE_TEST_KEY"), None);
    }
}
