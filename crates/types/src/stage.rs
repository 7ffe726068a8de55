//! Deployment stage tier

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Deployment environment tier
///
/// The raw configuration forms are the short names `dev`, `stg` and `prod`;
/// those are also the forms used in serialized output and in the
/// `Environment` resource tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Development environment (`dev`)
    #[serde(rename = "dev")]
    Development,
    /// Staging environment (`stg`)
    #[serde(rename = "stg")]
    Staging,
    /// Production environment (`prod`)
    #[serde(rename = "prod")]
    Production,
}

/// Error returned when parsing an unknown stage name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown stage '{0}', expected one of: dev, stg, prod")]
pub struct ParseStageError(pub String);

impl Stage {
    /// Short name used in raw configuration, prefixes and tags
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Development => "dev",
            Stage::Staging => "stg",
            Stage::Production => "prod",
        }
    }

    /// True only for the production stage
    pub fn is_production(&self) -> bool {
        matches!(self, Stage::Production)
    }

    /// True only for the development stage
    pub fn is_development(&self) -> bool {
        matches!(self, Stage::Development)
    }
}

impl FromStr for Stage {
    type Err = ParseStageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Stage::Development),
            "stg" => Ok(Stage::Staging),
            "prod" => Ok(Stage::Production),
            other => Err(ParseStageError(other.to_string())),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_stages() {
        assert_eq!("dev".parse::<Stage>().unwrap(), Stage::Development);
        assert_eq!("stg".parse::<Stage>().unwrap(), Stage::Staging);
        assert_eq!("prod".parse::<Stage>().unwrap(), Stage::Production);
    }

    #[test]
    fn test_parse_rejects_long_and_unknown_forms() {
        assert!("development".parse::<Stage>().is_err());
        assert!("production".parse::<Stage>().is_err());
        assert!("PROD".parse::<Stage>().is_err());
        assert!("".parse::<Stage>().is_err());

        let err = "qa".parse::<Stage>().unwrap_err();
        assert_eq!(err.to_string(), "unknown stage 'qa', expected one of: dev, stg, prod");
    }

    #[test]
    fn test_display_matches_raw_form() {
        assert_eq!(Stage::Development.to_string(), "dev");
        assert_eq!(Stage::Staging.to_string(), "stg");
        assert_eq!(Stage::Production.to_string(), "prod");
    }

    #[test]
    fn test_predicates_are_exclusive() {
        for stage in [Stage::Development, Stage::Staging, Stage::Production] {
            assert!(!(stage.is_production() && stage.is_development()));
        }
        assert!(Stage::Production.is_production());
        assert!(Stage::Development.is_development());
        // Staging is neither
        assert!(!Stage::Staging.is_production());
        assert!(!Stage::Staging.is_development());
    }

    #[test]
    fn test_serde_uses_short_names() {
        assert_eq!(serde_json::to_string(&Stage::Production).unwrap(), "\"prod\"");
        let stage: Stage = serde_json::from_str("\"stg\"").unwrap();
        assert_eq!(stage, Stage::Staging);
    }
}
