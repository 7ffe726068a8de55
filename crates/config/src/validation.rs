//! Configuration validation
//!
//! Explicit per-field validators that collect every violation into one
//! report, so a single failed startup names all offending fields at once.

use crate::keys;
use crate::schema::RawConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use types::{ConfigError, Stage, Violation};

static ACCOUNT_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{12}$").expect("account id regex"));

// Syntactic check only: octet and mask ranges are not enforced here, they
// are surfaced as warnings below.
static CIDR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}/\d{1,2}$").expect("cidr regex"));

/// Configuration validator
pub struct Validator;

impl Validator {
    /// Validate the complete raw rule set, collecting all violations
    pub fn validate(raw: &RawConfig) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_stage(raw.stage.as_deref(), &mut report);
        Self::validate_project(raw.project.as_deref(), &mut report);
        Self::validate_region(raw.region.as_deref(), &mut report);
        Self::validate_account(raw.account.as_deref(), &mut report);
        Self::validate_cidr_block(raw.cidr_block.as_deref(), &mut report);

        report
    }

    fn validate_stage(value: Option<&str>, report: &mut ValidationReport) {
        match value {
            None => report.add_error(keys::STAGE, "required key is not set"),
            Some(v) => {
                if let Err(e) = v.parse::<Stage>() {
                    report.add_error(keys::STAGE, &e.to_string());
                }
            }
        }
    }

    fn validate_project(value: Option<&str>, report: &mut ValidationReport) {
        match value {
            None => report.add_error(keys::PROJECT, "required key is not set"),
            Some("") => report.add_error(keys::PROJECT, "must not be empty"),
            Some(_) => {}
        }
    }

    fn validate_region(value: Option<&str>, report: &mut ValidationReport) {
        match value {
            None => report.add_error(keys::REGION, "required key is not set"),
            Some("") => report.add_error(keys::REGION, "must not be empty"),
            Some(_) => {}
        }
    }

    fn validate_account(value: Option<&str>, report: &mut ValidationReport) {
        match value {
            None => report.add_error(keys::ACCOUNT_ID, "required key is not set"),
            Some(v) => {
                if !ACCOUNT_ID_RE.is_match(v) {
                    report.add_error(keys::ACCOUNT_ID, "must be exactly 12 ASCII digits");
                }
            }
        }
    }

    fn validate_cidr_block(value: Option<&str>, report: &mut ValidationReport) {
        let v = match value {
            None => {
                report.add_error(keys::CIDR_BLOCK, "required key is not set");
                return;
            }
            Some(v) => v,
        };

        if !CIDR_RE.is_match(v) {
            report.add_error(keys::CIDR_BLOCK, "must match IPv4 CIDR notation a.b.c.d/n");
            return;
        }

        // The compatibility contract accepts numerically out-of-range blocks;
        // flag them without failing.
        if let Some((addr, mask)) = v.split_once('/') {
            for octet in addr.split('.') {
                if let Ok(n) = octet.parse::<u32>() {
                    if n > 255 {
                        report.add_warning(keys::CIDR_BLOCK, &format!("octet {} exceeds 255", n));
                    }
                }
            }
            if let Ok(bits) = mask.parse::<u32>() {
                if bits > 32 {
                    report.add_warning(keys::CIDR_BLOCK, &format!("mask /{} exceeds /32", bits));
                }
            }
        }
    }
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    errors: Vec<Violation>,
    warnings: Vec<Violation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(Violation::new(field, message));
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(Violation::new(field, message));
    }

    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Violation] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> String {
        format!(
            "Validation: {} errors, {} warnings",
            self.errors.len(),
            self.warnings.len()
        )
    }

    /// Consume the report, failing with the aggregated error if any rule broke
    pub fn into_result(self) -> Result<(), ConfigError> {
        if self.has_errors() {
            Err(ConfigError::Invalid(self.errors))
        } else {
            Ok(())
        }
    }
}
