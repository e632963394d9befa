pub mod compat;
pub mod error;
pub mod models;
pub mod validation;

pub use error::{Error, Result};

use validation::{rules, ValidationEngine};

/// The validator every request submission runs through before persistence.
pub fn standard_request_validator() -> ValidationEngine {
    ValidationEngine::new()
        .add_rule(rules::RuleRequiredFields)
        .add_rule(rules::RuleBloodTypeKnown)
        .add_rule(rules::RuleUnitsPositive)
        .add_rule(rules::RuleUrgencyRange)
}
