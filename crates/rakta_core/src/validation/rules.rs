use crate::models::blood_type::BloodType;
use crate::models::request::RequestDraft;
use crate::validation::{ValidationIssue, ValidationRule};

// =========================================================================
// RULE: REQ-FIELDS
// "Every field the intake form requires must be present and non-blank"
// =========================================================================
pub struct RuleRequiredFields;

impl ValidationRule for RuleRequiredFields {
    fn rule_id(&self) -> &str { "REQ-FIELDS" }

    fn check(&self, draft: &RequestDraft) -> Vec<ValidationIssue> {
        // additionalNotes is the only optional field on the form
        let required: [(&'static str, &str); 6] = [
            ("patientName", &draft.patient_name),
            ("hospital", &draft.hospital),
            ("contactPerson", &draft.contact_person),
            ("phoneNumber", &draft.phone_number),
            ("location", &draft.location),
            ("medicalCondition", &draft.medical_condition),
        ];

        let mut issues = Vec::new();
        for (field, value) in required {
            if value.trim().is_empty() {
                issues.push(ValidationIssue {
                    code: self.rule_id().to_string(),
                    field,
                    message: format!("{} is required and cannot be empty", field),
                });
            }
        }
        issues
    }
}

// =========================================================================
// RULE: REQ-BLOOD-TYPE
// "bloodType must be one of the eight clinical labels"
// =========================================================================
pub struct RuleBloodTypeKnown;

impl ValidationRule for RuleBloodTypeKnown {
    fn rule_id(&self) -> &str { "REQ-BLOOD-TYPE" }

    fn check(&self, draft: &RequestDraft) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if draft.blood_type.parse::<BloodType>().is_err() {
            issues.push(ValidationIssue {
                code: self.rule_id().to_string(),
                field: "bloodType",
                message: format!("'{}' is not a recognized blood type", draft.blood_type),
            });
        }
        issues
    }
}

// =========================================================================
// RULE: REQ-UNITS
// "unitsNeeded must be at least 1"
// =========================================================================
pub struct RuleUnitsPositive;

impl ValidationRule for RuleUnitsPositive {
    fn rule_id(&self) -> &str { "REQ-UNITS" }

    fn check(&self, draft: &RequestDraft) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if draft.units_needed < 1 {
            issues.push(ValidationIssue {
                code: self.rule_id().to_string(),
                field: "unitsNeeded",
                message: format!("unitsNeeded must be at least 1, got {}", draft.units_needed),
            });
        }
        issues
    }
}

// =========================================================================
// RULE: REQ-URGENCY
// "urgency must be one of the documented levels 1-4"
// =========================================================================
pub struct RuleUrgencyRange;

impl ValidationRule for RuleUrgencyRange {
    fn rule_id(&self) -> &str { "REQ-URGENCY" }

    fn check(&self, draft: &RequestDraft) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if !(1..=4).contains(&draft.urgency) {
            issues.push(ValidationIssue {
                code: self.rule_id().to_string(),
                field: "urgency",
                message: format!("urgency level '{}' is outside the 1-4 range", draft.urgency),
            });
        }
        issues
    }
}
