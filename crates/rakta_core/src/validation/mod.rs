use serde::Serialize;

use crate::models::request::RequestDraft;

pub mod rules;

// The structure of a failure
#[derive(Debug, Serialize, Clone)]
pub struct ValidationIssue {
    pub code: String,         // e.g., "REQ-URGENCY"
    pub field: &'static str,  // wire name of the offending field
    pub message: String,
}

// The contract every rule must fulfill
pub trait ValidationRule {
    fn check(&self, draft: &RequestDraft) -> Vec<ValidationIssue>;
    fn rule_id(&self) -> &str;
}

// The engine that holds the registry of all rules
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule<R: ValidationRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn run(&self, draft: &RequestDraft) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            let mut rule_issues = rule.check(draft);
            issues.append(&mut rule_issues);
        }
        issues
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}
