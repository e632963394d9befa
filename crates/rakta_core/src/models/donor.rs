use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::blood_type::BloodType;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown user role: '{0}'")]
pub struct ParseRoleError(pub String);

/// The two registered roles: individual donors and the hospitals / blood
/// banks that file requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Donor,
    Seeker,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Donor => "donor",
            Role::Seeker => "seeker",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "donor" => Ok(Role::Donor),
            "seeker" => Ok(Role::Seeker),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// One record in the `users` collection. The id is the auth provider's uid,
/// assigned outside this system. Role-specific fields stay `None` for the
/// other role and are skipped on the wire, so documents only carry the
/// fields their role actually filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<BloodType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub total_donations: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_donation_at: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_available() -> bool {
    true
}

impl UserRecord {
    /// Human-readable name: person name for donors, organization name for
    /// seekers, falling back to the email.
    pub fn display_name(&self) -> String {
        match self.role {
            Role::Donor => {
                let full = format!("{} {}", self.first_name, self.last_name);
                let full = full.trim().to_string();
                if full.is_empty() {
                    self.email.clone()
                } else {
                    full
                }
            }
            Role::Seeker => self
                .org_name
                .clone()
                .unwrap_or_else(|| self.email.clone()),
        }
    }
}
