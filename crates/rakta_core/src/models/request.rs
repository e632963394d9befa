use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::blood_type::BloodType;

/// Hours a request stays open for a raw urgency level. Levels outside the
/// documented 1-4 range fall through to the 72h routine window.
pub fn ttl_hours_for_level(level: i16) -> i64 {
    match level {
        1 => 2,
        2 => 6,
        3 => 24,
        _ => 72,
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("urgency level out of range: {0}")]
pub struct InvalidUrgency(pub i16);

/// Urgency of a blood request, ordinal 1 (most urgent) to 4.
/// Serialized as the raw number, matching the stored documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum Urgency {
    Critical = 1,
    Urgent = 2,
    Moderate = 3,
    Routine = 4,
}

impl Urgency {
    pub fn from_level(level: i16) -> Option<Urgency> {
        match level {
            1 => Some(Urgency::Critical),
            2 => Some(Urgency::Urgent),
            3 => Some(Urgency::Moderate),
            4 => Some(Urgency::Routine),
            _ => None,
        }
    }

    pub fn level(self) -> i16 {
        self as i16
    }

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Critical => "Critical",
            Urgency::Urgent => "Urgent",
            Urgency::Moderate => "Moderate",
            Urgency::Routine => "Routine",
        }
    }

    /// The response window shown to seekers when they pick a level.
    pub fn window(self) -> &'static str {
        match self {
            Urgency::Critical => "within 2 hours",
            Urgency::Urgent => "within 6 hours",
            Urgency::Moderate => "within 24 hours",
            Urgency::Routine => "within 3 days",
        }
    }

    pub fn ttl_hours(self) -> i64 {
        ttl_hours_for_level(self.level())
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i16> for Urgency {
    type Error = InvalidUrgency;

    fn try_from(level: i16) -> Result<Self, Self::Error> {
        Urgency::from_level(level).ok_or(InvalidUrgency(level))
    }
}

impl From<Urgency> for i16 {
    fn from(urgency: Urgency) -> i16 {
        urgency.level()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown request status: '{0}'")]
pub struct ParseStatusError(pub String);

/// Lifecycle state of a blood request. `requested` is the only live state;
/// there is no transition out of `expired` or `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Requested,
    Expired,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Requested => "requested",
            RequestStatus::Expired => "expired",
            RequestStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(RequestStatus::Requested),
            "expired" => Ok(RequestStatus::Expired),
            "completed" => Ok(RequestStatus::Completed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A raw request submission, exactly as the intake form posts it. Runs
/// through the standard validator before it is ever turned into a typed
/// [`BloodRequest`]. Defaults mirror the form's initial state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestDraft {
    pub patient_name: String,
    pub blood_type: String,
    pub units_needed: i32,
    pub urgency: i16,
    pub hospital: String,
    pub contact_person: String,
    pub phone_number: String,
    pub location: String,
    pub medical_condition: String,
    pub additional_notes: String,
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self {
            patient_name: String::new(),
            blood_type: String::new(),
            units_needed: 1,
            urgency: 2,
            hospital: String::new(),
            contact_person: String::new(),
            phone_number: String::new(),
            location: String::new(),
            medical_condition: String::new(),
            additional_notes: String::new(),
        }
    }
}

/// A persisted blood request. `expires_at` keeps its original wire name
/// `ttl`: an absolute deadline, not a duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequest {
    pub id: Uuid,
    pub patient_name: String,
    pub blood_type: BloodType,
    pub units_needed: i32,
    pub urgency: Urgency,
    pub hospital: String,
    pub contact_person: String,
    pub phone_number: String,
    pub location: String,
    pub medical_condition: String,
    pub additional_notes: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "ttl")]
    pub expires_at: DateTime<Utc>,
}

impl BloodRequest {
    /// True when the deadline has passed while the request is still open.
    /// Readers flip such rows to `expired` instead of returning them.
    pub fn due_for_expiry(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now && self.status == RequestStatus::Requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn ttl_table_matches_urgency_levels() {
        assert_eq!(ttl_hours_for_level(1), 2);
        assert_eq!(ttl_hours_for_level(2), 6);
        assert_eq!(ttl_hours_for_level(3), 24);
    }

    #[test]
    fn ttl_defaults_to_routine_window() {
        // Anything outside 1-4 gets the 72h fallback, as shipped
        assert_eq!(ttl_hours_for_level(4), 72);
        assert_eq!(ttl_hours_for_level(0), 72);
        assert_eq!(ttl_hours_for_level(5), 72);
        assert_eq!(ttl_hours_for_level(99), 72);
        assert_eq!(ttl_hours_for_level(-1), 72);
    }

    #[test]
    fn urgency_levels_round_trip() {
        for level in 1..=4i16 {
            let urgency = Urgency::from_level(level).unwrap();
            assert_eq!(urgency.level(), level);
            assert_eq!(urgency.ttl_hours(), ttl_hours_for_level(level));
        }
        assert!(Urgency::from_level(0).is_none());
        assert!(Urgency::from_level(5).is_none());
    }

    #[test]
    fn urgency_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Urgency::Critical).unwrap(), "1");
        let parsed: Urgency = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, Urgency::Moderate);
        assert!(serde_json::from_str::<Urgency>("7").is_err());
    }

    #[test]
    fn draft_defaults_mirror_the_form() {
        let draft = RequestDraft::default();
        assert_eq!(draft.units_needed, 1);
        assert_eq!(draft.urgency, 2);
        assert!(draft.patient_name.is_empty());
    }

    #[test]
    fn expiry_check_requires_open_status() {
        let now = Utc::now();
        let mut request = BloodRequest {
            id: Uuid::new_v4(),
            patient_name: "Ram Shrestha".to_string(),
            blood_type: BloodType::APos,
            units_needed: 2,
            urgency: Urgency::Urgent,
            hospital: "Patan Hospital".to_string(),
            contact_person: "Sita Shrestha".to_string(),
            phone_number: "9800000000".to_string(),
            location: "Lalitpur".to_string(),
            medical_condition: "Surgery".to_string(),
            additional_notes: String::new(),
            status: RequestStatus::Requested,
            created_at: now - Duration::hours(8),
            expires_at: now - Duration::hours(2),
        };
        assert!(request.due_for_expiry(now));

        request.status = RequestStatus::Completed;
        assert!(!request.due_for_expiry(now));

        request.status = RequestStatus::Requested;
        request.expires_at = now + Duration::hours(1);
        assert!(!request.due_for_expiry(now));
    }

    #[test]
    fn request_keeps_original_wire_names() {
        let now = Utc::now();
        let request = BloodRequest {
            id: Uuid::new_v4(),
            patient_name: "Ram Shrestha".to_string(),
            blood_type: BloodType::ONeg,
            units_needed: 1,
            urgency: Urgency::Critical,
            hospital: "Patan Hospital".to_string(),
            contact_person: "Sita Shrestha".to_string(),
            phone_number: "9800000000".to_string(),
            location: "Lalitpur".to_string(),
            medical_condition: "Accident".to_string(),
            additional_notes: String::new(),
            status: RequestStatus::Requested,
            created_at: now,
            expires_at: now + Duration::hours(2),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["bloodType"], "O-");
        assert_eq!(json["urgency"], 1);
        assert_eq!(json["status"], "requested");
        assert!(json.get("ttl").is_some());
        assert!(json.get("expiresAt").is_none());
    }
}
