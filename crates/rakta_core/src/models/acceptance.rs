use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A donor's commitment to a specific blood request. Created by accept();
/// the report fields stay empty until complete() uploads the donation
/// report and closes the loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acceptance {
    pub id: Uuid,
    pub donor_id: String,
    #[serde(rename = "bloodRequestId")]
    pub request_id: Uuid,
    pub accepted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Acceptance {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
