use chrono::{Duration, Utc};
use uuid::Uuid;

use rakta_core::models::blood_type::BloodType;
use rakta_core::models::request::{
    ttl_hours_for_level, BloodRequest, RequestDraft, RequestStatus, Urgency,
};
use rakta_core::standard_request_validator;
use rakta_core::{Error, Result};

use crate::DonationService;

/// Fixed size of the home-page urgency banner.
pub const URGENCY_HEADER_LIMIT: u32 = 6;

impl DonationService {
    /// Validates a raw submission, stamps the lifecycle fields and persists
    /// the typed request. The deadline comes straight from the urgency
    /// level's TTL window.
    pub async fn create_request(&self, draft: RequestDraft) -> Result<BloodRequest> {
        // 1. Validate before anything touches the store
        let issues = standard_request_validator().run(&draft);
        if !issues.is_empty() {
            let joined = issues
                .iter()
                .map(|i| i.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::Validation(joined));
        }

        // 2. Typed fields (the validator already vouched for these)
        let blood_type = draft
            .blood_type
            .parse::<BloodType>()
            .map_err(|e| Error::Validation(e.to_string()))?;
        let urgency = Urgency::from_level(draft.urgency)
            .ok_or_else(|| Error::Validation(format!("urgency level {}", draft.urgency)))?;

        // 3. Stamp the lifecycle fields
        let now = Utc::now();
        let request = BloodRequest {
            id: Uuid::new_v4(),
            patient_name: draft.patient_name,
            blood_type,
            units_needed: draft.units_needed,
            urgency,
            hospital: draft.hospital,
            contact_person: draft.contact_person,
            phone_number: draft.phone_number,
            location: draft.location,
            medical_condition: draft.medical_condition,
            additional_notes: draft.additional_notes,
            status: RequestStatus::Requested,
            created_at: now,
            expires_at: now + Duration::hours(ttl_hours_for_level(draft.urgency)),
        };

        // 4. Persist
        self.store
            .insert_request(&request)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        tracing::info!(request_id = %request.id, urgency = %request.urgency, "blood request filed");
        Ok(request)
    }

    /// Open requests, optionally filtered by blood type, most urgent first
    /// and newest first within a level. Stale rows are expired on the way
    /// out, so the result can shrink below `limit`.
    pub async fn open_requests(
        &self,
        blood_type: Option<BloodType>,
        limit: u32,
    ) -> Result<Vec<BloodRequest>> {
        let candidates = self
            .store
            .open_requests(blood_type, limit)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;
        self.drop_expired(candidates).await
    }

    pub async fn open_requests_of_type(
        &self,
        blood_type: BloodType,
        limit: u32,
    ) -> Result<Vec<BloodRequest>> {
        self.open_requests(Some(blood_type), limit).await
    }

    /// The urgency banner: the six most pressing open requests of any type.
    pub async fn urgency_header(&self) -> Result<Vec<BloodRequest>> {
        self.open_requests(None, URGENCY_HEADER_LIMIT).await
    }

    pub async fn get_request(&self, id: Uuid) -> Result<BloodRequest> {
        self.store
            .get_request(id)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?
            .ok_or_else(|| Error::NotFound(format!("blood request {id}")))
    }

    /// Lazy expiry: flip stale `requested` rows to `expired` and drop them
    /// from the listing. The flip is a compare-and-set, so losing the race
    /// against a concurrent reader is harmless.
    async fn drop_expired(&self, candidates: Vec<BloodRequest>) -> Result<Vec<BloodRequest>> {
        let now = Utc::now();
        let mut fresh = Vec::with_capacity(candidates.len());
        for request in candidates {
            if request.due_for_expiry(now) {
                self.store
                    .update_request_status(request.id, RequestStatus::Requested, RequestStatus::Expired)
                    .await
                    .map_err(|e| Error::Storage(e.to_string()))?;
                tracing::debug!(request_id = %request.id, "expired stale blood request");
            } else {
                fresh.push(request);
            }
        }
        Ok(fresh)
    }
}
