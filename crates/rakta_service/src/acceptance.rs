use chrono::Utc;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use rakta_core::models::acceptance::Acceptance;
use rakta_core::models::request::RequestStatus;
use rakta_core::{Error, Result};

use crate::reports::ReportUpload;
use crate::DonationService;

/// What complete_donation hands back to the caller.
#[derive(Debug, Clone)]
pub struct CompletedDonation {
    pub donation_id: Uuid,
    pub report_url: String,
    pub report_checksum: String,
}

impl DonationService {
    /// Links a donor to an open request. The request must exist; nothing
    /// else about it is checked here, completion sorts out the rest.
    pub async fn accept_request(&self, donor_id: &str, request_id: Uuid) -> Result<Acceptance> {
        let request = self
            .store
            .get_request(request_id)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?
            .ok_or_else(|| Error::NotFound(format!("blood request {request_id}")))?;

        let acceptance = Acceptance {
            id: Uuid::new_v4(),
            donor_id: donor_id.to_string(),
            request_id: request.id,
            accepted_at: Utc::now(),
            report_url: None,
            report_checksum: None,
            completed_at: None,
        };
        self.store
            .insert_acceptance(&acceptance)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        tracing::info!(
            donation_id = %acceptance.id,
            request_id = %request.id,
            donor_id,
            "donation accepted"
        );
        Ok(acceptance)
    }

    /// Closes out a donation: stores the report, attaches it to the
    /// acceptance and completes the linked request. An unknown donation id
    /// fails before anything is written. A dangling request link is a data
    /// integrity violation; it surfaces only after the report is attached,
    /// so the acceptance keeps its report even when the link is broken.
    pub async fn complete_donation(
        &self,
        donation_id: Uuid,
        upload: ReportUpload,
    ) -> Result<CompletedDonation> {
        // 1. Resolve the donation record; unknown ids mutate nothing
        let acceptance = self
            .store
            .get_acceptance(donation_id)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?
            .ok_or_else(|| Error::NotFound(format!("donation record {donation_id}")))?;

        // 2. Checksum, then hand the payload to the report store
        let report_checksum = hex::encode(Sha256::digest(&upload.bytes));
        let report_url = self
            .reports
            .store_report(upload)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        // 3. Attach the completion triple to the acceptance
        let completed_at = Utc::now();
        let attached = self
            .store
            .attach_report(donation_id, &report_url, &report_checksum, completed_at)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;
        if !attached {
            return Err(Error::Storage(format!(
                "donation record {donation_id} vanished during completion"
            )));
        }

        // 4. Close out the linked request
        match self
            .store
            .get_request(acceptance.request_id)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?
        {
            None => {
                tracing::error!(
                    donation_id = %donation_id,
                    request_id = %acceptance.request_id,
                    "donation record points at a missing blood request"
                );
                return Err(Error::Integrity(format!(
                    "donation {donation_id} references missing blood request {}",
                    acceptance.request_id
                )));
            }
            Some(request) if request.status == RequestStatus::Requested => {
                self.store
                    .update_request_status(
                        request.id,
                        RequestStatus::Requested,
                        RequestStatus::Completed,
                    )
                    .await
                    .map_err(|e| Error::Storage(e.to_string()))?;
            }
            Some(request) => {
                // No transition out of a terminal state
                tracing::warn!(
                    request_id = %request.id,
                    status = %request.status,
                    "request already closed; leaving its status untouched"
                );
            }
        }

        tracing::info!(donation_id = %donation_id, report_url = %report_url, "donation completed");
        Ok(CompletedDonation {
            donation_id,
            report_url,
            report_checksum,
        })
    }
}
