use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use rakta_core::models::acceptance::Acceptance;
use rakta_core::models::blood_type::BloodType;
use rakta_core::models::donor::UserRecord;
use rakta_core::models::request::{BloodRequest, RequestStatus};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The persistence seam for the donation platform. Everything above this
/// trait is storage-agnostic; the Postgres and in-memory engines below it
/// must agree on filter, order and limit semantics.
#[async_trait]
pub trait DonationStore: Send + Sync {
    // --- users ---

    /// Insert-or-replace under a caller-supplied id (the auth uid).
    async fn put_user(&self, user: &UserRecord) -> StoreResult<()>;

    async fn get_user(&self, id: &str) -> StoreResult<Option<UserRecord>>;

    /// Donors whose blood type is one of `types`, capped at `limit`.
    async fn find_donors_by_type(
        &self,
        types: &[BloodType],
        limit: u32,
    ) -> StoreResult<Vec<UserRecord>>;

    /// The donor directory, capped at `limit`.
    async fn list_donors(&self, limit: u32) -> StoreResult<Vec<UserRecord>>;

    // --- blood requests ---

    async fn insert_request(&self, request: &BloodRequest) -> StoreResult<()>;

    async fn get_request(&self, id: Uuid) -> StoreResult<Option<BloodRequest>>;

    /// Open (`requested`) rows, optionally filtered by blood type, ordered
    /// by urgency ascending then creation time descending, capped at
    /// `limit`. Deadline handling is the caller's job.
    async fn open_requests(
        &self,
        blood_type: Option<BloodType>,
        limit: u32,
    ) -> StoreResult<Vec<BloodRequest>>;

    /// Single-row compare-and-set on the status column. Returns whether a
    /// row in the `from` state matched; a miss is not an error, which is
    /// what makes concurrent expiry flips idempotent.
    async fn update_request_status(
        &self,
        id: Uuid,
        from: RequestStatus,
        to: RequestStatus,
    ) -> StoreResult<bool>;

    // --- acceptances ---

    async fn insert_acceptance(&self, acceptance: &Acceptance) -> StoreResult<()>;

    async fn get_acceptance(&self, id: Uuid) -> StoreResult<Option<Acceptance>>;

    /// Attach the completion triple to an acceptance. Returns whether a row
    /// matched.
    async fn attach_report(
        &self,
        id: Uuid,
        report_url: &str,
        report_checksum: &str,
        completed_at: DateTime<Utc>,
    ) -> StoreResult<bool>;
}
