use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use rakta_core::models::acceptance::Acceptance;
use rakta_core::models::blood_type::BloodType;
use rakta_core::models::donor::{Role, UserRecord};
use rakta_core::models::request::{BloodRequest, RequestStatus};

use crate::store::{DonationStore, StoreResult};

/// In-memory engine for development and tests. BTreeMaps keep iteration
/// ordered by key, so queries come back in a stable order just like the
/// id-tiebroken Postgres queries.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<BTreeMap<String, UserRecord>>,
    requests: RwLock<BTreeMap<Uuid, BloodRequest>>,
    acceptances: RwLock<BTreeMap<Uuid, Acceptance>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DonationStore for MemoryStore {
    async fn put_user(&self, user: &UserRecord) -> StoreResult<()> {
        let mut users = self.users.write().await;
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn get_user(&self, id: &str) -> StoreResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn find_donors_by_type(
        &self,
        types: &[BloodType],
        limit: u32,
    ) -> StoreResult<Vec<UserRecord>> {
        let users = self.users.read().await;
        let donors = users
            .values()
            .filter(|u| u.role == Role::Donor)
            .filter(|u| u.blood_type.map_or(false, |bt| types.contains(&bt)))
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(donors)
    }

    async fn list_donors(&self, limit: u32) -> StoreResult<Vec<UserRecord>> {
        let users = self.users.read().await;
        let donors = users
            .values()
            .filter(|u| u.role == Role::Donor)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(donors)
    }

    async fn insert_request(&self, request: &BloodRequest) -> StoreResult<()> {
        let mut requests = self.requests.write().await;
        requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn get_request(&self, id: Uuid) -> StoreResult<Option<BloodRequest>> {
        let requests = self.requests.read().await;
        Ok(requests.get(&id).cloned())
    }

    async fn open_requests(
        &self,
        blood_type: Option<BloodType>,
        limit: u32,
    ) -> StoreResult<Vec<BloodRequest>> {
        let requests = self.requests.read().await;
        let mut open: Vec<BloodRequest> = requests
            .values()
            .filter(|r| r.status == RequestStatus::Requested)
            .filter(|r| blood_type.map_or(true, |bt| r.blood_type == bt))
            .cloned()
            .collect();
        // Same ordering contract as the Postgres query: most urgent level
        // first, newest first within a level.
        open.sort_by(|a, b| {
            a.urgency
                .level()
                .cmp(&b.urgency.level())
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        open.truncate(limit as usize);
        Ok(open)
    }

    async fn update_request_status(
        &self,
        id: Uuid,
        from: RequestStatus,
        to: RequestStatus,
    ) -> StoreResult<bool> {
        let mut requests = self.requests.write().await;
        match requests.get_mut(&id) {
            Some(request) if request.status == from => {
                request.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn insert_acceptance(&self, acceptance: &Acceptance) -> StoreResult<()> {
        let mut acceptances = self.acceptances.write().await;
        acceptances.insert(acceptance.id, acceptance.clone());
        Ok(())
    }

    async fn get_acceptance(&self, id: Uuid) -> StoreResult<Option<Acceptance>> {
        let acceptances = self.acceptances.read().await;
        Ok(acceptances.get(&id).cloned())
    }

    async fn attach_report(
        &self,
        id: Uuid,
        report_url: &str,
        report_checksum: &str,
        completed_at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let mut acceptances = self.acceptances.write().await;
        match acceptances.get_mut(&id) {
            Some(acceptance) => {
                acceptance.report_url = Some(report_url.to_string());
                acceptance.report_checksum = Some(report_checksum.to_string());
                acceptance.completed_at = Some(completed_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
