use chrono::Utc;

use rakta_core::compat;
use rakta_core::models::blood_type::BloodType;
use rakta_core::models::donor::{Role, UserRecord};
use rakta_core::{Error, Result};

use crate::DonationService;

/// How many donors a search aims to return.
pub const DONOR_SEARCH_TARGET: u32 = 5;

impl DonationService {
    /// Registers (or re-registers) a profile under its auth uid. The
    /// creation timestamp is always stamped here, whatever the caller sent.
    pub async fn register_user(&self, mut user: UserRecord) -> Result<UserRecord> {
        if user.id.trim().is_empty() {
            return Err(Error::Validation("user id cannot be empty".to_string()));
        }
        if user.email.trim().is_empty() {
            return Err(Error::Validation("email cannot be empty".to_string()));
        }
        if user.role == Role::Donor && user.blood_type.is_none() {
            return Err(Error::Validation(
                "donor profiles require a blood type".to_string(),
            ));
        }

        user.created_at = Utc::now();
        self.store
            .put_user(&user)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        tracing::info!(user_id = %user.id, role = %user.role, "user profile saved");
        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> Result<UserRecord> {
        self.store
            .get_user(id)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?
            .ok_or_else(|| Error::NotFound(format!("user {id}")))
    }

    /// The donor directory, optionally narrowed to one blood type.
    pub async fn list_donors(
        &self,
        blood_type: Option<BloodType>,
        limit: u32,
    ) -> Result<Vec<UserRecord>> {
        let donors = match blood_type {
            Some(bt) => self.store.find_donors_by_type(&[bt], limit).await,
            None => self.store.list_donors(limit).await,
        }
        .map_err(|e| Error::Storage(e.to_string()))?;
        Ok(donors)
    }

    /// Donor search for a patient's blood type: exact-type donors first,
    /// capped at `target`; if that comes up short, a second query over the
    /// other compatible types fills the shortfall. Exact matches always
    /// precede fallback matches, and an empty result is a normal outcome.
    pub async fn find_donors_for_type(
        &self,
        blood_type: BloodType,
        target: u32,
    ) -> Result<Vec<UserRecord>> {
        // 1. Exact matches
        let mut donors = self
            .store
            .find_donors_by_type(&[blood_type], target)
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        // 2. Top up from compatible types, never displacing an exact match
        if (donors.len() as u32) < target {
            let shortfall = target - donors.len() as u32;
            let fallback = compat::fallback_donor_types(blood_type);
            if !fallback.is_empty() {
                let mut extras = self
                    .store
                    .find_donors_by_type(&fallback, shortfall)
                    .await
                    .map_err(|e| Error::Storage(e.to_string()))?;
                donors.append(&mut extras);
            }
        }

        Ok(donors)
    }
}
