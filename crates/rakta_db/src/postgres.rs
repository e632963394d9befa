use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use rakta_core::models::acceptance::Acceptance;
use rakta_core::models::blood_type::BloodType;
use rakta_core::models::donor::{Role, UserRecord};
use rakta_core::models::request::{BloodRequest, RequestStatus, Urgency};

use crate::store::{DonationStore, StoreError, StoreResult};

/// Postgres-backed store. Queries are runtime-checked (`sqlx::query` +
/// binds) so the crate builds without a live database.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, email, role, first_name, last_name, phone, address, blood_type, \
     age, org_name, contact_person, license_number, available, total_donations, \
     last_donation_at, created_at";

const REQUEST_COLUMNS: &str = "id, patient_name, blood_type, units_needed, urgency, hospital, \
     contact_person, phone_number, location, medical_condition, additional_notes, status, \
     created_at, expires_at";

const ACCEPTANCE_COLUMNS: &str =
    "id, donor_id, request_id, accepted_at, report_url, report_checksum, completed_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    role: String,
    first_name: String,
    last_name: String,
    phone: String,
    address: String,
    blood_type: Option<String>,
    age: Option<i32>,
    org_name: Option<String>,
    contact_person: Option<String>,
    license_number: Option<String>,
    available: bool,
    total_donations: i32,
    last_donation_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_record(self) -> StoreResult<UserRecord> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|e| StoreError::Corrupt(format!("user {}: {}", self.id, e)))?;
        let blood_type = match &self.blood_type {
            Some(label) => Some(
                label
                    .parse::<BloodType>()
                    .map_err(|e| StoreError::Corrupt(format!("user {}: {}", self.id, e)))?,
            ),
            None => None,
        };
        Ok(UserRecord {
            id: self.id,
            email: self.email,
            role,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            address: self.address,
            blood_type,
            age: self.age,
            org_name: self.org_name,
            contact_person: self.contact_person,
            license_number: self.license_number,
            available: self.available,
            total_donations: self.total_donations,
            last_donation_at: self.last_donation_at,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RequestRow {
    id: Uuid,
    patient_name: String,
    blood_type: String,
    units_needed: i32,
    urgency: i16,
    hospital: String,
    contact_person: String,
    phone_number: String,
    location: String,
    medical_condition: String,
    additional_notes: String,
    status: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl RequestRow {
    fn into_request(self) -> StoreResult<BloodRequest> {
        let blood_type = self
            .blood_type
            .parse::<BloodType>()
            .map_err(|e| StoreError::Corrupt(format!("request {}: {}", self.id, e)))?;
        let status = self
            .status
            .parse::<RequestStatus>()
            .map_err(|e| StoreError::Corrupt(format!("request {}: {}", self.id, e)))?;
        let urgency = Urgency::from_level(self.urgency).ok_or_else(|| {
            StoreError::Corrupt(format!("request {}: urgency {}", self.id, self.urgency))
        })?;
        Ok(BloodRequest {
            id: self.id,
            patient_name: self.patient_name,
            blood_type,
            units_needed: self.units_needed,
            urgency,
            hospital: self.hospital,
            contact_person: self.contact_person,
            phone_number: self.phone_number,
            location: self.location,
            medical_condition: self.medical_condition,
            additional_notes: self.additional_notes,
            status,
            created_at: self.created_at,
            expires_at: self.expires_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AcceptanceRow {
    id: Uuid,
    donor_id: String,
    request_id: Uuid,
    accepted_at: DateTime<Utc>,
    report_url: Option<String>,
    report_checksum: Option<String>,
    completed_at: Option<DateTime<Utc>>,
}

impl AcceptanceRow {
    fn into_acceptance(self) -> Acceptance {
        Acceptance {
            id: self.id,
            donor_id: self.donor_id,
            request_id: self.request_id,
            accepted_at: self.accepted_at,
            report_url: self.report_url,
            report_checksum: self.report_checksum,
            completed_at: self.completed_at,
        }
    }
}

#[async_trait]
impl DonationStore for PgStore {
    async fn put_user(&self, user: &UserRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users
            (id, email, role, first_name, last_name, phone, address, blood_type,
             age, org_name, contact_person, license_number, available, total_donations,
             last_donation_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                role = EXCLUDED.role,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                phone = EXCLUDED.phone,
                address = EXCLUDED.address,
                blood_type = EXCLUDED.blood_type,
                age = EXCLUDED.age,
                org_name = EXCLUDED.org_name,
                contact_person = EXCLUDED.contact_person,
                license_number = EXCLUDED.license_number,
                available = EXCLUDED.available,
                total_donations = EXCLUDED.total_donations,
                last_donation_at = EXCLUDED.last_donation_at,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.blood_type.map(|bt| bt.as_str()))
        .bind(user.age)
        .bind(&user.org_name)
        .bind(&user.contact_person)
        .bind(&user.license_number)
        .bind(user.available)
        .bind(user.total_donations)
        .bind(user.last_donation_at)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_user(&self, id: &str) -> StoreResult<Option<UserRecord>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(UserRow::into_record).transpose()
    }

    async fn find_donors_by_type(
        &self,
        types: &[BloodType],
        limit: u32,
    ) -> StoreResult<Vec<UserRecord>> {
        let labels: Vec<String> = types.iter().map(|t| t.as_str().to_string()).collect();

        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE role = 'donor' AND blood_type = ANY($1)
            ORDER BY id
            LIMIT $2
            "#
        ))
        .bind(&labels)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(UserRow::into_record).collect()
    }

    async fn list_donors(&self, limit: u32) -> StoreResult<Vec<UserRecord>> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = 'donor' ORDER BY id LIMIT $1"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(UserRow::into_record).collect()
    }

    async fn insert_request(&self, request: &BloodRequest) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO blood_requests
            (id, patient_name, blood_type, units_needed, urgency, hospital,
             contact_person, phone_number, location, medical_condition,
             additional_notes, status, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(request.id)
        .bind(&request.patient_name)
        .bind(request.blood_type.as_str())
        .bind(request.units_needed)
        .bind(request.urgency.level())
        .bind(&request.hospital)
        .bind(&request.contact_person)
        .bind(&request.phone_number)
        .bind(&request.location)
        .bind(&request.medical_condition)
        .bind(&request.additional_notes)
        .bind(request.status.as_str())
        .bind(request.created_at)
        .bind(request.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_request(&self, id: Uuid) -> StoreResult<Option<BloodRequest>> {
        let row: Option<RequestRow> = sqlx::query_as(&format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(RequestRow::into_request).transpose()
    }

    async fn open_requests(
        &self,
        blood_type: Option<BloodType>,
        limit: u32,
    ) -> StoreResult<Vec<BloodRequest>> {
        let rows: Vec<RequestRow> = match blood_type {
            Some(bt) => {
                sqlx::query_as(&format!(
                    r#"
                    SELECT {REQUEST_COLUMNS} FROM blood_requests
                    WHERE status = 'requested' AND blood_type = $1
                    ORDER BY urgency ASC, created_at DESC, id
                    LIMIT $2
                    "#
                ))
                .bind(bt.as_str())
                .bind(limit as i64)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    r#"
                    SELECT {REQUEST_COLUMNS} FROM blood_requests
                    WHERE status = 'requested'
                    ORDER BY urgency ASC, created_at DESC, id
                    LIMIT $1
                    "#
                ))
                .bind(limit as i64)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(RequestRow::into_request).collect()
    }

    async fn update_request_status(
        &self,
        id: Uuid,
        from: RequestStatus,
        to: RequestStatus,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE blood_requests SET status = $1 WHERE id = $2 AND status = $3",
        )
        .bind(to.as_str())
        .bind(id)
        .bind(from.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_acceptance(&self, acceptance: &Acceptance) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO blood_acceptances
            (id, donor_id, request_id, accepted_at, report_url, report_checksum, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(acceptance.id)
        .bind(&acceptance.donor_id)
        .bind(acceptance.request_id)
        .bind(acceptance.accepted_at)
        .bind(&acceptance.report_url)
        .bind(&acceptance.report_checksum)
        .bind(acceptance.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_acceptance(&self, id: Uuid) -> StoreResult<Option<Acceptance>> {
        let row: Option<AcceptanceRow> = sqlx::query_as(&format!(
            "SELECT {ACCEPTANCE_COLUMNS} FROM blood_acceptances WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(row.map(AcceptanceRow::into_acceptance))
    }

    async fn attach_report(
        &self,
        id: Uuid,
        report_url: &str,
        report_checksum: &str,
        completed_at: DateTime<Utc>,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE blood_acceptances
            SET report_url = $1, report_checksum = $2, completed_at = $3
            WHERE id = $4
            "#,
        )
        .bind(report_url)
        .bind(report_checksum)
        .bind(completed_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
