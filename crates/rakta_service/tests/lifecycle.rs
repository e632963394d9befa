use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use rakta_core::models::blood_type::BloodType;
use rakta_core::models::request::{BloodRequest, RequestDraft, RequestStatus, Urgency};
use rakta_core::Error;
use rakta_db::{DonationStore, MemoryStore};
use rakta_service::reports::LocalReportStore;
use rakta_service::DonationService;

fn service(dir: &tempfile::TempDir) -> (DonationService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let reports = Arc::new(LocalReportStore::new(dir.path(), "/bloodDonationReport"));
    (DonationService::new(store.clone(), reports), store)
}

fn draft(blood_type: &str, urgency: i16) -> RequestDraft {
    RequestDraft {
        patient_name: "Ram Shrestha".to_string(),
        blood_type: blood_type.to_string(),
        units_needed: 2,
        urgency,
        hospital: "Patan Hospital".to_string(),
        contact_person: "Sita Shrestha".to_string(),
        phone_number: "9800000000".to_string(),
        location: "Lalitpur".to_string(),
        medical_condition: "Surgery".to_string(),
        additional_notes: String::new(),
    }
}

/// A request inserted straight into the store, with full control over the
/// timestamps the service would otherwise stamp itself.
fn stored_request(
    blood_type: BloodType,
    urgency: Urgency,
    created_mins_ago: i64,
    expires_in_mins: i64,
) -> BloodRequest {
    let now = Utc::now();
    BloodRequest {
        id: Uuid::new_v4(),
        patient_name: "Ram Shrestha".to_string(),
        blood_type,
        units_needed: 1,
        urgency,
        hospital: "Patan Hospital".to_string(),
        contact_person: "Sita Shrestha".to_string(),
        phone_number: "9800000000".to_string(),
        location: "Lalitpur".to_string(),
        medical_condition: "Anemia".to_string(),
        additional_notes: String::new(),
        status: RequestStatus::Requested,
        created_at: now - Duration::minutes(created_mins_ago),
        expires_at: now + Duration::minutes(expires_in_mins),
    }
}

#[tokio::test]
async fn create_stamps_status_and_deadline_from_urgency() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _store) = service(&dir);

    let request = service.create_request(draft("B+", 1)).await.unwrap();

    assert_eq!(request.status, RequestStatus::Requested);
    assert_eq!(request.urgency, Urgency::Critical);
    assert_eq!(request.expires_at - request.created_at, Duration::hours(2));

    let fetched = service.get_request(request.id).await.unwrap();
    assert_eq!(fetched.patient_name, "Ram Shrestha");
}

#[tokio::test]
async fn create_rejects_invalid_drafts_before_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    let mut bad = draft("B+", 9);
    bad.patient_name = String::new();

    let err = service.create_request(bad).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    let message = err.to_string();
    assert!(message.contains("patientName"));
    assert!(message.contains("urgency"));

    // Nothing was written
    assert!(store.open_requests(None, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_orders_by_urgency_then_newest_within_level() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    let moderate = stored_request(BloodType::APos, Urgency::Moderate, 30, 120);
    let older_critical = stored_request(BloodType::APos, Urgency::Critical, 60, 120);
    let urgent = stored_request(BloodType::APos, Urgency::Urgent, 10, 120);
    let newest_critical = stored_request(BloodType::APos, Urgency::Critical, 5, 120);
    for r in [&moderate, &older_critical, &urgent, &newest_critical] {
        store.insert_request(r).await.unwrap();
    }

    let listed = service
        .open_requests_of_type(BloodType::APos, 10)
        .await
        .unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|r| r.id).collect();
    assert_eq!(
        ids,
        vec![newest_critical.id, older_critical.id, urgent.id, moderate.id]
    );
}

#[tokio::test]
async fn stale_requests_are_expired_on_read_and_excluded() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    let fresh = stored_request(BloodType::ONeg, Urgency::Urgent, 10, 60);
    let stale = stored_request(BloodType::ONeg, Urgency::Critical, 300, -5);
    store.insert_request(&fresh).await.unwrap();
    store.insert_request(&stale).await.unwrap();

    let listed = service
        .open_requests_of_type(BloodType::ONeg, 10)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, fresh.id);

    // The stale row was flipped, not deleted
    let flipped = store.get_request(stale.id).await.unwrap().unwrap();
    assert_eq!(flipped.status, RequestStatus::Expired);
}

#[tokio::test]
async fn reading_an_already_expired_row_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    let stale = stored_request(BloodType::BNeg, Urgency::Urgent, 600, -60);
    store.insert_request(&stale).await.unwrap();

    // Two reads in a row: the second sees no `requested` row to flip
    service
        .open_requests_of_type(BloodType::BNeg, 10)
        .await
        .unwrap();
    let second = service
        .open_requests_of_type(BloodType::BNeg, 10)
        .await
        .unwrap();
    assert!(second.is_empty());
    let row = store.get_request(stale.id).await.unwrap().unwrap();
    assert_eq!(row.status, RequestStatus::Expired);
}

#[tokio::test]
async fn expired_rows_shrink_the_result_below_the_limit() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    let fresh = stored_request(BloodType::AbPos, Urgency::Moderate, 10, 60);
    let stale_a = stored_request(BloodType::AbPos, Urgency::Critical, 200, -10);
    let stale_b = stored_request(BloodType::AbPos, Urgency::Urgent, 300, -20);
    for r in [&fresh, &stale_a, &stale_b] {
        store.insert_request(r).await.unwrap();
    }

    // Limit 3 matched 3 rows, but two of them were stale: no back-fill
    let listed = service
        .open_requests_of_type(BloodType::AbPos, 3)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, fresh.id);
}

#[tokio::test]
async fn completed_requests_leave_the_listings() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    let request = service.create_request(draft("O+", 2)).await.unwrap();
    let flipped = store
        .update_request_status(request.id, RequestStatus::Requested, RequestStatus::Completed)
        .await
        .unwrap();
    assert!(flipped);

    let listed = service
        .open_requests_of_type(BloodType::OPos, 10)
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn urgency_header_caps_at_six_across_types() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    for i in 0..8 {
        let bt = if i % 2 == 0 {
            BloodType::APos
        } else {
            BloodType::ONeg
        };
        let urgency = Urgency::from_level(((i % 4) + 1) as i16).unwrap();
        store
            .insert_request(&stored_request(bt, urgency, i as i64, 120))
            .await
            .unwrap();
    }

    let header = service.urgency_header().await.unwrap();
    assert_eq!(header.len(), 6);
    // Most urgent levels surface first
    assert!(header
        .windows(2)
        .all(|w| w[0].urgency.level() <= w[1].urgency.level()));
}
