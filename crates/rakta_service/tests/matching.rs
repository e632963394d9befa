use std::sync::Arc;

use chrono::Utc;

use rakta_core::models::blood_type::BloodType;
use rakta_core::models::donor::{Role, UserRecord};
use rakta_db::{DonationStore, MemoryStore};
use rakta_service::donors::DONOR_SEARCH_TARGET;
use rakta_service::reports::LocalReportStore;
use rakta_service::DonationService;

fn service(dir: &tempfile::TempDir) -> (DonationService, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let reports = Arc::new(LocalReportStore::new(dir.path(), "/bloodDonationReport"));
    (DonationService::new(store.clone(), reports), store)
}

fn donor(id: &str, blood_type: BloodType) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        role: Role::Donor,
        first_name: "Donor".to_string(),
        last_name: id.to_uppercase(),
        phone: "9811111111".to_string(),
        address: "Kathmandu".to_string(),
        blood_type: Some(blood_type),
        age: Some(30),
        org_name: None,
        contact_person: None,
        license_number: None,
        available: true,
        total_donations: 0,
        last_donation_at: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn exact_matches_come_first_then_compatible_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    // A+ patients can receive from O-, O+, A- besides A+
    for id in ["a1", "a2", "a3"] {
        store.put_user(&donor(id, BloodType::APos)).await.unwrap();
    }
    for id in ["o1", "o2", "o3", "o4"] {
        store.put_user(&donor(id, BloodType::ONeg)).await.unwrap();
    }

    let found = service
        .find_donors_for_type(BloodType::APos, DONOR_SEARCH_TARGET)
        .await
        .unwrap();

    assert_eq!(found.len(), 5);
    assert!(found[..3]
        .iter()
        .all(|d| d.blood_type == Some(BloodType::APos)));
    assert!(found[3..]
        .iter()
        .all(|d| d.blood_type == Some(BloodType::ONeg)));
}

#[tokio::test]
async fn no_fallback_query_when_exact_matches_fill_the_target() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    for i in 0..6 {
        store
            .put_user(&donor(&format!("b{i}"), BloodType::BPos))
            .await
            .unwrap();
    }
    // A compatible O- donor who must NOT appear: the target is already met
    store.put_user(&donor("o9", BloodType::ONeg)).await.unwrap();

    let found = service
        .find_donors_for_type(BloodType::BPos, DONOR_SEARCH_TARGET)
        .await
        .unwrap();

    assert_eq!(found.len(), 5);
    assert!(found.iter().all(|d| d.blood_type == Some(BloodType::BPos)));
}

#[tokio::test]
async fn universal_donor_patients_have_no_fallback_pool() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    store.put_user(&donor("o1", BloodType::ONeg)).await.unwrap();
    store.put_user(&donor("o2", BloodType::ONeg)).await.unwrap();
    // Plenty of donors of other types, none of them usable for O-
    for (i, bt) in [BloodType::APos, BloodType::BPos, BloodType::AbPos]
        .into_iter()
        .enumerate()
    {
        store.put_user(&donor(&format!("x{i}"), bt)).await.unwrap();
    }

    let found = service
        .find_donors_for_type(BloodType::ONeg, DONOR_SEARCH_TARGET)
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|d| d.blood_type == Some(BloodType::ONeg)));
}

#[tokio::test]
async fn shortfall_is_capped_not_backfilled_beyond_target() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    store.put_user(&donor("a1", BloodType::APos)).await.unwrap();
    store.put_user(&donor("a2", BloodType::APos)).await.unwrap();
    for i in 0..10 {
        store
            .put_user(&donor(&format!("o{i}"), BloodType::OPos))
            .await
            .unwrap();
    }

    let found = service
        .find_donors_for_type(BloodType::APos, DONOR_SEARCH_TARGET)
        .await
        .unwrap();

    assert_eq!(found.len(), 5);
    assert_eq!(
        found
            .iter()
            .filter(|d| d.blood_type == Some(BloodType::APos))
            .count(),
        2
    );
}

#[tokio::test]
async fn empty_donor_pool_is_a_normal_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _store) = service(&dir);

    let found = service
        .find_donors_for_type(BloodType::AbNeg, DONOR_SEARCH_TARGET)
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn seekers_never_match_even_with_a_blood_type() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    let mut seeker = donor("s1", BloodType::APos);
    seeker.role = Role::Seeker;
    seeker.org_name = Some("Patan Hospital Blood Bank".to_string());
    store.put_user(&seeker).await.unwrap();

    let found = service
        .find_donors_for_type(BloodType::APos, DONOR_SEARCH_TARGET)
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn registration_validates_and_stamps_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _store) = service(&dir);

    let saved = service.register_user(donor("d1", BloodType::BNeg)).await.unwrap();
    assert_eq!(saved.id, "d1");

    let fetched = service.get_user("d1").await.unwrap();
    assert_eq!(fetched.blood_type, Some(BloodType::BNeg));

    // Donors without a blood type are rejected
    let mut bad = donor("d2", BloodType::BNeg);
    bad.blood_type = None;
    let err = service.register_user(bad).await.unwrap_err();
    assert!(matches!(err, rakta_core::Error::Validation(_)));
}

#[tokio::test]
async fn directory_listing_can_narrow_to_one_type() {
    let dir = tempfile::tempdir().unwrap();
    let (service, store) = service(&dir);

    store.put_user(&donor("a1", BloodType::APos)).await.unwrap();
    store.put_user(&donor("b1", BloodType::BPos)).await.unwrap();

    let all = service.list_donors(None, 10).await.unwrap();
    assert_eq!(all.len(), 2);

    let only_b = service
        .list_donors(Some(BloodType::BPos), 10)
        .await
        .unwrap();
    assert_eq!(only_b.len(), 1);
    assert_eq!(only_b[0].id, "b1");
}
