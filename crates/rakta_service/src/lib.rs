pub mod acceptance;
pub mod donors;
pub mod reports;
pub mod requests;

use std::sync::Arc;

use rakta_db::DonationStore;
use reports::ReportStore;

/// The application service: request lifecycle, donor matching and
/// acceptance tracking over two collaborators. Operations live in impl
/// blocks next to their concern (requests.rs, donors.rs, acceptance.rs).
#[derive(Clone)]
pub struct DonationService {
    pub store: Arc<dyn DonationStore>,
    pub reports: Arc<dyn ReportStore>,
}

impl DonationService {
    pub fn new(store: Arc<dyn DonationStore>, reports: Arc<dyn ReportStore>) -> Self {
        Self { store, reports }
    }
}
