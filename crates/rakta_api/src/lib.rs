pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use rakta_service::DonationService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: DonationService,
}
