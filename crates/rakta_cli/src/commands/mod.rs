pub mod accept;
pub mod compat;
pub mod complete_donation;
pub mod create_request;
pub mod find_donors;
pub mod list_requests;
pub mod rebuild;
