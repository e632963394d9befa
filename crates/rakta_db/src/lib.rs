pub mod memory;
pub mod postgres;
pub mod schema;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{DonationStore, StoreError, StoreResult};
