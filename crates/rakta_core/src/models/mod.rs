pub mod acceptance;
pub mod blood_type;
pub mod donor;
pub mod request;
