//! SeaORM entities for the marketplace plus small entity-level helpers
//! (field validation, inserts) shared by the repository layer.

pub mod errors;
pub mod db;
pub mod user;
pub mod category;
pub mod service_listing;
pub mod booking;
pub mod review;
pub mod message;
pub mod dispute;
