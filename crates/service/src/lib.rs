//! Business layer of the marketplace.
//! - Domain types and per-domain repository traits.
//! - Services holding the rules (booking lifecycle, role policy, conversations).
//! - Two stores implementing every repository: PostgreSQL via SeaORM and in-memory.

pub mod errors;
pub mod policy;
pub mod metrics;
pub mod auth;
pub mod catalog;
pub mod booking;
pub mod messaging;
pub mod review;
pub mod category;
pub mod dispute;
pub mod account;
pub mod storage;
#[cfg(test)]
pub mod test_support;
