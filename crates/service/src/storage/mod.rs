//! Store implementations behind the repository traits.
//!
//! `seaorm` is the PostgreSQL-backed store used by the server binary;
//! `memory` keeps everything in process and mirrors the same
//! ordering and cascade rules.

pub mod memory;
pub mod seaorm;

use crate::auth::repository::UserRepository;
use crate::booking::repository::BookingRepository;
use crate::catalog::repository::ListingRepository;
use crate::category::CategoryRepository;
use crate::dispute::DisputeRepository;
use crate::messaging::repository::MessageRepository;
use crate::review::ReviewRepository;

/// Every repository at once, so the HTTP layer can hold one `Arc<dyn Store>`.
pub trait Store:
    UserRepository
    + ListingRepository
    + BookingRepository
    + ReviewRepository
    + MessageRepository
    + CategoryRepository
    + DisputeRepository
    + Send
    + Sync
{
}

impl<T> Store for T where
    T: UserRepository
        + ListingRepository
        + BookingRepository
        + ReviewRepository
        + MessageRepository
        + CategoryRepository
        + DisputeRepository
{
}
