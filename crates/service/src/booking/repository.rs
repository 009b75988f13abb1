use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Booking, BookingStatus, NewBooking, PaymentStatus};
use crate::errors::ServiceError;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts in `pending`/`unpaid`.
    async fn create_booking(&self, new: NewBooking) -> Result<Booking, ServiceError>;
    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, ServiceError>;
    /// Newest first.
    async fn bookings_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>, ServiceError>;
    /// Newest first.
    async fn bookings_for_listings(&self, service_ids: &[Uuid]) -> Result<Vec<Booking>, ServiceError>;
    /// Overwrites both statuses; `NotFound` when the booking is gone.
    async fn save_booking_state(
        &self,
        id: Uuid,
        status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> Result<Booking, ServiceError>;
    async fn count_bookings(&self) -> Result<u64, ServiceError>;
}
