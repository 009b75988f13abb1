use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::{booking_from, SeaOrmStore};
use crate::booking::domain::{Booking, BookingStatus, NewBooking, PaymentStatus};
use crate::booking::repository::BookingRepository;
use crate::errors::ServiceError;
use models::booking::{self, Column};

#[async_trait]
impl BookingRepository for SeaOrmStore {
    async fn create_booking(&self, new: NewBooking) -> Result<Booking, ServiceError> {
        let created = booking::create(
            &self.db,
            booking::NewBooking {
                id: Uuid::new_v4(),
                customer_id: new.customer_id,
                service_id: new.service_id,
                status: BookingStatus::Pending.as_str(),
                payment_status: PaymentStatus::Unpaid.as_str(),
                date: new.date.into(),
            },
        )
        .await?;
        booking_from(created)
    }

    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, ServiceError> {
        booking::Entity::find_by_id(id).one(&self.db).await?.map(booking_from).transpose()
    }

    async fn bookings_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>, ServiceError> {
        booking::Entity::find()
            .filter(Column::CustomerId.eq(customer_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(booking_from)
            .collect()
    }

    async fn bookings_for_listings(&self, service_ids: &[Uuid]) -> Result<Vec<Booking>, ServiceError> {
        if service_ids.is_empty() {
            return Ok(Vec::new());
        }
        booking::Entity::find()
            .filter(Column::ServiceId.is_in(service_ids.iter().copied()))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(booking_from)
            .collect()
    }

    async fn save_booking_state(
        &self,
        id: Uuid,
        status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> Result<Booking, ServiceError> {
        if booking::Entity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(ServiceError::not_found("booking"));
        }
        let updated = booking::set_state(&self.db, id, status.as_str(), payment_status.as_str()).await?;
        booking_from(updated)
    }

    async fn count_bookings(&self) -> Result<u64, ServiceError> {
        Ok(booking::Entity::find().count(&self.db).await?)
    }
}
