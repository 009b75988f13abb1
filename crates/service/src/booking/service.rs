use std::{collections::HashMap, sync::Arc};

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::{
    BookedService, Booking, BookingStatus, BookingView, CreateBookingInput, NewBooking, PaymentStatus,
};
use super::repository::BookingRepository;
use crate::auth::repository::UserRepository;
use crate::catalog::repository::ListingRepository;
use crate::errors::ServiceError;
use crate::metrics::{BOOKINGS_CREATED_TOTAL, BOOKING_TRANSITIONS_TOTAL, PAYMENTS_TOTAL};
use crate::policy::{Capability, Identity, Policy};

/// Creates bookings and drives their status.
///
/// Mutations check, in order: booking exists, service exists, ownership,
/// role capability, then the requested status.
pub struct BookingService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R> BookingService<R>
where
    R: BookingRepository + ListingRepository + UserRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(customer_id = %actor.id, service_id = %input.service_id))]
    pub async fn create(&self, actor: &Identity, input: CreateBookingInput) -> Result<Booking, ServiceError> {
        Policy::authorize(actor, Capability::BookServices)?;
        if self.repo.find_listing(input.service_id).await?.is_none() {
            return Err(ServiceError::not_found("service"));
        }
        let booking = self
            .repo
            .create_booking(NewBooking { customer_id: actor.id, service_id: input.service_id, date: input.date })
            .await?;
        BOOKINGS_CREATED_TOTAL.inc();
        info!(booking_id = %booking.id, "booking_created");
        Ok(booking)
    }

    /// Provider decision or completion on a booking of one of their services.
    #[instrument(skip(self), fields(actor_id = %actor.id))]
    pub async fn update_status(
        &self,
        actor: &Identity,
        booking_id: Uuid,
        requested: &str,
    ) -> Result<Booking, ServiceError> {
        let booking = self.repo.find_booking(booking_id).await?.ok_or_else(|| ServiceError::not_found("booking"))?;
        let listing = self
            .repo
            .find_listing(booking.service_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("service"))?;
        if listing.provider_id != actor.id {
            return Err(ServiceError::Unauthorized("only the provider of this service may change the booking".into()));
        }
        Policy::authorize(actor, Capability::DecideBookings)?;

        let next: BookingStatus = requested.parse()?;
        if !booking.status.can_transition_to(next) {
            return Err(ServiceError::InvalidStatus(format!(
                "cannot move booking from {} to {}",
                booking.status, next
            )));
        }

        let updated = self.repo.save_booking_state(booking.id, next, booking.payment_status).await?;
        BOOKING_TRANSITIONS_TOTAL.with_label_values(&[next.as_str()]).inc();
        info!(booking_id = %updated.id, from = %booking.status, to = %next, "booking_status_changed");
        Ok(updated)
    }

    /// Mark a booking paid. Always lands in `confirmed`.
    #[instrument(skip(self), fields(actor_id = %actor.id))]
    pub async fn pay(&self, actor: &Identity, booking_id: Uuid) -> Result<Booking, ServiceError> {
        let booking = self.repo.find_booking(booking_id).await?.ok_or_else(|| ServiceError::not_found("booking"))?;
        if booking.customer_id != actor.id {
            return Err(ServiceError::Unauthorized("only the customer who booked may pay".into()));
        }
        if matches!(booking.status, BookingStatus::Cancelled | BookingStatus::Completed) {
            warn!(
                event = "payment_overrode_status",
                booking_id = %booking.id,
                prior = %booking.status,
                "payment forces booking back to confirmed"
            );
        }

        let updated = self
            .repo
            .save_booking_state(booking.id, BookingStatus::Confirmed, PaymentStatus::Paid)
            .await?;
        PAYMENTS_TOTAL.inc();
        info!(booking_id = %updated.id, "booking_paid");
        Ok(updated)
    }

    /// Providers see bookings across all their services; everyone else
    /// sees the bookings they made.
    pub async fn list_for(&self, actor: &Identity) -> Result<Vec<BookingView>, ServiceError> {
        if Policy::allows(actor.role, Capability::DecideBookings) {
            self.provider_view(actor.id).await
        } else {
            self.customer_view(actor.id).await
        }
    }

    async fn provider_view(&self, provider_id: Uuid) -> Result<Vec<BookingView>, ServiceError> {
        let listings = self.repo.listings_by_provider(provider_id).await?;
        if listings.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = listings.iter().map(|l| l.id).collect();
        let bookings = self.repo.bookings_for_listings(&ids).await?;

        let customer_ids: Vec<Uuid> = bookings.iter().map(|b| b.customer_id).collect();
        let customers: HashMap<Uuid, _> =
            self.repo.find_users(&customer_ids).await?.into_iter().map(|u| (u.id, u.summary())).collect();
        let listings: HashMap<Uuid, _> = listings.into_iter().map(|l| (l.id, l)).collect();

        Ok(bookings
            .into_iter()
            .map(|booking| BookingView {
                service: listings.get(&booking.service_id).map(|l| BookedService {
                    id: l.id,
                    title: l.title.clone(),
                    price: l.price,
                    provider: None,
                }),
                customer: customers.get(&booking.customer_id).cloned(),
                booking,
            })
            .collect())
    }

    async fn customer_view(&self, customer_id: Uuid) -> Result<Vec<BookingView>, ServiceError> {
        let bookings = self.repo.bookings_for_customer(customer_id).await?;
        if bookings.is_empty() {
            return Ok(Vec::new());
        }
        let service_ids: Vec<Uuid> = bookings.iter().map(|b| b.service_id).collect();
        let listings = self.repo.find_listings(&service_ids).await?;
        let provider_ids: Vec<Uuid> = listings.iter().map(|l| l.provider_id).collect();
        let providers: HashMap<Uuid, _> =
            self.repo.find_users(&provider_ids).await?.into_iter().map(|u| (u.id, u.person())).collect();
        let listings: HashMap<Uuid, _> = listings.into_iter().map(|l| (l.id, l)).collect();

        Ok(bookings
            .into_iter()
            .map(|booking| BookingView {
                service: listings.get(&booking.service_id).map(|l| BookedService {
                    id: l.id,
                    title: l.title.clone(),
                    price: l.price,
                    provider: providers.get(&l.provider_id).cloned(),
                }),
                customer: None,
                booking,
            })
            .collect())
    }
}
