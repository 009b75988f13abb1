use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::domain::{Credentials, NewUser, User};
use crate::auth::repository::UserRepository;
use crate::booking::domain::{Booking, BookingStatus, NewBooking, PaymentStatus};
use crate::booking::repository::BookingRepository;
use crate::catalog::domain::{Listing, ListingFilter, NewListing};
use crate::catalog::repository::ListingRepository;
use crate::category::{Category, CategoryRepository};
use crate::dispute::{Dispute, DisputeRepository, DisputeStatus, NewDispute};
use crate::errors::ServiceError;
use crate::messaging::domain::{Message, NewMessage};
use crate::messaging::repository::MessageRepository;
use crate::review::{NewReview, Review, ReviewRepository};

/// In-process store for tests and local experiments.
///
/// Rows carry an insertion sequence so records created within the same
/// clock tick still order deterministically.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    seq: u64,
    users: HashMap<Uuid, Row<(User, String)>>,
    listings: HashMap<Uuid, Row<Listing>>,
    bookings: HashMap<Uuid, Row<Booking>>,
    reviews: HashMap<Uuid, Row<Review>>,
    messages: HashMap<Uuid, Row<Message>>,
    categories: HashMap<Uuid, Row<Category>>,
    disputes: HashMap<Uuid, Row<Dispute>>,
}

struct Row<T> {
    seq: u64,
    value: T,
}

impl Tables {
    fn row<T>(&mut self, value: T) -> Row<T> {
        self.seq += 1;
        Row { seq: self.seq, value }
    }
}

/// Clone matching rows ordered by `(created_at, seq)`.
fn ordered<'a, T, K>(
    rows: impl Iterator<Item = &'a Row<T>>,
    created_at: K,
    newest_first: bool,
) -> Vec<T>
where
    T: Clone + 'a,
    K: Fn(&T) -> DateTime<Utc>,
{
    let mut picked: Vec<&Row<T>> = rows.collect();
    picked.sort_by_key(|r| (created_at(&r.value), r.seq));
    if newest_first {
        picked.reverse();
    }
    picked.into_iter().map(|r| r.value.clone()).collect()
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        let t = self.tables.read().await;
        let email = email.to_lowercase();
        Ok(t.users.values().find(|r| r.value.0.email == email).map(|r| r.value.0.clone()))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.users.get(&id).map(|r| r.value.0.clone()))
    }

    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<User>, ServiceError> {
        let t = self.tables.read().await;
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        Ok(t.users.iter().filter(|(id, _)| wanted.contains(id)).map(|(_, r)| r.value.0.clone()).collect())
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.users.get(&user_id).map(|r| Credentials { user_id, password_hash: r.value.1.clone() }))
    }

    async fn create_user(&self, new: NewUser) -> Result<User, ServiceError> {
        models::user::validate_email(&new.email)?;
        models::user::validate_name(&new.name)?;
        let mut t = self.tables.write().await;
        let email = new.email.trim().to_lowercase();
        if t.users.values().any(|r| r.value.0.email == email) {
            return Err(ServiceError::Conflict("email already registered".into()));
        }
        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email,
            role: new.role,
            is_verified: new.is_verified,
            created_at: Utc::now(),
        };
        let row = t.row((user.clone(), new.password_hash));
        t.users.insert(user.id, row);
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        let t = self.tables.read().await;
        Ok(ordered(t.users.values(), |(u, _)| u.created_at, true).into_iter().map(|(u, _)| u).collect())
    }

    async fn toggle_verified(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        let mut t = self.tables.write().await;
        Ok(t.users.get_mut(&id).map(|r| {
            r.value.0.is_verified = !r.value.0.is_verified;
            r.value.0.clone()
        }))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, ServiceError> {
        let mut t = self.tables.write().await;
        if t.users.remove(&id).is_none() {
            return Ok(false);
        }
        let owned: HashSet<Uuid> =
            t.listings.values().filter(|r| r.value.provider_id == id).map(|r| r.value.id).collect();
        t.listings.retain(|lid, _| !owned.contains(lid));
        t.bookings.retain(|_, r| r.value.customer_id != id && !owned.contains(&r.value.service_id));
        t.reviews.retain(|_, r| r.value.user_id != id && !owned.contains(&r.value.service_id));
        t.messages.retain(|_, r| r.value.sender_id != id && r.value.recipient_id != id);
        t.disputes.retain(|_, r| r.value.reporter_id != id && r.value.reported_user_id != id);
        Ok(true)
    }

    async fn count_users(&self) -> Result<u64, ServiceError> {
        Ok(self.tables.read().await.users.len() as u64)
    }
}

#[async_trait]
impl ListingRepository for MemoryStore {
    async fn create_listing(&self, new: NewListing) -> Result<Listing, ServiceError> {
        let mut t = self.tables.write().await;
        if !t.users.contains_key(&new.provider_id) {
            return Err(ServiceError::not_found("provider"));
        }
        let listing = Listing {
            id: Uuid::new_v4(),
            provider_id: new.provider_id,
            title: new.title,
            description: new.description,
            category: new.category,
            price: new.price,
            location: new.location,
            image: new.image,
            created_at: Utc::now(),
        };
        let row = t.row(listing.clone());
        t.listings.insert(listing.id, row);
        Ok(listing)
    }

    async fn find_listing(&self, id: Uuid) -> Result<Option<Listing>, ServiceError> {
        Ok(self.tables.read().await.listings.get(&id).map(|r| r.value.clone()))
    }

    async fn search_listings(&self, filter: &ListingFilter) -> Result<Vec<Listing>, ServiceError> {
        let t = self.tables.read().await;
        Ok(ordered(t.listings.values().filter(|r| filter.matches(&r.value)), |l| l.created_at, true))
    }

    async fn listings_by_provider(&self, provider_id: Uuid) -> Result<Vec<Listing>, ServiceError> {
        let t = self.tables.read().await;
        Ok(ordered(t.listings.values().filter(|r| r.value.provider_id == provider_id), |l| l.created_at, true))
    }

    async fn find_listings(&self, ids: &[Uuid]) -> Result<Vec<Listing>, ServiceError> {
        let t = self.tables.read().await;
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        Ok(t.listings.iter().filter(|(id, _)| wanted.contains(id)).map(|(_, r)| r.value.clone()).collect())
    }

    async fn count_listings(&self) -> Result<u64, ServiceError> {
        Ok(self.tables.read().await.listings.len() as u64)
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create_booking(&self, new: NewBooking) -> Result<Booking, ServiceError> {
        let mut t = self.tables.write().await;
        if !t.listings.contains_key(&new.service_id) {
            return Err(ServiceError::not_found("service"));
        }
        let booking = Booking {
            id: Uuid::new_v4(),
            customer_id: new.customer_id,
            service_id: new.service_id,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            date: new.date,
            created_at: Utc::now(),
        };
        let row = t.row(booking.clone());
        t.bookings.insert(booking.id, row);
        Ok(booking)
    }

    async fn find_booking(&self, id: Uuid) -> Result<Option<Booking>, ServiceError> {
        Ok(self.tables.read().await.bookings.get(&id).map(|r| r.value.clone()))
    }

    async fn bookings_for_customer(&self, customer_id: Uuid) -> Result<Vec<Booking>, ServiceError> {
        let t = self.tables.read().await;
        Ok(ordered(t.bookings.values().filter(|r| r.value.customer_id == customer_id), |b| b.created_at, true))
    }

    async fn bookings_for_listings(&self, service_ids: &[Uuid]) -> Result<Vec<Booking>, ServiceError> {
        let t = self.tables.read().await;
        let wanted: HashSet<&Uuid> = service_ids.iter().collect();
        Ok(ordered(t.bookings.values().filter(|r| wanted.contains(&r.value.service_id)), |b| b.created_at, true))
    }

    async fn save_booking_state(
        &self,
        id: Uuid,
        status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> Result<Booking, ServiceError> {
        let mut t = self.tables.write().await;
        let row = t.bookings.get_mut(&id).ok_or_else(|| ServiceError::not_found("booking"))?;
        row.value.status = status;
        row.value.payment_status = payment_status;
        Ok(row.value.clone())
    }

    async fn count_bookings(&self) -> Result<u64, ServiceError> {
        Ok(self.tables.read().await.bookings.len() as u64)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn create_review(&self, new: NewReview) -> Result<Review, ServiceError> {
        let mut t = self.tables.write().await;
        let review = Review {
            id: Uuid::new_v4(),
            service_id: new.service_id,
            user_id: new.user_id,
            rating: new.rating,
            comment: new.comment,
            created_at: Utc::now(),
        };
        let row = t.row(review.clone());
        t.reviews.insert(review.id, row);
        Ok(review)
    }

    async fn reviews_for_listing(&self, service_id: Uuid) -> Result<Vec<Review>, ServiceError> {
        let t = self.tables.read().await;
        Ok(ordered(t.reviews.values().filter(|r| r.value.service_id == service_id), |r| r.created_at, true))
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn create_message(&self, new: NewMessage) -> Result<Message, ServiceError> {
        let mut t = self.tables.write().await;
        let message = Message {
            id: Uuid::new_v4(),
            sender_id: new.sender_id,
            recipient_id: new.recipient_id,
            content: new.content,
            created_at: new.created_at,
        };
        let row = t.row(message.clone());
        t.messages.insert(message.id, row);
        Ok(message)
    }

    async fn messages_involving(&self, user_id: Uuid) -> Result<Vec<Message>, ServiceError> {
        let t = self.tables.read().await;
        let mine = t.messages.values().filter(|r| r.value.sender_id == user_id || r.value.recipient_id == user_id);
        Ok(ordered(mine, |m| m.created_at, true))
    }

    async fn messages_between(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>, ServiceError> {
        let t = self.tables.read().await;
        let pair = t.messages.values().filter(|r| {
            let m = &r.value;
            (m.sender_id == a && m.recipient_id == b) || (m.sender_id == b && m.recipient_id == a)
        });
        Ok(ordered(pair, |m| m.created_at, false))
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, ServiceError> {
        let t = self.tables.read().await;
        let mut all: Vec<Category> = t.categories.values().map(|r| r.value.clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.categories.values().find(|r| r.value.name == name).map(|r| r.value.clone()))
    }

    async fn create_category(&self, name: &str) -> Result<Category, ServiceError> {
        let mut t = self.tables.write().await;
        if t.categories.values().any(|r| r.value.name == name) {
            return Err(ServiceError::Conflict(format!("category '{name}' already exists")));
        }
        let category = Category { id: Uuid::new_v4(), name: name.to_string(), created_at: Utc::now() };
        let row = t.row(category.clone());
        t.categories.insert(category.id, row);
        Ok(category)
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.tables.write().await.categories.remove(&id).is_some())
    }
}

#[async_trait]
impl DisputeRepository for MemoryStore {
    async fn create_dispute(&self, new: NewDispute) -> Result<Dispute, ServiceError> {
        let mut t = self.tables.write().await;
        let dispute = Dispute {
            id: Uuid::new_v4(),
            reporter_id: new.reporter_id,
            reported_user_id: new.reported_user_id,
            reason: new.reason,
            status: DisputeStatus::Open,
            created_at: Utc::now(),
        };
        let row = t.row(dispute.clone());
        t.disputes.insert(dispute.id, row);
        Ok(dispute)
    }

    async fn list_disputes(&self) -> Result<Vec<Dispute>, ServiceError> {
        let t = self.tables.read().await;
        Ok(ordered(t.disputes.values(), |d| d.created_at, true))
    }

    async fn set_dispute_status(&self, id: Uuid, status: DisputeStatus) -> Result<Option<Dispute>, ServiceError> {
        let mut t = self.tables.write().await;
        Ok(t.disputes.get_mut(&id).map(|r| {
            r.value.status = status;
            r.value.clone()
        }))
    }

    async fn count_disputes_with_status(&self, status: DisputeStatus) -> Result<u64, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.disputes.values().filter(|r| r.value.status == status).count() as u64)
    }
}
