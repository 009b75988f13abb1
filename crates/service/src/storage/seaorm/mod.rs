//! PostgreSQL store over the `models` entities.

mod bookings;
mod categories;
mod disputes;
mod listings;
mod messages;
mod reviews;
mod users;

#[cfg(test)]
mod tests;

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr},
    DatabaseConnection,
};

use crate::auth::domain::User;
use crate::booking::domain::Booking;
use crate::catalog::domain::Listing;
use crate::category::Category;
use crate::dispute::Dispute;
use crate::errors::ServiceError;
use crate::messaging::domain::Message;
use crate::review::Review;

#[derive(Clone)]
pub struct SeaOrmStore {
    pub db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// `lower(col) LIKE '%needle%'` with LIKE metacharacters escaped.
pub(crate) fn icontains<C: IntoColumnRef>(col: C, needle: &str) -> SimpleExpr {
    let escaped = needle.to_lowercase().replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(format!("%{escaped}%")).escape('\\'))
}

fn user_from(m: models::user::Model) -> Result<User, ServiceError> {
    Ok(User {
        id: m.id,
        name: m.name,
        email: m.email,
        role: m.role.parse()?,
        is_verified: m.is_verified,
        created_at: m.created_at.with_timezone(&Utc),
    })
}

fn listing_from(m: models::service_listing::Model) -> Listing {
    Listing {
        id: m.id,
        provider_id: m.provider_id,
        title: m.title,
        description: m.description,
        category: m.category,
        price: m.price,
        location: m.location,
        image: m.image,
        created_at: m.created_at.with_timezone(&Utc),
    }
}

fn booking_from(m: models::booking::Model) -> Result<Booking, ServiceError> {
    Ok(Booking {
        id: m.id,
        customer_id: m.customer_id,
        service_id: m.service_id,
        status: m.status.parse()?,
        payment_status: m.payment_status.parse()?,
        date: m.date.with_timezone(&Utc),
        created_at: m.created_at.with_timezone(&Utc),
    })
}

fn review_from(m: models::review::Model) -> Review {
    Review {
        id: m.id,
        service_id: m.service_id,
        user_id: m.user_id,
        rating: m.rating,
        comment: m.comment,
        created_at: m.created_at.with_timezone(&Utc),
    }
}

fn message_from(m: models::message::Model) -> Message {
    Message {
        id: m.id,
        sender_id: m.sender_id,
        recipient_id: m.recipient_id,
        content: m.content,
        created_at: m.created_at.with_timezone(&Utc),
    }
}

fn category_from(m: models::category::Model) -> Category {
    Category { id: m.id, name: m.name, created_at: m.created_at.with_timezone(&Utc) }
}

fn dispute_from(m: models::dispute::Model) -> Result<Dispute, ServiceError> {
    Ok(Dispute {
        id: m.id,
        reporter_id: m.reporter_id,
        reported_user_id: m.reported_user_id,
        reason: m.reason,
        status: m.status.parse()?,
        created_at: m.created_at.with_timezone(&Utc),
    })
}
