use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::domain::{PersonRef, UserSummary};
use crate::errors::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Moves a provider may make on the status endpoint.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for BookingStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "" => Err(ServiceError::InvalidStatus("status required".into())),
            other => Err(ServiceError::InvalidStatus(format!("unknown booking status '{other}'"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(ServiceError::Validation(format!("unknown payment status '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingInput {
    pub service_id: Uuid,
    pub date: DateTime<Utc>,
}

/// Missing, null or non-string `status` reads as empty so the caller's
/// permissions are checked before the value is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateInput {
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: String,
}

pub(crate) fn lenient_status<'de, D>(de: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Other(serde::de::IgnoredAny),
    }
    Ok(match Raw::deserialize(de)? {
        Raw::Text(s) => s,
        Raw::Other(_) => String::new(),
    })
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub date: DateTime<Utc>,
}

/// The booked service as shown next to a booking. `provider` is only
/// filled for the customer's view.
#[derive(Debug, Clone, Serialize)]
pub struct BookedService {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<PersonRef>,
}

/// Booking with related records resolved. Providers get `customer`,
/// customers get `service.provider`.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    #[serde(flatten)]
    pub booking: Booking,
    pub service: Option<BookedService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<UserSummary>,
}

#[cfg(test)]
mod tests {
    use super::BookingStatus::*;
    use super::*;

    #[test]
    fn allowed_transitions() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
    }

    #[test]
    fn everything_else_is_refused() {
        let all = [Pending, Confirmed, Completed, Cancelled];
        let allowed = [(Pending, Confirmed), (Pending, Cancelled), (Confirmed, Completed)];
        for from in all {
            for to in all {
                assert_eq!(from.can_transition_to(to), allowed.contains(&(from, to)), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn unknown_status_is_invalid_status() {
        assert!(matches!("shipped".parse::<BookingStatus>(), Err(ServiceError::InvalidStatus(_))));
        assert!(matches!("Confirmed".parse::<BookingStatus>(), Err(ServiceError::InvalidStatus(_))));
        assert_eq!("cancelled".parse::<BookingStatus>().unwrap(), Cancelled);
    }

    #[test]
    fn status_body_tolerates_missing_and_non_string_values() {
        for body in ["{}", r#"{"status":null}"#, r#"{"status":5}"#, r#"{"status":["confirmed"]}"#] {
            let input: StatusUpdateInput = serde_json::from_str(body).expect(body);
            assert_eq!(input.status, "", "{body}");
            assert!(matches!(input.status.parse::<BookingStatus>(), Err(ServiceError::InvalidStatus(_))));
        }
        let input: StatusUpdateInput = serde_json::from_str(r#"{"status":"confirmed"}"#).unwrap();
        assert_eq!(input.status, "confirmed");
    }
}
