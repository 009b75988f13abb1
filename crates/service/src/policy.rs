//! Role-based authorization.
//!
//! Every role maps to a flat set of capabilities; endpoints ask the
//! [`Policy`] for a capability instead of comparing role strings.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Provider,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Provider => "provider",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Role {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Role::Customer),
            "provider" => Ok(Role::Provider),
            "admin" => Ok(Role::Admin),
            other => Err(ServiceError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create bookings and pay for them.
    BookServices,
    /// Publish service listings.
    PublishServices,
    /// Confirm, cancel or complete bookings on owned listings.
    DecideBookings,
    /// Messages, reviews, disputes and the user directory.
    Participate,
    ManageUsers,
    ManageCategories,
    ManageDisputes,
    ViewStats,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::BookServices => "book_services",
            Capability::PublishServices => "publish_services",
            Capability::DecideBookings => "decide_bookings",
            Capability::Participate => "participate",
            Capability::ManageUsers => "manage_users",
            Capability::ManageCategories => "manage_categories",
            Capability::ManageDisputes => "manage_disputes",
            Capability::ViewStats => "view_stats",
        }
    }
}

/// Authenticated caller, extracted from a verified token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub role: Role,
}

impl Identity {
    pub fn new(id: Uuid, role: Role) -> Self { Self { id, role } }
}

/// Role → capability table.
#[derive(Clone, Copy, Debug, Default)]
pub struct Policy;

const CUSTOMER: &[Capability] = &[Capability::BookServices, Capability::Participate];
const PROVIDER: &[Capability] = &[Capability::PublishServices, Capability::DecideBookings, Capability::Participate];
const ADMIN: &[Capability] = &[
    Capability::Participate,
    Capability::ManageUsers,
    Capability::ManageCategories,
    Capability::ManageDisputes,
    Capability::ViewStats,
];

impl Policy {
    pub fn grants(role: Role) -> &'static [Capability] {
        match role {
            Role::Customer => CUSTOMER,
            Role::Provider => PROVIDER,
            Role::Admin => ADMIN,
        }
    }

    pub fn allows(role: Role, capability: Capability) -> bool {
        Self::grants(role).contains(&capability)
    }

    /// Fails with `Forbidden` when the caller's role lacks `capability`.
    pub fn authorize(identity: &Identity, capability: Capability) -> Result<(), ServiceError> {
        if Self::allows(identity.role, capability) {
            Ok(())
        } else {
            tracing::debug!(user_id = %identity.id, role = %identity.role, capability = capability.as_str(), "capability_denied");
            Err(ServiceError::Forbidden(format!(
                "role '{}' may not {}",
                identity.role,
                capability.as_str().replace('_', " ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customers_book_but_do_not_publish() {
        assert!(Policy::allows(Role::Customer, Capability::BookServices));
        assert!(!Policy::allows(Role::Customer, Capability::PublishServices));
        assert!(!Policy::allows(Role::Customer, Capability::DecideBookings));
    }

    #[test]
    fn providers_publish_and_decide() {
        assert!(Policy::allows(Role::Provider, Capability::PublishServices));
        assert!(Policy::allows(Role::Provider, Capability::DecideBookings));
        assert!(!Policy::allows(Role::Provider, Capability::BookServices));
        assert!(!Policy::allows(Role::Provider, Capability::ManageUsers));
    }

    #[test]
    fn only_admin_moderates() {
        for cap in [Capability::ManageUsers, Capability::ManageCategories, Capability::ManageDisputes, Capability::ViewStats] {
            assert!(Policy::allows(Role::Admin, cap));
            assert!(!Policy::allows(Role::Customer, cap));
            assert!(!Policy::allows(Role::Provider, cap));
        }
    }

    #[test]
    fn everyone_participates() {
        for role in [Role::Customer, Role::Provider, Role::Admin] {
            assert!(Policy::allows(role, Capability::Participate));
        }
    }

    #[test]
    fn authorize_reports_forbidden() {
        let who = Identity::new(Uuid::new_v4(), Role::Customer);
        let err = Policy::authorize(&who, Capability::ManageUsers).unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Customer, Role::Provider, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }
}
