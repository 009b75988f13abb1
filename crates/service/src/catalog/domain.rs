use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::domain::UserSummary;

/// A service offered by one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub location: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub location: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewListing {
    pub provider_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub location: String,
    pub image: String,
}

/// Listing with its provider resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    #[serde(flatten)]
    pub listing: Listing,
    pub provider: Option<UserSummary>,
}

/// Query of `GET /services`. Blank terms are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingFilter {
    pub search: Option<String>,
    pub location: Option<String>,
}

impl ListingFilter {
    /// Trim, lowercase and drop empty terms.
    pub fn normalized(&self) -> ListingFilter {
        let clean = |v: &Option<String>| {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_lowercase)
        };
        ListingFilter { search: clean(&self.search), location: clean(&self.location) }
    }

    /// Case-insensitive substring match; `search` over title, description
    /// and category, `location` over location, both required when set.
    pub fn matches(&self, listing: &Listing) -> bool {
        let f = self.normalized();
        let search_ok = f.search.as_deref().map_or(true, |needle| {
            [&listing.title, &listing.description, &listing.category]
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
        });
        let location_ok = f
            .location
            .as_deref()
            .map_or(true, |needle| listing.location.to_lowercase().contains(needle));
        search_ok && location_ok
    }
}
