use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

/// A service offered by a provider.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_listing")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub provider_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,
    pub price: f64,
    pub location: String,
    pub image: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Provider }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Provider => Entity::belongs_to(user::Entity)
                .from(Column::ProviderId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_price(price: f64) -> Result<(), errors::ModelError> {
    if !price.is_finite() || price < 0.0 {
        return Err(errors::ModelError::Validation("price must be a non-negative number".into()));
    }
    Ok(())
}

pub fn validate_required(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}

pub struct NewListing<'a> {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub price: f64,
    pub location: &'a str,
    pub image: &'a str,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewListing<'_>) -> Result<Model, errors::ModelError> {
    validate_required("title", new.title)?;
    validate_required("description", new.description)?;
    validate_required("category", new.category)?;
    validate_required("location", new.location)?;
    validate_price(new.price)?;
    let am = ActiveModel {
        id: Set(new.id),
        provider_id: Set(new.provider_id),
        title: Set(new.title.trim().to_string()),
        description: Set(new.description.trim().to_string()),
        category: Set(new.category.trim().to_string()),
        price: Set(new.price),
        location: Set(new.location.trim().to_string()),
        image: Set(new.image.trim().to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}
