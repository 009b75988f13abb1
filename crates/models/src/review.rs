use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, service_listing, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_id: Uuid,
    pub user_id: Uuid,
    pub rating: i16,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Service, Author }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Service => Entity::belongs_to(service_listing::Entity)
                .from(Column::ServiceId)
                .to(service_listing::Column::Id)
                .into(),
            Relation::Author => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_rating(rating: i16) -> Result<(), errors::ModelError> {
    if !(1..=5).contains(&rating) {
        return Err(errors::ModelError::Validation("rating must be between 1 and 5".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    service_id: Uuid,
    user_id: Uuid,
    rating: i16,
    comment: &str,
) -> Result<Model, errors::ModelError> {
    validate_rating(rating)?;
    if comment.trim().is_empty() {
        return Err(errors::ModelError::Validation("comment required".into()));
    }
    let am = ActiveModel {
        id: Set(id),
        service_id: Set(service_id),
        user_id: Set(user_id),
        rating: Set(rating),
        comment: Set(comment.trim().to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}

#[cfg(test)]
mod tests {
    use super::validate_rating;

    #[test]
    fn rating_range_is_inclusive() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        for r in 1..=5 { assert!(validate_rating(r).is_ok()); }
    }
}
