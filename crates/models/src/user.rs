use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_verified: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    if name.len() > 128 { return Err(errors::ModelError::Validation("name too long (<=128)".into())); }
    Ok(())
}

/// Fields of a user row to insert; the id is generated by the caller.
pub struct NewUser<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub is_verified: bool,
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewUser<'_>) -> Result<Model, errors::ModelError> {
    validate_email(new.email)?;
    validate_name(new.name)?;
    if new.password_hash.trim().is_empty() {
        return Err(errors::ModelError::Validation("password hash required".into()));
    }
    let am = ActiveModel {
        id: Set(new.id),
        name: Set(new.name.trim().to_string()),
        email: Set(new.email.trim().to_lowercase()),
        password_hash: Set(new.password_hash.to_string()),
        role: Set(new.role.to_string()),
        is_verified: Set(new.is_verified),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(errors::ModelError::from)
}

/// Flip `is_verified` and leave every other column untouched.
pub async fn toggle_verified<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await? else { return Ok(None) };
    let next = !found.is_verified;
    let mut am: ActiveModel = found.into();
    am.is_verified = Set(next);
    let updated = am.update(db).await.map_err(errors::ModelError::from)?;
    Ok(Some(updated))
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(errors::ModelError::from)?;
    Ok(res.rows_affected > 0)
}
