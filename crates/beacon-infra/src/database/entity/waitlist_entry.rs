//! Waitlist entry entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use beacon_core::domain::{Email, WaitlistEntry};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "waitlist_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for WaitlistEntry {
    type Error = beacon_core::DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            email: Email::parse(&model.email)?,
            created_at: model.created_at.into(),
        })
    }
}

/// Conversion from domain entry to SeaORM ActiveModel.
impl From<WaitlistEntry> for ActiveModel {
    fn from(entry: WaitlistEntry) -> Self {
        Self {
            id: Set(entry.id),
            email: Set(entry.email.as_str().to_string()),
            created_at: Set(entry.created_at.into()),
        }
    }
}
