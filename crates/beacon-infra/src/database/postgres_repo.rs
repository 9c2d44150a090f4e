//! PostgreSQL waitlist repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, SqlErr,
};

use beacon_core::domain::{Email, WaitlistEntry};
use beacon_core::error::RepoError;
use beacon_core::ports::WaitlistRepository;

use super::entity::waitlist_entry::{self, Entity as WaitlistEntity};

/// PostgreSQL waitlist repository.
pub struct PostgresWaitlistRepository {
    db: DbConn,
}

impl PostgresWaitlistRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_error(e: DbErr) -> RepoError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => match e {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
            _ => RepoError::Query(e.to_string()),
        },
    }
}

fn into_entry(model: waitlist_entry::Model) -> Result<WaitlistEntry, RepoError> {
    WaitlistEntry::try_from(model).map_err(|e| RepoError::Query(e.to_string()))
}

#[async_trait]
impl WaitlistRepository for PostgresWaitlistRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<WaitlistEntry>, RepoError> {
        tracing::debug!(email = %email.masked(), "Finding waitlist entry by email");

        let result = WaitlistEntity::find()
            .filter(waitlist_entry::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        result.map(into_entry).transpose()
    }

    async fn insert(&self, entry: WaitlistEntry) -> Result<WaitlistEntry, RepoError> {
        let active_model: waitlist_entry::ActiveModel = entry.into();
        let model = active_model.insert(&self.db).await.map_err(query_error)?;
        into_entry(model)
    }

    async fn list_emails(&self) -> Result<Vec<String>, RepoError> {
        let models = WaitlistEntity::find()
            .order_by_asc(waitlist_entry::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(models.into_iter().map(|m| m.email).collect())
    }
}
