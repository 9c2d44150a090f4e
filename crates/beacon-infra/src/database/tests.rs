#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use beacon_core::domain::{Email, WaitlistEntry};
    use beacon_core::ports::WaitlistRepository;

    use crate::database::entity::waitlist_entry;
    use crate::database::postgres_repo::PostgresWaitlistRepository;

    fn model(email: &str) -> waitlist_entry::Model {
        waitlist_entry::Model {
            id: uuid::Uuid::new_v4(),
            email: email.to_owned(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let row = model("jane@example.com");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![row.clone()]])
            .into_connection();

        let repo = PostgresWaitlistRepository::new(db);
        let email = Email::parse("jane@example.com").unwrap();

        let entry = repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(entry.id, row.id);
        assert_eq!(entry.email, email);
    }

    #[tokio::test]
    async fn test_find_by_email_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<waitlist_entry::Model>::new()])
            .into_connection();

        let repo = PostgresWaitlistRepository::new(db);
        let email = Email::parse("nobody@example.com").unwrap();
        assert!(repo.find_by_email(&email).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let entry = WaitlistEntry::new(Email::parse("new@example.com").unwrap());
        let stored = waitlist_entry::Model {
            id: entry.id,
            email: entry.email.to_string(),
            created_at: entry.created_at.into(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored]])
            .into_connection();

        let repo = PostgresWaitlistRepository::new(db);
        let saved = repo.insert(entry.clone()).await.unwrap();
        assert_eq!(saved.id, entry.id);
        assert_eq!(saved.email, entry.email);
    }

    #[tokio::test]
    async fn test_list_emails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model("a@example.com"), model("b@example.com")]])
            .into_connection();

        let repo = PostgresWaitlistRepository::new(db);
        assert_eq!(
            repo.list_emails().await.unwrap(),
            ["a@example.com", "b@example.com"]
        );
    }
}
