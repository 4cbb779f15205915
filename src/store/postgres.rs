use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Transaction};

use crate::domain::{Contact, ContactEmail, ContactId, ContactUpdate, ListId, NewContact};
use crate::store::{ContactStore, ContactTransaction, SearchScope, StoreError};

#[derive(Clone)]
pub struct PostgresContactStore {
    pool: Pool<Postgres>,
}

impl PostgresContactStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PostgresContactStore {
    #[tracing::instrument(name = "Opening a contact store transaction", skip(self))]
    async fn begin(&self) -> Result<Box<dyn ContactTransaction>, StoreError> {
        let transaction = self.pool.begin().await.map_err(|error| {
            tracing::error!("Failed to begin transaction: {:?}", error);
            error
        })?;

        Ok(Box::new(PostgresTransaction { transaction }))
    }
}

struct PostgresTransaction {
    transaction: Transaction<'static, Postgres>,
}

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    email: String,
    name: Option<String>,
    active: bool,
}

impl PostgresTransaction {
    async fn list_ids(&mut self, contact_id: i64) -> Result<Vec<ListId>, sqlx::Error> {
        let ids: Vec<i64> = sqlx::query_scalar(
            r#"
                SELECT list_id FROM newsletter_contact_lists
                WHERE contact_id = $1
                ORDER BY list_id
            "#,
        )
        .bind(contact_id)
        .fetch_all(&mut *self.transaction)
        .await?;

        Ok(ids.into_iter().map(ListId).collect())
    }

    async fn add_lists(&mut self, contact_id: i64, lists: &[ListId]) -> Result<(), sqlx::Error> {
        if lists.is_empty() {
            return Ok(());
        }

        let ids: Vec<i64> = lists.iter().map(|l| l.0).collect();
        sqlx::query(
            r#"
                INSERT INTO newsletter_contact_lists (contact_id, list_id)
                SELECT $1, UNNEST($2::BIGINT[])
                ON CONFLICT DO NOTHING
            "#,
        )
        .bind(contact_id)
        .bind(ids)
        .execute(&mut *self.transaction)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ContactTransaction for PostgresTransaction {
    #[tracing::instrument(name = "Searching a contact by email", skip(self, email))]
    async fn find_by_email(
        &mut self,
        email: &ContactEmail,
        scope: SearchScope,
    ) -> Result<Option<Contact>, StoreError> {
        let row: Option<ContactRow> = sqlx::query_as(
            r#"
                SELECT id, email, name, active FROM newsletter_contacts
                WHERE email = $1 AND ($2 OR active)
                ORDER BY id
                LIMIT 1
            "#,
        )
        .bind(email.as_ref())
        .bind(scope == SearchScope::IncludeInactive)
        .fetch_optional(&mut *self.transaction)
        .await
        .map_err(|error| {
            tracing::error!("Failed to execute query: {:?}", error);
            error
        })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lists = self.list_ids(row.id).await?;
        Ok(Some(Contact {
            id: ContactId(row.id),
            email: row.email,
            name: row.name,
            active: row.active,
            lists: lists.into_iter().collect(),
        }))
    }

    #[tracing::instrument(name = "Saving a new contact in the database", skip(self, contact))]
    async fn create(&mut self, contact: NewContact) -> Result<Contact, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
                INSERT INTO newsletter_contacts (email, name, active, created_at)
                VALUES ($1, $2, TRUE, $3)
                RETURNING id
            "#,
        )
        .bind(contact.email.as_ref())
        .bind(contact.name.as_ref().map(|n| n.as_ref()))
        .bind(Utc::now())
        .fetch_one(&mut *self.transaction)
        .await
        .map_err(|error| {
            tracing::error!("Failed to execute query: {:?}", error);
            error
        })?;

        self.add_lists(id, &contact.lists).await?;

        Ok(Contact {
            id: ContactId(id),
            email: contact.email.as_ref().to_owned(),
            name: contact.name.map(|n| n.as_ref().to_owned()),
            active: true,
            lists: contact.lists.into_iter().collect(),
        })
    }

    #[tracing::instrument(name = "Updating a contact in the database", skip(self, update))]
    async fn update(&mut self, id: ContactId, update: ContactUpdate) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
                UPDATE newsletter_contacts
                SET active = $2, name = COALESCE($3, name)
                WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(update.active)
        .bind(update.name.as_ref().map(|n| n.as_ref()))
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| {
            tracing::error!("Failed to execute query: {:?}", error);
            error
        })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UnknownContact(id));
        }

        self.add_lists(id.0, &update.add_lists).await?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.transaction.commit().await?;
        Ok(())
    }
}
