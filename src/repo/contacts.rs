use async_trait::async_trait;

use sqlx::PgPool;

use thiserror::Error;

use uuid::Uuid;

use crate::domain::RequiredText;

/// New contact submission that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub name: RequiredText,
    pub email: RequiredText,
    pub message: RequiredText,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
}

/// Write side of the contacts collection
///
/// Every call is a single insert. Nothing is deduplicated, so submitting the
/// same contact twice stores two records.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, contact: &NewContact) -> Result<Uuid, StoreError>;
}

/// Contacts collection backed by the `contacts` table
#[derive(Debug, Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    #[tracing::instrument(name = "Insert contact", skip(self, contact))]
    async fn insert(&self, contact: &NewContact) -> Result<Uuid, StoreError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "insert into contacts(id, name, email, message) values ($1, $2, $3, $4) returning id",
        )
        .bind(Uuid::new_v4())
        .bind(contact.name.as_ref())
        .bind(contact.email.as_ref())
        .bind(contact.message.as_ref())
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }
}
