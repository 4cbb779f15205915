//! Access to the record store holding newsletter contacts.
//!
//! Every lookup and mutation happens inside a [`ContactTransaction`] obtained
//! from [`ContactStore::begin`]. A transaction that is dropped without
//! [`ContactTransaction::commit`] is rolled back, so an early return through
//! `?` never leaves a partial write behind.

mod memory;
mod postgres;

pub use memory::InMemoryContactStore;
pub use postgres::PostgresContactStore;

use async_trait::async_trait;

use crate::domain::{Contact, ContactEmail, ContactId, ContactUpdate, NewContact};

/// Which contacts a search is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// The store's plain search: inactive contacts are invisible.
    ActiveOnly,
    /// Used by the reconciler, which must find unsubscribed contacts to
    /// reactivate them instead of creating a duplicate.
    IncludeInactive,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to access the contact database")]
    Database(#[from] sqlx::Error),
    #[error("Contact {0} does not exist")]
    UnknownContact(ContactId),
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn ContactTransaction>, StoreError>;
}

#[async_trait]
pub trait ContactTransaction: Send {
    /// First contact (lowest id) registered with exactly this email.
    async fn find_by_email(
        &mut self,
        email: &ContactEmail,
        scope: SearchScope,
    ) -> Result<Option<Contact>, StoreError>;

    async fn create(&mut self, contact: NewContact) -> Result<Contact, StoreError>;

    async fn update(&mut self, id: ContactId, update: ContactUpdate) -> Result<(), StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
