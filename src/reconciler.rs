//! Decides how a subscribe or unsubscribe request changes the stored contact.

use std::sync::Arc;

use crate::domain::{Contact, ContactEmail, ContactName, ContactUpdate, ListId, NewContact};
use crate::store::{ContactStore, SearchScope, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Created(Contact),
    Updated,
    AlreadySubscribed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsubscribeOutcome {
    Unsubscribed,
    NotFound,
}

#[derive(Clone)]
pub struct Reconciler {
    store: Arc<dyn ContactStore>,
    lists: Arc<[ListId]>,
}

impl Reconciler {
    /// `lists` are the newsletter lists every subscriber is attached to.
    pub fn new(store: Arc<dyn ContactStore>, lists: Vec<ListId>) -> Self {
        Self {
            store,
            lists: lists.into(),
        }
    }

    #[tracing::instrument(name = "Looking up a contact", skip(self))]
    pub async fn find_by_email(&self, email: &ContactEmail) -> Result<Option<Contact>, StoreError> {
        let mut transaction = self.store.begin().await?;
        let contact = transaction
            .find_by_email(email, SearchScope::IncludeInactive)
            .await?;
        transaction.commit().await?;

        Ok(contact)
    }

    #[tracing::instrument(name = "Unsubscribing a contact", skip(self))]
    pub async fn unsubscribe(&self, email: &ContactEmail) -> Result<UnsubscribeOutcome, StoreError> {
        let mut transaction = self.store.begin().await?;

        let outcome = match transaction
            .find_by_email(email, SearchScope::IncludeInactive)
            .await?
        {
            Some(contact) => {
                let update = ContactUpdate {
                    active: false,
                    name: None,
                    add_lists: Vec::new(),
                };
                transaction.update(contact.id, update).await?;
                UnsubscribeOutcome::Unsubscribed
            }
            None => UnsubscribeOutcome::NotFound,
        };

        transaction.commit().await?;
        Ok(outcome)
    }

    #[tracing::instrument(name = "Subscribing a contact", skip(self, name))]
    pub async fn subscribe(
        &self,
        name: Option<ContactName>,
        email: &ContactEmail,
    ) -> Result<SubscribeOutcome, StoreError> {
        let mut transaction = self.store.begin().await?;

        let outcome = match transaction
            .find_by_email(email, SearchScope::IncludeInactive)
            .await?
        {
            Some(contact) => {
                let missing = contact.missing_lists(&self.lists);
                let outcome = match missing.is_empty() {
                    true => SubscribeOutcome::AlreadySubscribed,
                    false => SubscribeOutcome::Updated,
                };
                let update = ContactUpdate {
                    active: true,
                    name,
                    add_lists: missing,
                };
                transaction.update(contact.id, update).await?;
                outcome
            }
            None => {
                let contact = NewContact {
                    email: email.clone(),
                    name,
                    lists: self.lists.to_vec(),
                };
                SubscribeOutcome::Created(transaction.create(contact).await?)
            }
        };

        transaction.commit().await?;
        Ok(outcome)
    }
}
