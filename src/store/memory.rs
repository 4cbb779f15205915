use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{Contact, ContactEmail, ContactId, ContactUpdate, NewContact};
use crate::store::{ContactStore, ContactTransaction, SearchScope, StoreError};

#[derive(Debug, Clone, Default)]
struct Records {
    contacts: Vec<Contact>,
    next_id: i64,
}

/// Process-local record store. Transactions are serialised and work on a
/// copy of the records that replaces the shared state on commit.
#[derive(Clone, Default)]
pub struct InMemoryContactStore {
    records: Arc<Mutex<Records>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a contact as-is, bypassing the transactional API.
    pub async fn insert(&self, contact: NewContact, active: bool) -> Contact {
        self.records.lock().await.insert(contact, active)
    }

    pub async fn contacts(&self) -> Vec<Contact> {
        self.records.lock().await.contacts.clone()
    }
}

impl Records {
    fn insert(&mut self, contact: NewContact, active: bool) -> Contact {
        self.next_id += 1;
        let contact = Contact {
            id: ContactId(self.next_id),
            email: contact.email.as_ref().to_owned(),
            name: contact.name.map(|n| n.as_ref().to_owned()),
            active,
            lists: contact.lists.into_iter().collect(),
        };
        self.contacts.push(contact.clone());
        contact
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn begin(&self) -> Result<Box<dyn ContactTransaction>, StoreError> {
        let guard = self.records.clone().lock_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(InMemoryTransaction { guard, working }))
    }
}

struct InMemoryTransaction {
    guard: OwnedMutexGuard<Records>,
    working: Records,
}

#[async_trait]
impl ContactTransaction for InMemoryTransaction {
    async fn find_by_email(
        &mut self,
        email: &ContactEmail,
        scope: SearchScope,
    ) -> Result<Option<Contact>, StoreError> {
        let found = self
            .working
            .contacts
            .iter()
            .filter(|c| c.email == email.as_ref())
            .filter(|c| scope == SearchScope::IncludeInactive || c.active)
            .min_by_key(|c| c.id)
            .cloned();
        Ok(found)
    }

    async fn create(&mut self, contact: NewContact) -> Result<Contact, StoreError> {
        Ok(self.working.insert(contact, true))
    }

    async fn update(&mut self, id: ContactId, update: ContactUpdate) -> Result<(), StoreError> {
        let contact = self
            .working
            .contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::UnknownContact(id))?;

        contact.active = update.active;
        if let Some(name) = update.name {
            contact.name = Some(name.as_ref().to_owned());
        }
        contact.lists.extend(update.add_lists);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let InMemoryTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
