use std::collections::BTreeSet;
use std::fmt::Display;

use serde::Deserialize;

use crate::domain::{ContactEmail, ContactName};

/// Identifier assigned by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub i64);

impl Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a newsletter list, as configured for the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub i64);

impl Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A newsletter subscriber as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub email: String,
    pub name: Option<String>,
    pub active: bool,
    pub lists: BTreeSet<ListId>,
}

impl Contact {
    /// Lists from `targets` the contact is not a member of yet, in `targets` order.
    pub fn missing_lists(&self, targets: &[ListId]) -> Vec<ListId> {
        let mut missing = Vec::new();
        for list in targets {
            if !self.lists.contains(list) && !missing.contains(list) {
                missing.push(*list);
            }
        }
        missing
    }
}

#[derive(Debug, Clone)]
pub struct NewContact {
    pub email: ContactEmail,
    pub name: Option<ContactName>,
    pub lists: Vec<ListId>,
}

/// Changes applied to an existing contact. Lists are only ever added.
#[derive(Debug, Clone)]
pub struct ContactUpdate {
    pub active: bool,
    pub name: Option<ContactName>,
    pub add_lists: Vec<ListId>,
}
