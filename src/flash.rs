//! Status messages shown above the newsletter forms.

use crate::domain::ContactEmail;
use crate::reconciler::{SubscribeOutcome, UnsubscribeOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    level: Level,
    content: String,
}

impl FlashMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            content: content.into(),
        }
    }

    pub fn invalid_email() -> Self {
        Self::warning("Email is not valid!")
    }

    pub fn subscribed(outcome: &SubscribeOutcome) -> Self {
        match outcome {
            SubscribeOutcome::Created(_) => {
                Self::info("Thanks! Your subscription was submitted successfully!")
            }
            SubscribeOutcome::Updated => Self::info("Updated your email in our newsletter!"),
            SubscribeOutcome::AlreadySubscribed => {
                Self::info("Your email is already in our newsletter!")
            }
        }
    }

    pub fn unsubscribed(outcome: UnsubscribeOutcome, email: &ContactEmail) -> Self {
        match outcome {
            UnsubscribeOutcome::Unsubscribed => {
                Self::info(format!("Unsubscribed {} in our newsletter!", email))
            }
            UnsubscribeOutcome::NotFound => {
                Self::info(format!("Your email {} not found in our newsletter!", email))
            }
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
