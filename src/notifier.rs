use crate::domain::{Contact, ContactEmail};
use crate::email_client::{EmailClient, EmailClientError};
use crate::templates::{TemplateContext, TemplateError, Templates, WELCOME_HTML, WELCOME_TEXT};

#[derive(thiserror::Error, Debug)]
pub enum NotifyError {
    #[error("Stored contact email `{0}` cannot receive mail")]
    InvalidRecipient(String),
    #[error("Failed to render the welcome email")]
    Template(#[from] TemplateError),
    #[error("Failed to send the welcome email")]
    Delivery(#[from] EmailClientError),
}

/// Sends the welcome email to newly created contacts, when enabled.
#[derive(Clone)]
pub struct WelcomeNotifier {
    email_client: EmailClient,
    templates: Templates,
    site_title: String,
    enabled: bool,
}

impl WelcomeNotifier {
    pub fn new(
        email_client: EmailClient,
        templates: Templates,
        site_title: String,
        enabled: bool,
    ) -> Self {
        Self {
            email_client,
            templates,
            site_title,
            enabled,
        }
    }

    /// Returns whether a message was handed to the mail API.
    #[tracing::instrument(name = "Sending a welcome email", skip(self, contact), fields(contact_id = %contact.id))]
    pub async fn send_welcome(&self, contact: &Contact) -> Result<bool, NotifyError> {
        if !self.enabled {
            tracing::debug!("Welcome emails are disabled");
            return Ok(false);
        }

        let recipient = ContactEmail::parse(contact.email.clone())
            .map_err(|_| NotifyError::InvalidRecipient(contact.email.clone()))?;
        let context = TemplateContext::new()
            .insert("name", contact.name.as_deref().unwrap_or(contact.email.as_str()))
            .insert("email", contact.email.as_str())
            .insert("site_title", self.site_title.as_str());

        let html_body = self.templates.render(WELCOME_HTML, &context)?;
        let text_body = self.templates.render(WELCOME_TEXT, &context)?;
        let subject = format!("Welcome to {}!", self.site_title);

        self.email_client
            .send_email(
                &recipient,
                Some(self.email_client.sender()),
                &subject,
                &html_body,
                &text_body,
            )
            .await?;

        Ok(true)
    }
}
