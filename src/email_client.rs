use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::domain::ContactEmail;

#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: ContactEmail,
    authorization_token: Secret<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bcc: Option<&'a str>,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}

#[derive(thiserror::Error, Debug)]
#[error("Failed to deliver an email through the mail API")]
pub struct EmailClientError(#[from] reqwest::Error);

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: ContactEmail,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }

    pub fn sender(&self) -> &ContactEmail {
        &self.sender
    }

    /// Sends one message to `recipient`, with an optional blind copy.
    #[tracing::instrument(name = "Sending an email", skip(self, html_content, text_content))]
    pub async fn send_email(
        &self,
        recipient: &ContactEmail,
        bcc: Option<&ContactEmail>,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), EmailClientError> {
        let url = format!("{}/email", self.base_url);
        let request_body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: recipient.as_ref(),
            bcc: bcc.map(|b| b.as_ref()),
            subject,
            html_body: html_content,
            text_body: text_content,
        };

        self.http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
