use anyhow::Context;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::Method;
use axum::response::Html;
use axum::Form;

use crate::domain::{FormData, Submission};
use crate::flash::FlashMessage;
use crate::notifier::WelcomeNotifier;
use crate::presenter::Presenter;
use crate::reconciler::{Reconciler, SubscribeOutcome};
use crate::routes::form::read_form;
use crate::routes::NewsletterError;
use crate::templates::SUBSCRIBER_PAGE;

#[tracing::instrument(
    name = "Handling the subscribe form",
    skip(reconciler, notifier, presenter, data),
    fields(contact_email = tracing::field::Empty)
)]
pub async fn subscriber(
    State(reconciler): State<Reconciler>,
    State(notifier): State<WelcomeNotifier>,
    State(presenter): State<Presenter>,
    method: Method,
    data: Result<Form<FormData>, FormRejection>,
) -> Result<Html<String>, NewsletterError> {
    let mut form = read_form(&method, data);

    let flash = match form.validate_on_submit() {
        Submission::NotSubmitted => None,
        Submission::Invalid => Some(FlashMessage::invalid_email()),
        Submission::Valid(submission) => {
            tracing::Span::current().record(
                "contact_email",
                &tracing::field::display(&submission.email),
            );

            let outcome = reconciler
                .subscribe(submission.name, &submission.email)
                .await
                .context("Failed to subscribe a contact to the newsletter")?;

            if let SubscribeOutcome::Created(contact) = &outcome {
                if let Err(error) = notifier.send_welcome(contact).await {
                    tracing::error!(
                        error.cause_chain = ?error,
                        error.message = %error,
                        "Subscription saved but the welcome email was not delivered",
                    );
                }
            }

            Some(FlashMessage::subscribed(&outcome))
        }
    };

    form.reset();
    let page = presenter
        .render_form(SUBSCRIBER_PAGE, &form, flash.as_ref())
        .context("Failed to render the subscribe page")?;

    Ok(Html(page))
}
