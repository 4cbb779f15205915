use anyhow::Context;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::Method;
use axum::response::Html;
use axum::Form;

use crate::domain::{FormData, Submission};
use crate::flash::FlashMessage;
use crate::presenter::Presenter;
use crate::reconciler::Reconciler;
use crate::routes::form::read_form;
use crate::routes::NewsletterError;
use crate::templates::UNSUBSCRIBER_PAGE;

#[tracing::instrument(
    name = "Handling the unsubscribe form",
    skip(reconciler, presenter, data),
    fields(contact_email = tracing::field::Empty)
)]
pub async fn unsubscriber(
    State(reconciler): State<Reconciler>,
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
                .unsubscribe(&submission.email)
                .await
                .context("Failed to unsubscribe a contact from the newsletter")?;

            Some(FlashMessage::unsubscribed(outcome, &submission.email))
        }
    };

    form.reset();
    let page = presenter
        .render_form(UNSUBSCRIBER_PAGE, &form, flash.as_ref())
        .context("Failed to render the unsubscribe page")?;

    Ok(Html(page))
}
