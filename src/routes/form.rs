use axum::extract::rejection::FormRejection;
use axum::http::Method;
use axum::Form;

use crate::domain::{FormData, NewsletterForm};

/// Form state for a request to one of the form pages.
///
/// Only a POST is a submission; whatever a GET carries in its query string is
/// ignored. A POST whose body cannot be read as a form is validated as if
/// every field were left empty.
pub(crate) fn read_form(
    method: &Method,
    data: Result<Form<FormData>, FormRejection>,
) -> NewsletterForm {
    if *method != Method::POST {
        return NewsletterForm::empty();
    }

    match data {
        Ok(Form(data)) => NewsletterForm::submitted(data),
        Err(rejection) => {
            tracing::debug!(%rejection, "Unreadable form body, every field is treated as empty");
            NewsletterForm::submitted(FormData::default())
        }
    }
}
