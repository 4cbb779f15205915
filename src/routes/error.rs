use std::fmt::Debug;

use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Failure that ends a newsletter request with a server error.
///
/// Invalid input is not an error here: it is rendered back to the visitor.
#[derive(thiserror::Error)]
pub enum NewsletterError {
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for NewsletterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl IntoResponse for NewsletterError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("{:?}", self);

        match self {
            NewsletterError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
        .into_response()
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
