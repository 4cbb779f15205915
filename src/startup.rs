use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    extract::{FromRef, MatchedPath},
    http::Request,
    routing::get,
    Router,
};
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::configuration::Settings;
use crate::email_client::EmailClient;
use crate::notifier::WelcomeNotifier;
use crate::presenter::Presenter;
use crate::reconciler::Reconciler;
use crate::routes::{check_health, home, subscriber, unsubscriber};
use crate::store::{ContactStore, PostgresContactStore};
use crate::templates::Templates;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub reconciler: Reconciler,
    pub notifier: WelcomeNotifier,
    pub presenter: Presenter,
}

/// State backed by the Postgres record store described in `configuration`.
/// The pool connects lazily, on the first request.
pub fn get_app_state(configuration: &Settings) -> Result<AppState, anyhow::Error> {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy(configuration.database.connection_string().expose_secret())
        .context("Failed to configure the Postgres connection pool")?;

    app_state_with_store(configuration, Arc::new(PostgresContactStore::new(pool)))
}

pub fn app_state_with_store(
    configuration: &Settings,
    store: Arc<dyn ContactStore>,
) -> Result<AppState, anyhow::Error> {
    let sender = configuration
        .email_client
        .sender()
        .map_err(|e| anyhow::anyhow!("Invalid sender email address: {}", e))?;
    let email_client = EmailClient::new(
        configuration.email_client.base_url.clone(),
        sender,
        configuration.email_client.authorization_token.clone(),
        configuration.email_client.timeout(),
    )
    .context("Failed to build the email client")?;

    let newsletter = &configuration.newsletter;
    let templates = Templates::new();

    Ok(AppState {
        reconciler: Reconciler::new(store, newsletter.lists.clone()),
        notifier: WelcomeNotifier::new(
            email_client,
            templates.clone(),
            newsletter.site_title.clone(),
            newsletter.send_welcome_email,
        ),
        presenter: Presenter::new(templates, newsletter.site_title.clone()),
    })
}

pub async fn run(listener: TcpListener, app_state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(app_state)).await
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/subscriber", get(subscriber).post(subscriber))
        .route("/unsubscriber", get(unsubscriber).post(unsubscriber))
        .route("/health_check", get(check_health))
        .with_state(app_state)
        .layer(
            // Refer to https://github.com/tokio-rs/axum/blob/main/examples/tracing-aka-logging/Cargo.toml
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);
                tracing::info_span!(
                    "Starting HTTP request",
                    method = ?request.method(),
                    path,
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
}
