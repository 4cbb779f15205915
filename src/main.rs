use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

use newsletter_forms::configuration::get_configuration;
use newsletter_forms::startup::{get_app_state, run};
use newsletter_forms::telemetry::{get_subscriber, initialize_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("newsletter-forms".into(), "info".into(), std::io::stdout);
    initialize_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration")?;
    let app_state = get_app_state(&configuration)?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    let local_address: SocketAddr = listener.local_addr()?;
    tracing::info!("Listening on {}", local_address);

    run(listener, app_state).await?;
    Ok(())
}
