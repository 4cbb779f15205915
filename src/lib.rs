pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod flash;
pub mod notifier;
pub mod presenter;
pub mod reconciler;
pub mod routes;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod templates;
