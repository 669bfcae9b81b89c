pub mod cancellation;
pub mod configuration;
pub mod datastore;
pub mod domain;
pub mod email_client;
pub mod render;
pub mod routes;
pub mod startup;
pub mod telemetry;
