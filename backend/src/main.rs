//! Service entry-point: loads configuration, wires adapters, and serves the API.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use geotracker::config::AppSettings;
use geotracker::inbound::http::health::HealthState;
use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()?;
    let config = ServerConfig::from_settings(&settings);
    info!(bind_addr = %config.bind_addr(), "starting geotracker");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, Arc::new(DefaultClock))?;
    server.await?;
    Ok(())
}
