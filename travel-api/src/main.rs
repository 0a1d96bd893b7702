use std::net::SocketAddr;

use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use tracing_subscriber::{fmt::time::LocalTime, layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app_state;
mod config;
mod domain;
mod factory;
mod router;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travel_api=debug,tower_http=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_timer(LocalTime::rfc_3339()))
        .init();

    let config = config::read_config().context("failed to read configuration")?;

    let pool = adapters::outbound::sqlite::connect(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;
    tracing::info!(url = %config.database.url, "database ready");

    let app = router::create(factory::app_state(pool), config.application.app_url.clone());
    let app = router::normalize_paths(app);

    let addr: SocketAddr = format!("{}:{}", config.application.host, config.application.port)
        .parse()
        .context("invalid listen address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .await
        .context("server error")?;

    Ok(())
}
