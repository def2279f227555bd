use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use restaurant_ordering_api::{
    config::AppConfig, db::run_migrations, routes, state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,restaurant_ordering_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let ip: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("APP_HOST is not an IP address: {}", config.host))?;
    let addr = SocketAddr::from((ip, config.port));

    let state = AppState::connect(config).await?;
    run_migrations(&state.orm).await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, docs = "/docs", "restaurant ordering api listening");

    axum::serve(listener, routes::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
