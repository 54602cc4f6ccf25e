use hotline_relay::config::Config;
use hotline_relay::infrastructure::vonage::VonageClient;
use hotline_relay::interface::api::{build_router, init_metrics, metrics_router, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting hotline relay");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config);

    let provider = Arc::new(VonageClient::new(&config.provider)?);
    let state = AppState::new(&config, provider);

    info!("Initializing Prometheus metrics exporter");
    let prometheus_handle = init_metrics()?;

    let app = build_router(state).merge(metrics_router(prometheus_handle));

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(
        "Hotline \"{}\" listening on {} with {} staff",
        config.hotline.description,
        address,
        config.staff.len()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down...");
        })
        .await?;

    Ok(())
}
