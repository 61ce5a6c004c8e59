use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wally::{config::AppConfig, upstream::UpstreamClient, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging first
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wally=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting wally v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::init()?;
    info!("Configuration loaded");

    let upstream = Arc::new(UpstreamClient::new(&config.upstream)?);
    info!(
        "Upstream wallet service: {} (timeout {}s)",
        upstream.endpoint(),
        config.upstream.timeout_secs
    );

    let state = web::AppState {
        upstream,
        web: Arc::new(config.web.clone()),
    };
    let app = web::create_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Web server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
