use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use server::config::AppConfig;
use server::state::AppState;
use server::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        store: Arc::new(Store::new()),
        config,
    };
    let app = server::build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Olimpiad management API listening on http://{}", addr);
    info!("API docs available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
