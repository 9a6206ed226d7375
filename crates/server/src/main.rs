use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use lexplain_server::router::build_router;
use lexplain_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lexplain_core::config::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = lexplain_core::Config::from_env();
    let state = Arc::new(AppState::from_config(&config));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
