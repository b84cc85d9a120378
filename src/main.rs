//! timesheet-engine HTTP server
//!
//! Loads the policy directory, then serves the calculation API.

use timesheet_engine::api::{AppState, create_router};
use timesheet_engine::config::{ConfigLoader, ServerConfig};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timesheet_engine=info".into()),
        )
        .init();

    let server = ServerConfig::from_env();
    let config = ConfigLoader::load(&server.config_dir)?;

    let app = create_router(AppState::new(config));

    let addr = format!("0.0.0.0:{}", server.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("timesheet-engine listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
