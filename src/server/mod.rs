mod error;
mod http_layers;
mod page;
mod routes;
mod state;

pub use http_layers::{cors, log_requests, RequestsLoggingLevel};
pub use routes::make_app;
pub use state::ServerState;

use crate::{config::ServerConfig, media::MediaService};
use anyhow::{Context, Result};
use tracing::info;

pub async fn run_server(config: &ServerConfig, media: MediaService) -> Result<()> {
    let state = ServerState::new(config.requests_logging_level, media);
    let app = make_app(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Listening on http://{}", address);

    Ok(axum::serve(listener, app).await?)
}
