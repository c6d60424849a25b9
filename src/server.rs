use std::{net::SocketAddr, str::FromStr};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use tokio::net::TcpListener;

use crate::{
    Res,
    api::{self, AppState},
    config::Config,
    info,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route("/login", get(api::login))
        .route("/logout", get(api::logout))
        .route("/callback", get(api::callback))
        .route("/generate_playlist", post(api::generate_playlist))
        .route("/health", get(api::health))
        .layer(Extension(state))
}

/// Binds `config.server_address` and serves the web app until the process
/// is stopped.
pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = SocketAddr::from_str(&config.server_address)
        .map_err(|e| format!("Failed to parse server address '{}': {}", config.server_address, e))?;

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    let state = AppState::new(config)?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
