//! # API Module
//!
//! HTTP endpoints of the tempolist web app.
//!
//! ## Endpoints
//!
//! - [`home`] - `GET /`: login page, or the preferences form once logged in
//! - [`login`] - `GET /login`: redirects to Spotify's authorization page
//! - [`callback`] - `GET /callback`: exchanges the authorization code and
//!   stores the token in the session
//! - [`generate_playlist`] - `POST /generate_playlist`: runs the
//!   [`PlaylistGenerator`](crate::generator::PlaylistGenerator)
//! - [`logout`] - `GET /logout`: drops the session
//! - [`health`] - `GET /health`: status and version
//!
//! Handlers receive the shared [`AppState`] through an `Extension` layer and
//! identify the browser by the session cookie. They never hand the session
//! itself to the generator, only the bearer token read from it.

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode, header};
use reqwest::Client;

use crate::{
    config::Config,
    error::ApiError,
    management::SessionManager,
    spotify,
    utils::{self, SESSION_COOKIE},
};

mod callback;
mod generate;
mod health;
mod home;
mod login;
pub mod pages;

pub use callback::callback;
pub use generate::generate_playlist;
pub use health::health;
pub use home::home;
pub use login::{login, logout};

/// State shared by every handler.
///
/// The HTTP client is built once and shared; it pools connections to Spotify
/// and carries the request timeout.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        Ok(Self {
            config: Arc::new(config),
            http: spotify::http_client()?,
            sessions: SessionManager::new(),
        })
    }
}

/// Session id from the request's `Cookie` header.
pub(crate) fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookies| utils::find_cookie(cookies, SESSION_COOKIE))
        .map(str::to_string)
}

/// Status to answer an error page with. Upstream codes that are not errors
/// themselves become 502.
pub(crate) fn error_status(code: u16) -> StatusCode {
    StatusCode::from_u16(code)
        .ok()
        .filter(|s| s.is_client_error() || s.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}
