//! # Spotify Integration Module
//!
//! Thin wrappers around the Spotify Web API endpoints the playlist generator
//! needs. Each wrapper issues exactly one request through the shared client
//! from [`http_client`], takes the bearer token as an explicit argument
//! together with the [`Config`] that names the API base URL, and answers with
//! either the extracted data or an [`ApiError`].
//!
//! ## API Coverage
//!
//! - `POST {token_url}` - authorization-code exchange ([`auth`])
//! - `GET /recommendations` - seed-genre recommendations ([`recommendations`])
//! - `GET /me` - current user ([`user`])
//! - `POST /users/{user_id}/playlists` - playlist creation ([`playlist`])
//! - `POST /playlists/{playlist_id}/tracks` - track insertion ([`playlist`])
//!
//! ## Error Handling
//!
//! Non-success responses are turned into [`ApiError`] by
//! [`api_error_from_response`], which prefers the structured
//! `{"error": {"status", "message"}}` body and falls back to the status line.
//! Transport failures (including the 5 second timeout) become 502/504
//! errors. Nothing here retries.
//!
//! [`Config`]: crate::config::Config

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::{error::ApiError, types::ErrorResponse};

pub mod auth;
pub mod playlist;
pub mod recommendations;
pub mod user;

/// Upper bound for every single call to Spotify.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the HTTP client every Spotify call goes through, bounded by
/// [`REQUEST_TIMEOUT`]. Build it once and share it; clones reuse the same
/// connection pool.
pub fn http_client() -> Result<Client, ApiError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), e.to_string()))
}

/// Converts a non-success response into an [`ApiError`].
///
/// Consumes the response body. When the body holds Spotify's error envelope
/// its status and message win; otherwise the HTTP status line is used. A hint
/// is attached for the statuses a user can do something about.
pub async fn api_error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let error = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(envelope) => ApiError::new(envelope.error.status, envelope.error.message),
        Err(_) => ApiError::from_status(status),
    };

    match hint_for_status(error.status_code) {
        Some(hint) => error.with_hint(hint),
        None => error,
    }
}

/// Passes `201 Created` responses through; anything else becomes an
/// [`ApiError`]. A success status other than 201 is still an error.
pub async fn expect_created(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::CREATED {
        return Ok(response);
    }
    if status.is_success() {
        return Err(ApiError::new(
            StatusCode::BAD_GATEWAY.as_u16(),
            format!("expected 201 Created, got {}", status),
        ));
    }
    Err(api_error_from_response(response).await)
}

fn hint_for_status(status: u16) -> Option<&'static str> {
    match status {
        401 => Some("Your Spotify session has expired. Please log in again."),
        403 => Some("Spotify refused the request. Make sure the app may modify your playlists."),
        429 => Some("Spotify is rate limiting requests. Wait a minute and try again."),
        500..=599 => Some("Spotify is having trouble right now. Please try again later."),
        _ => None,
    }
}
