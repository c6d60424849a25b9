use axum::{
    Extension,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    api::{AppState, error_status, pages, session_id},
    spotify, success, warning,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn callback(
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<AppState>,
) -> Response {
    let Some(id) = session_id(&headers) else {
        return bad_request("Missing session. Please start the login again.");
    };

    // The pending state is consumed whatever the outcome.
    let expected_state = state.sessions.take_oauth_state(&id).await;

    if let Some(error) = params.error {
        warning!("Authorization was denied: {}", error);
        return bad_request(&format!("Spotify authorization failed: {}", error));
    }

    match (expected_state, params.state) {
        (Some(expected), Some(received)) if expected == received => {}
        _ => return bad_request("Login state mismatch. Please start the login again."),
    }

    let Some(code) = params.code else {
        return bad_request("Missing authorization code.");
    };

    match spotify::auth::exchange_code(&state.config, &state.http, &code).await {
        Ok(token) => {
            state.sessions.set_token(&id, token).await;
            success!("User logged in");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            let page = pages::error_page(e.status_code, &e.message, e.user_facing_hint.as_deref());
            (error_status(e.status_code), Html(page)).into_response()
        }
    }
}

fn bad_request(message: &str) -> Response {
    let status = StatusCode::BAD_REQUEST;
    let page = pages::error_page(status.as_u16(), message, None);
    (status, Html(page)).into_response()
}
