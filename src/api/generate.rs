use std::collections::HashMap;

use axum::{
    Extension, Form,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    api::{AppState, error_status, pages, session_id},
    generator::PlaylistGenerator,
};

/// Handles the preferences form.
///
/// Without a logged-in session the user is sent to `/login`. Otherwise the
/// generator runs to completion or first failure; the page either links the
/// new playlist or shows the error with its status code and hint.
pub async fn generate_playlist(
    headers: HeaderMap,
    Extension(state): Extension<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let token = match session_id(&headers) {
        Some(id) => state.sessions.access_token(&id).await,
        None => None,
    };
    let Some(token) = token else {
        return Redirect::to("/login").into_response();
    };

    let mut generator = PlaylistGenerator::new(&state.config, &state.http, &token);
    match generator.run(&fields).await {
        Ok(url) => Html(pages::success_page(&url)).into_response(),
        Err(e) => {
            let page = pages::error_page(e.status_code(), &e.message(), e.hint());
            (error_status(e.status_code()), Html(page)).into_response()
        }
    }
}
