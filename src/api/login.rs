use axum::{
    Extension,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    api::{AppState, pages, session_id},
    spotify, utils, warning,
};

/// Starts the authorization-code flow.
///
/// This is the only place a session is created. A fresh `state` value is
/// stored in the session and sent along, so the callback can tell its own
/// redirect from a forged one.
pub async fn login(headers: HeaderMap, Extension(state): Extension<AppState>) -> Response {
    let id = state.sessions.ensure(session_id(&headers).as_deref()).await;

    let oauth_state = utils::generate_oauth_state();
    let auth_url = match spotify::auth::authorize_url(&state.config, &oauth_state) {
        Ok(url) => url,
        Err(e) => {
            warning!("Cannot build authorization url: {}", e);
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            let page = pages::error_page(status.as_u16(), &e.message, None);
            return (status, Html(page)).into_response();
        }
    };
    state.sessions.set_oauth_state(&id, oauth_state).await;

    (
        [(header::SET_COOKIE, utils::session_cookie(&id))],
        Redirect::to(&auth_url),
    )
        .into_response()
}

pub async fn logout(headers: HeaderMap, Extension(state): Extension<AppState>) -> Response {
    if let Some(id) = session_id(&headers) {
        state.sessions.remove(&id).await;
    }

    (
        [(header::SET_COOKIE, utils::expired_session_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}
