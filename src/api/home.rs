use axum::{
    Extension,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};

use crate::api::{AppState, pages, session_id};

/// Shows the login page until the session holds a valid token, then the form.
///
/// Never creates a session: anonymous visitors only get a session once they
/// start the login.
pub async fn home(headers: HeaderMap, Extension(state): Extension<AppState>) -> Response {
    let token = match session_id(&headers) {
        Some(id) => state.sessions.access_token(&id).await,
        None => None,
    };

    let page = match token {
        Some(_) => pages::form_page(),
        None => pages::login_page(),
    };
    Html(page).into_response()
}
