use reqwest::{Client, StatusCode};

use crate::{
    config::Config,
    error::ApiError,
    spotify::api_error_from_response,
    types::{CurrentUserResponse, UserIdentity},
};

/// Resolves the user the bearer token acts for via `GET /me`.
///
/// Never cached: every generation run asks again.
pub async fn get_current_user(
    config: &Config,
    http: &Client,
    token: &str,
) -> Result<UserIdentity, ApiError> {
    let api_url = format!("{uri}/me", uri = config.api_url);

    let response = http
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| ApiError::from_transport(&e))?;

    if !response.status().is_success() {
        return Err(api_error_from_response(response).await);
    }

    let user = response
        .json::<CurrentUserResponse>()
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_GATEWAY.as_u16(), e.to_string()))?;

    Ok(UserIdentity { id: user.id })
}
