use reqwest::{Client, StatusCode, Url};

use crate::{
    config::Config,
    error::ApiError,
    types::{AuthErrorResponse, Token},
    utils,
};

/// Builds the URL the user is redirected to for granting access.
///
/// Uses the plain authorization-code flow: the code is later exchanged with
/// the client secret by [`exchange_code`]. `state` is echoed back to the
/// callback and must be checked there.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config, "a1b2c3")?;
/// // https://accounts.spotify.com/authorize?response_type=code&client_id=...
/// ```
pub fn authorize_url(config: &Config, state: &str) -> Result<String, ApiError> {
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", config.scope.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            format!("invalid authorization url '{}': {}", config.auth_url, e),
        )
    })?;

    Ok(url.to_string())
}

/// Exchanges an authorization code for an access token.
///
/// Posts the code together with the client credentials to the token endpoint.
/// A rejected exchange is reported with the accounts service's
/// `error_description` when present.
pub async fn exchange_code(config: &Config, http: &Client, code: &str) -> Result<Token, ApiError> {
    let response = http
        .post(&config.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await
        .map_err(|e| ApiError::from_transport(&e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let error = match serde_json::from_str::<AuthErrorResponse>(&body) {
            Ok(err) => ApiError::new(
                status.as_u16(),
                err.error_description.unwrap_or(err.error),
            ),
            Err(_) => ApiError::from_status(status),
        };
        return Err(error.with_hint("Logging in with Spotify failed. Please try again."));
    }

    let mut token = response
        .json::<Token>()
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_GATEWAY.as_u16(), e.to_string()))?;
    token.obtained_at = utils::unix_now();

    Ok(token)
}
