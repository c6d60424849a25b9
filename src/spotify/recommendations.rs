use reqwest::{Client, StatusCode};

use crate::{
    config::Config,
    error::ApiError,
    spotify::api_error_from_response,
    types::{RecommendationRequest, RecommendationsResponse},
};

const EMPTY_RESULT_HINT: &str =
    "No songs matched. Try a wider tempo window or a different genre.";
const BAD_SEED_HINT: &str = "Check that the genre is one of Spotify's available seed genres.";

/// Fetches recommended tracks for a normalized request.
///
/// Issues one `GET /recommendations` with the request's query parameters
/// (unset tempo bounds are not sent). An empty track list is reported as a
/// 404 [`ApiError`] because a playlist without songs counts as a failed run.
///
/// # Returns
///
/// The track URIs in the order Spotify ranked them.
pub async fn get_recommendations(
    config: &Config,
    http: &Client,
    token: &str,
    request: &RecommendationRequest,
) -> Result<Vec<String>, ApiError> {
    let api_url = format!("{uri}/recommendations", uri = config.api_url);

    let response = http
        .get(&api_url)
        .bearer_auth(token)
        .query(&request.query_params())
        .send()
        .await
        .map_err(|e| ApiError::from_transport(&e))?;

    if !response.status().is_success() {
        let error = api_error_from_response(response).await;
        let bad_seed = error.status_code == StatusCode::BAD_REQUEST.as_u16();
        if bad_seed && error.user_facing_hint.is_none() {
            return Err(error.with_hint(BAD_SEED_HINT));
        }
        return Err(error);
    }

    let json = response
        .json::<RecommendationsResponse>()
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_GATEWAY.as_u16(), e.to_string()))?;

    if json.tracks.is_empty() {
        return Err(ApiError::new(
            StatusCode::NOT_FOUND.as_u16(),
            format!("no recommendations found for genre '{}'", request.genre),
        )
        .with_hint(EMPTY_RESULT_HINT));
    }

    Ok(json.tracks.into_iter().map(|t| t.uri).collect())
}
