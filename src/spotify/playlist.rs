use reqwest::{Client, StatusCode};

use crate::{
    config::Config,
    error::ApiError,
    spotify::{expect_created, user},
    types::{AddTrackToPlaylistRequest, CreatePlaylistRequest, CreatePlaylistResponse, Playlist},
};

/// Creates a private playlist for the current user.
///
/// Resolves the user first, then posts to `/users/{user_id}/playlists`. The
/// name carries the genre and target tempo, the description the tempo window.
/// Anything but `201 Created` is an error.
///
/// # Arguments
///
/// * `genre` - normalized seed genre
/// * `target_tempo` - BPM the recommendations were centered on
/// * `tempo_window` - readable window label, see
///   [`RecommendationRequest::tempo_window_label`](crate::types::RecommendationRequest::tempo_window_label)
pub async fn create(
    config: &Config,
    http: &Client,
    token: &str,
    genre: &str,
    target_tempo: i32,
    tempo_window: &str,
) -> Result<Playlist, ApiError> {
    let user = user::get_current_user(config, http, token).await?;

    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = config.api_url,
        user_id = user.id
    );

    let body = CreatePlaylistRequest {
        name: format!("Generated Playlist: {} - Tempo {} BPM", genre, target_tempo),
        description: format!("A {} playlist with songs {}", genre, tempo_window),
        public: false,
    };

    let response = http
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .map_err(|e| ApiError::from_transport(&e))?;

    let created = expect_created(response)
        .await?
        .json::<CreatePlaylistResponse>()
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_GATEWAY.as_u16(), e.to_string()))?;

    Ok(Playlist {
        id: created.id,
        public_url: created.external_urls.spotify,
    })
}

/// Appends `uris` to `playlist` in the given order with a single request.
///
/// Anything but `201 Created` is an error. Nothing is undone on failure.
pub async fn add_tracks(
    config: &Config,
    http: &Client,
    token: &str,
    uris: &[String],
    playlist: &Playlist,
) -> Result<(), ApiError> {
    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks",
        uri = config.api_url,
        playlist_id = playlist.id
    );

    let body = AddTrackToPlaylistRequest {
        uris: uris.to_vec(),
    };

    let response = http
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .map_err(|e| ApiError::from_transport(&e))?;

    expect_created(response).await?;
    Ok(())
}
