use std::{collections::HashMap, time::Duration};

use httpmock::prelude::*;
use serde_json::json;
use tempolist::{
    config::Config,
    error::GenerateError,
    generator::{PlaylistGenerator, Stage},
    spotify,
};

const TOKEN: &str = "test-access-token";
const PLAYLIST_URL: &str = "https://open.spotify.com/playlist/3cEYpjA9oz9GiPac4AsH4n";

fn test_config(server: &MockServer) -> Config {
    Config::new("client-id", "client-secret", "http://127.0.0.1:8888/callback")
        .with_api_url(server.base_url())
}

fn dance_pop_form() -> HashMap<String, String> {
    [
        ("genre", "Dance Pop"),
        ("min_tempo", "120"),
        ("max_tempo", "120"),
        ("target_tempo", "118"),
        ("max_num_songs", "3"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn track_uris() -> Vec<&'static str> {
    vec![
        "spotify:track:4iV5W9uYEdYUVa79Axb7Rh",
        "spotify:track:1301WleyT98MSxVHPZCA6M",
        "spotify:track:6rqhFgbbKwnb9MLmUQDhG6",
    ]
}

#[tokio::test]
async fn test_all_steps_succeed() {
    let server = MockServer::start_async().await;

    let recommendations = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/recommendations")
                .header("authorization", format!("Bearer {}", TOKEN))
                .query_param("seed_genres", "dancepop")
                .query_param("min_tempo", "119")
                .query_param("max_tempo", "120")
                .query_param("target_tempo", "118")
                .query_param("limit", "3");
            then.status(200).json_body(json!({
                "tracks": track_uris().iter().map(|uri| json!({ "uri": uri })).collect::<Vec<_>>()
            }));
        })
        .await;

    let me = server
        .mock_async(|when, then| {
            when.method(GET).path("/me");
            then.status(200)
                .json_body(json!({ "id": "wizzler", "display_name": "Wizzler" }));
        })
        .await;

    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/users/wizzler/playlists")
                .json_body_partial(r#"{ "public": false }"#);
            then.status(201).json_body(json!({
                "id": "3cEYpjA9oz9GiPac4AsH4n",
                "external_urls": { "spotify": PLAYLIST_URL }
            }));
        })
        .await;

    let add_tracks = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/playlists/3cEYpjA9oz9GiPac4AsH4n/tracks")
                .json_body(json!({ "uris": track_uris() }));
            then.status(201)
                .json_body(json!({ "snapshot_id": "JbtmHBDBAYu3/bt8BOXKjzKx3i0b6LCa" }));
        })
        .await;

    let config = test_config(&server);
    let http = spotify::http_client().unwrap();
    let mut generator = PlaylistGenerator::new(&config, &http, TOKEN);
    let url = generator.run(&dance_pop_form()).await.unwrap();

    assert_eq!(url, PLAYLIST_URL);
    assert_eq!(generator.stage(), Stage::Done);
    assert_eq!(generator.failed_during(), None);

    recommendations.assert_async().await;
    me.assert_async().await;
    create.assert_async().await;
    add_tracks.assert_async().await;
}

#[tokio::test]
async fn test_playlist_name_and_description() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/recommendations");
            then.status(200)
                .json_body(json!({ "tracks": [{ "uri": "spotify:track:1" }] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/me");
            then.status(200).json_body(json!({ "id": "wizzler" }));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/users/wizzler/playlists").json_body(json!({
                "name": "Generated Playlist: dancepop - Tempo 118 BPM",
                "description": "A dancepop playlist with songs between 119 and 120 BPM",
                "public": false
            }));
            then.status(201).json_body(json!({
                "id": "abc",
                "external_urls": { "spotify": PLAYLIST_URL }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/playlists/abc/tracks");
            then.status(201).json_body(json!({ "snapshot_id": "s" }));
        })
        .await;

    let config = test_config(&server);
    let http = spotify::http_client().unwrap();
    let mut generator = PlaylistGenerator::new(&config, &http, TOKEN);
    generator.run(&dance_pop_form()).await.unwrap();

    create.assert_async().await;
}

#[tokio::test]
async fn test_empty_recommendations_fail_before_playlist_creation() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/recommendations");
            then.status(200).json_body(json!({ "tracks": [], "seeds": [] }));
        })
        .await;
    let me = server
        .mock_async(|when, then| {
            when.method(GET).path("/me");
            then.status(200).json_body(json!({ "id": "wizzler" }));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/users/wizzler/playlists");
            then.status(201);
        })
        .await;

    let config = test_config(&server);
    let http = spotify::http_client().unwrap();
    let mut generator = PlaylistGenerator::new(&config, &http, TOKEN);
    let err = generator.run(&dance_pop_form()).await.unwrap_err();

    match err {
        GenerateError::Api(api) => {
            assert_eq!(api.status_code, 404);
            assert!(api.user_facing_hint.is_some());
        }
        other => panic!("expected api error, got {:?}", other),
    }
    assert_eq!(generator.stage(), Stage::Failed);
    assert_eq!(generator.failed_during(), Some(Stage::FetchingRecommendations));

    me.assert_hits_async(0).await;
    create.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_forbidden_playlist_creation_skips_track_insertion() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/recommendations");
            then.status(200)
                .json_body(json!({ "tracks": [{ "uri": "spotify:track:1" }] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/me");
            then.status(200).json_body(json!({ "id": "wizzler" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/users/wizzler/playlists");
            then.status(403).json_body(json!({
                "error": { "status": 403, "message": "Insufficient client scope" }
            }));
        })
        .await;
    let add_tracks = server
        .mock_async(|when, then| {
            when.method(POST).path_contains("/tracks");
            then.status(201);
        })
        .await;

    let config = test_config(&server);
    let http = spotify::http_client().unwrap();
    let mut generator = PlaylistGenerator::new(&config, &http, TOKEN);
    let err = generator.run(&dance_pop_form()).await.unwrap_err();

    match err {
        GenerateError::Api(api) => {
            assert_eq!(api.status_code, 403);
            assert_eq!(api.message, "Insufficient client scope");
        }
        other => panic!("expected api error, got {:?}", other),
    }
    assert_eq!(generator.failed_during(), Some(Stage::CreatingPlaylist));
    add_tracks.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_failed_identity_lookup_is_reported_while_creating() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/recommendations");
            then.status(200)
                .json_body(json!({ "tracks": [{ "uri": "spotify:track:1" }] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/me");
            then.status(401).json_body(json!({
                "error": { "status": 401, "message": "The access token expired" }
            }));
        })
        .await;

    let config = test_config(&server);
    let http = spotify::http_client().unwrap();
    let mut generator = PlaylistGenerator::new(&config, &http, TOKEN);
    let err = generator.run(&dance_pop_form()).await.unwrap_err();

    assert_eq!(err.status_code(), 401);
    assert_eq!(err.message(), "The access token expired");
    assert!(err.hint().is_some());
    assert_eq!(generator.failed_during(), Some(Stage::CreatingPlaylist));
}

#[tokio::test]
async fn test_track_insertion_failure_leaves_playlist() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/recommendations");
            then.status(200)
                .json_body(json!({ "tracks": [{ "uri": "spotify:track:1" }] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/me");
            then.status(200).json_body(json!({ "id": "wizzler" }));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/users/wizzler/playlists");
            then.status(201).json_body(json!({
                "id": "abc",
                "external_urls": { "spotify": PLAYLIST_URL }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/playlists/abc/tracks");
            then.status(500).body("upstream exploded");
        })
        .await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE);
            then.status(200);
        })
        .await;

    let config = test_config(&server);
    let http = spotify::http_client().unwrap();
    let mut generator = PlaylistGenerator::new(&config, &http, TOKEN);
    let err = generator.run(&dance_pop_form()).await.unwrap_err();

    // no structured body, so the status line is used
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.message(), "Internal Server Error");
    assert_eq!(generator.failed_during(), Some(Stage::Populating));

    create.assert_async().await;
    delete.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_invalid_form_makes_no_calls() {
    let server = MockServer::start_async().await;

    let any = server
        .mock_async(|when, then| {
            when.path_contains("/");
            then.status(200);
        })
        .await;

    let mut form = dance_pop_form();
    form.insert("target_tempo".to_string(), "fast".to_string());

    let config = test_config(&server);
    let http = spotify::http_client().unwrap();
    let mut generator = PlaylistGenerator::new(&config, &http, TOKEN);
    let err = generator.run(&form).await.unwrap_err();

    assert!(matches!(err, GenerateError::Validation(_)));
    assert_eq!(err.status_code(), 400);
    assert_eq!(generator.failed_during(), Some(Stage::Normalizing));
    any.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_bad_seed_genre_gets_hint() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/recommendations");
            then.status(400).json_body(json!({
                "error": { "status": 400, "message": "invalid request" }
            }));
        })
        .await;

    let config = test_config(&server);
    let http = spotify::http_client().unwrap();
    let mut generator = PlaylistGenerator::new(&config, &http, TOKEN);
    let err = generator.run(&dance_pop_form()).await.unwrap_err();

    assert_eq!(err.status_code(), 400);
    assert_eq!(err.message(), "invalid request");
    assert!(err.hint().unwrap().contains("genre"));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(GET).path("/recommendations");
            then.status(200)
                .delay(Duration::from_secs(7))
                .json_body(json!({ "tracks": [{ "uri": "spotify:track:1" }] }));
        })
        .await;

    let config = test_config(&server);
    let http = spotify::http_client().unwrap();
    let mut generator = PlaylistGenerator::new(&config, &http, TOKEN);
    let err = generator.run(&dance_pop_form()).await.unwrap_err();

    assert_eq!(err.status_code(), 504);
    assert_eq!(generator.stage(), Stage::Failed);
    assert!(generator.stage().is_terminal());
}

#[tokio::test]
async fn test_shared_client_serves_consecutive_runs() {
    let server = MockServer::start_async().await;

    let recommendations = server
        .mock_async(|when, then| {
            when.method(GET).path("/recommendations");
            then.status(200)
                .json_body(json!({ "tracks": [{ "uri": "spotify:track:1" }] }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/me");
            then.status(200).json_body(json!({ "id": "wizzler" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/users/wizzler/playlists");
            then.status(201).json_body(json!({
                "id": "abc",
                "external_urls": { "spotify": PLAYLIST_URL }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/playlists/abc/tracks");
            then.status(201).json_body(json!({ "snapshot_id": "s" }));
        })
        .await;

    let config = test_config(&server);
    let http = spotify::http_client().unwrap();
    for _ in 0..2 {
        let mut generator = PlaylistGenerator::new(&config, &http, TOKEN);
        assert_eq!(generator.run(&dance_pop_form()).await.unwrap(), PLAYLIST_URL);
    }

    recommendations.assert_hits_async(2).await;
}
