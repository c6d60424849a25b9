//! # Playlist Generator
//!
//! Sequences one form submission into a finished playlist:
//!
//! ```text
//! Normalizing
//!     ↓
//! FetchingRecommendations   GET  /recommendations
//!     ↓
//! CreatingPlaylist          GET  /me, POST /users/{id}/playlists
//!     ↓
//! Populating                POST /playlists/{id}/tracks
//!     ↓
//! Done  → playlist URL
//! ```
//!
//! Every step depends on the previous one, so the calls run strictly one
//! after another. The first failing step moves the generator to
//! [`Stage::Failed`] and its error is returned as is: there are no retries and
//! steps that already succeeded are not undone. In particular a playlist
//! created before track insertion fails stays behind, empty.

use std::{collections::HashMap, fmt};

use reqwest::Client;

use crate::{
    config::Config,
    error::GenerateError,
    info,
    spotify::{playlist, recommendations},
    success, warning,
};

mod params;

pub use params::{
    FIELD_GENRE, FIELD_MAX_NUM_SONGS, FIELD_MAX_TEMPO, FIELD_MIN_TEMPO, FIELD_TARGET_TEMPO,
    normalize, normalize_genre, normalize_tempo_window,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Normalizing,
    FetchingRecommendations,
    CreatingPlaylist,
    Populating,
    Done,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Normalizing => "normalizing input",
            Stage::FetchingRecommendations => "fetching recommendations",
            Stage::CreatingPlaylist => "creating playlist",
            Stage::Populating => "adding tracks",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Runs the generation sequence for one user with one bearer token.
pub struct PlaylistGenerator<'a> {
    config: &'a Config,
    http: &'a Client,
    token: &'a str,
    stage: Stage,
    failed_during: Option<Stage>,
}

impl<'a> PlaylistGenerator<'a> {
    pub fn new(config: &'a Config, http: &'a Client, token: &'a str) -> Self {
        Self {
            config,
            http,
            token,
            stage: Stage::Normalizing,
            failed_during: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The step that was running when the generator failed.
    pub fn failed_during(&self) -> Option<Stage> {
        self.failed_during
    }

    /// Generates a playlist from raw form fields.
    ///
    /// # Returns
    ///
    /// The playlist's Spotify URL exactly as the creation response reported
    /// it, or the error of the first step that failed.
    pub async fn run(&mut self, form: &HashMap<String, String>) -> Result<String, GenerateError> {
        self.stage = Stage::Normalizing;
        self.failed_during = None;

        match self.execute(form).await {
            Ok(url) => {
                self.stage = Stage::Done;
                success!("Playlist ready: {}", url);
                Ok(url)
            }
            Err(e) => {
                warning!("Playlist generation failed while {}: {}", self.stage, e);
                self.failed_during = Some(self.stage);
                self.stage = Stage::Failed;
                Err(e)
            }
        }
    }

    async fn execute(&mut self, form: &HashMap<String, String>) -> Result<String, GenerateError> {
        let request = normalize(form)?;

        self.advance(Stage::FetchingRecommendations);
        let uris =
            recommendations::get_recommendations(self.config, self.http, self.token, &request)
                .await?;
        info!("Received {} recommendations for '{}'", uris.len(), request.genre);

        self.advance(Stage::CreatingPlaylist);
        let created = playlist::create(
            self.config,
            self.http,
            self.token,
            &request.genre,
            request.target_tempo,
            &request.tempo_window_label(),
        )
        .await?;

        self.advance(Stage::Populating);
        playlist::add_tracks(self.config, self.http, self.token, &uris, &created).await?;

        Ok(created.public_url)
    }

    fn advance(&mut self, next: Stage) {
        info!("{}...", capitalized(next));
        self.stage = next;
    }
}

fn capitalized(stage: Stage) -> String {
    crate::utils::capitalize(&stage.to_string())
}
