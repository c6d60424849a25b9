use serde::{Deserialize, Serialize};

/// Seconds before the reported expiry at which a token is already treated
/// as expired, so it does not run out halfway through a generation run.
pub const TOKEN_EXPIRY_MARGIN_SECS: u64 = 60;

/// Access token as returned by the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
    #[serde(skip)]
    pub obtained_at: u64,
}

fn default_expires_in() -> u64 {
    3600
}

impl Token {
    /// Whether the token is (about to be) expired at unix time `now`.
    pub fn is_expired_at(&self, now: u64) -> bool {
        let expires_at = self.obtained_at.saturating_add(self.expires_in);
        now.saturating_add(TOKEN_EXPIRY_MARGIN_SECS) >= expires_at
    }
}

/// Normalized, request-ready parameters for the recommendations endpoint.
///
/// Built by [`crate::generator::normalize`]; the tempo window is already
/// non-empty and ordered when both bounds are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub genre: String,
    pub min_tempo: Option<i32>,
    pub max_tempo: Option<i32>,
    pub target_tempo: i32,
    pub limit: i32,
}

impl RecommendationRequest {
    /// Query parameters for `GET /recommendations`. Unset bounds are left out
    /// entirely.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("seed_genres", self.genre.clone())];
        if let Some(min) = self.min_tempo {
            params.push(("min_tempo", min.to_string()));
        }
        if let Some(max) = self.max_tempo {
            params.push(("max_tempo", max.to_string()));
        }
        params.push(("target_tempo", self.target_tempo.to_string()));
        params.push(("limit", self.limit.to_string()));
        params
    }

    /// Human-readable tempo window, e.g. `between 119 and 120 BPM`.
    pub fn tempo_window_label(&self) -> String {
        match (self.min_tempo, self.max_tempo) {
            (Some(min), Some(max)) => format!("between {} and {} BPM", min, max),
            (Some(min), None) => format!("of at least {} BPM", min),
            (None, Some(max)) => format!("of at most {} BPM", max),
            (None, None) => format!("around {} BPM", self.target_tempo),
        }
    }
}

/// A playlist created during one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub public_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

/// Error envelope used by the Web API: `{"error": {"status": .., "message": ..}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorObject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorObject {
    pub status: u16,
    pub message: String,
}

/// Error body of the accounts service (token endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}
