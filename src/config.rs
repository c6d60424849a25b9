//! Configuration management for tempolist.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. They are read exactly once at startup
//! into a [`Config`] which is then handed by reference to everything that
//! talks to Spotify; nothing below `main` reads the environment itself.
//!
//! Precedence:
//! 1. Environment variables
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults (optional values only)

use std::{env, fmt, path::PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "playlist-modify-public playlist-modify-private";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

/// Loads environment variables from `tempolist/.env` in the local data
/// directory.
///
/// The directory is created when missing so users know where to put the file.
/// A missing `.env` is not an error: the process environment alone may carry
/// every value.
///
/// - Linux: `~/.local/share/tempolist/.env`
/// - macOS: `~/Library/Application Support/tempolist/.env`
/// - Windows: `%LOCALAPPDATA%/tempolist/.env`
pub async fn load_env() -> Result<(), ConfigError> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tempolist/.env");
    path
}

/// Settings needed to authorize users and call the Spotify Web API.
#[derive(Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_address: String,
}

// The client secret never shows up in logs or panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("api_url", &self.api_url)
            .field("server_address", &self.server_address)
            .finish()
    }
}

impl Config {
    /// Builds a config with the public Spotify endpoints and default scope.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Required
    ///
    /// - `SPOTIFY_API_AUTH_CLIENT_ID`
    /// - `SPOTIFY_API_AUTH_CLIENT_SECRET`
    /// - `SPOTIFY_API_REDIRECT_URI`
    ///
    /// # Optional
    ///
    /// - `SPOTIFY_API_AUTH_SCOPE`
    /// - `SPOTIFY_API_AUTH_URL`
    /// - `SPOTIFY_API_TOKEN_URL`
    /// - `SPOTIFY_API_URL`
    /// - `SERVER_ADDRESS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reads through `lookup`, which keeps
    /// the parsing testable without touching the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };
        let optional = |key: &'static str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            scope: optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            server_address: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn with_server_address(mut self, server_address: impl Into<String>) -> Self {
        self.server_address = server_address.into();
        self
    }
}
