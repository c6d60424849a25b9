use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::{info, types::Token, utils};

/// How long a session may wait for the OAuth callback before it is dropped.
pub const PENDING_LOGIN_TTL_SECS: u64 = 10 * 60;

/// Per-browser state kept between requests.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub oauth_state: Option<String>,
    pub token: Option<Token>,
    pub created_at: u64,
}

impl Session {
    fn new(now: u64) -> Self {
        Self {
            created_at: now,
            ..Self::default()
        }
    }

    /// A logged-in session lives as long as its token, a pending one for
    /// [`PENDING_LOGIN_TTL_SECS`].
    pub fn is_expired_at(&self, now: u64) -> bool {
        match &self.token {
            Some(token) => token.is_expired_at(now),
            None => now >= self.created_at.saturating_add(PENDING_LOGIN_TTL_SECS),
        }
    }
}

/// In-memory session store keyed by the session cookie value.
///
/// Sessions are only created by the login flow and dropped on logout or once
/// expired. Cloning is cheap and shares the underlying map. The lock is only
/// held for the duration of a single read or write, never across a Spotify
/// call.
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of an existing live session, or creates a new empty one.
    ///
    /// Expired sessions are swept first, so the map only ever holds sessions
    /// that are still usable.
    pub async fn ensure(&self, session_id: Option<&str>) -> String {
        let now = utils::unix_now();
        let mut sessions = self.sessions.lock().await;
        sweep(&mut sessions, now);

        if let Some(id) = session_id {
            if sessions.contains_key(id) {
                return id.to_string();
            }
        }

        let id = utils::generate_session_id();
        sessions.insert(id.clone(), Session::new(now));
        id
    }

    /// Bearer token of the session, if the user logged in and the token is
    /// still valid. An expired session is removed on the spot.
    pub async fn access_token(&self, session_id: &str) -> Option<String> {
        let now = utils::unix_now();
        let mut sessions = self.sessions.lock().await;

        if sessions.get(session_id)?.is_expired_at(now) {
            sessions.remove(session_id);
            return None;
        }

        sessions
            .get(session_id)
            .and_then(|s| s.token.as_ref())
            .map(|t| t.access_token.clone())
    }

    pub async fn set_oauth_state(&self, session_id: &str, state: String) {
        let mut sessions = self.sessions.lock().await;
        session_entry(&mut sessions, session_id).oauth_state = Some(state);
    }

    /// Removes and returns the pending OAuth `state`, so it can only be
    /// matched once.
    pub async fn take_oauth_state(&self, session_id: &str) -> Option<String> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .get_mut(session_id)
            .and_then(|s| s.oauth_state.take())
    }

    pub async fn set_token(&self, session_id: &str, token: Token) {
        let mut sessions = self.sessions.lock().await;
        session_entry(&mut sessions, session_id).token = Some(token);
    }

    pub async fn remove(&self, session_id: &str) -> Option<Session> {
        self.sessions.lock().await.remove(session_id)
    }

    /// Drops every session expired at unix time `now` and returns how many
    /// were removed.
    pub async fn purge_expired_at(&self, now: u64) -> usize {
        sweep(&mut *self.sessions.lock().await, now)
    }

    /// Number of sessions currently held.
    pub async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

fn session_entry<'a>(sessions: &'a mut HashMap<String, Session>, id: &str) -> &'a mut Session {
    sessions
        .entry(id.to_string())
        .or_insert_with(|| Session::new(utils::unix_now()))
}

fn sweep(sessions: &mut HashMap<String, Session>, now: u64) -> usize {
    let before = sessions.len();
    sessions.retain(|_, session| !session.is_expired_at(now));

    let removed = before - sessions.len();
    if removed > 0 {
        info!("Dropped {} expired sessions, {} active", removed, sessions.len());
    }
    removed
}
