use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};

pub const SESSION_COOKIE: &str = "tempolist_session";

/// Random alphanumeric string, used for session ids and the OAuth `state`.
pub fn generate_random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_session_id() -> String {
    generate_random_string(64)
}

pub fn generate_oauth_state() -> String {
    generate_random_string(32)
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Extracts `name` from a `Cookie` request header value.
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(session_id: &str) -> String {
    format!(
        "{name}={value}; Path=/; HttpOnly; SameSite=Lax",
        name = SESSION_COOKIE,
        value = session_id
    )
}

pub fn expired_session_cookie() -> String {
    format!(
        "{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        name = SESSION_COOKIE
    )
}

/// Current unix time in seconds.
pub fn unix_now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}
