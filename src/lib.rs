//! tempolist library
//!
//! A small web application that logs a user in with Spotify, takes genre and
//! tempo preferences from a form, asks Spotify for recommendations and saves
//! them as a new private playlist.
//!
//! # Modules
//!
//! - `api` - HTTP handlers and pages of the web app
//! - `config` - Configuration loaded once from the environment
//! - `error` - Validation and Spotify API error types
//! - `generator` - Input normalization and the generation sequence
//! - `management` - In-memory session store
//! - `server` - Router setup and server startup
//! - `spotify` - Spotify Web API client calls
//! - `types` - Data structures and wire types
//! - `utils` - Small helpers (random ids, cookies, HTML escaping)
//!
//! # Example
//!
//! ```
//! use tempolist::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> tempolist::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use tempolist::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line prefixed with a blue `o`.
///
/// ```
/// info!("Listening on http://{}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line prefixed with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line prefixed with a red `!` and exits with code 1.
///
/// Only for failures during startup. Request handlers report errors to the
/// user and log them with [`warning!`] instead.
///
/// ```
/// error!("Cannot load configuration. Err: {}", e);
/// // never returns
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line prefixed with a yellow `!`.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
