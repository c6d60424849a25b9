mod session;

pub use session::PENDING_LOGIN_TTL_SECS;
pub use session::Session;
pub use session::SessionManager;
