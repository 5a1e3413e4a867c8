//! Session-backed CSRF check.

use crate::checks::CheckMessage;
use crate::config::schema::SESSION_CSRF_MIDDLEWARE;
use crate::config::AppConfig;

/// `hardened.E001`: CSRF tokens must live in the session.
///
/// Satisfied by `csrf.use_sessions` or by the session CSRF layer being
/// listed in `csrf.middleware`.
pub fn check_session_csrf_enabled(config: &AppConfig) -> Vec<CheckMessage> {
    if config.csrf.use_sessions {
        return Vec::new();
    }

    if config
        .csrf
        .middleware
        .iter()
        .any(|m| m == SESSION_CSRF_MIDDLEWARE)
    {
        return Vec::new();
    }

    vec![CheckMessage::error(
        "hardened.E001",
        "SESSION_CSRF_DISABLED",
        format!(
            "Set csrf.use_sessions = true or add '{}' to csrf.middleware",
            SESSION_CSRF_MIDDLEWARE
        ),
    )]
}
