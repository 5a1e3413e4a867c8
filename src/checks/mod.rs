//! System checks over the loaded configuration.
//!
//! # Responsibilities
//! - Flag missing session-backed CSRF protection
//! - Flag a report-only or unsafe Content-Security-Policy
//!
//! # Design Decisions
//! - Checks are pure functions of `AppConfig`
//! - Deploy-only checks run when `deploy` is requested
//! - Every message carries a stable id so it can be silenced or grepped for

pub mod csp;
pub mod csrf;

use std::fmt;

use serde::Serialize;

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Warning,
    Error,
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckMessage {
    pub id: String,
    pub level: Level,
    pub message: String,
    pub hint: String,
}

impl CheckMessage {
    pub fn error(id: impl Into<String>, message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level: Level::Error,
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}\n\tHINT: {}", self.id, self.message, self.hint)
    }
}

/// Run every registered check.
pub fn run(config: &AppConfig, deploy: bool) -> Vec<CheckMessage> {
    let mut messages = Vec::new();
    messages.extend(csrf::check_session_csrf_enabled(config));
    messages.extend(csp::check_csp_is_not_report_only(config));
    if deploy {
        messages.extend(csp::check_csp_sources_not_unsafe(config));
    }

    for message in &messages {
        match message.level {
            Level::Error => tracing::error!(id = %message.id, "{}", message.message),
            Level::Warning => tracing::warn!(id = %message.id, "{}", message.message),
        }
    }
    messages
}
