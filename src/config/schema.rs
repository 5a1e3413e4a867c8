//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the add-on.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name under which the session-backed CSRF layer appears in `csrf.middleware`.
pub const SESSION_CSRF_MIDDLEWARE: &str = "session_csrf";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Outbound HTTP fetch defaults.
    pub fetch: FetchConfig,

    /// YAML loading defaults.
    pub yaml: YamlConfig,

    /// JSON encoding defaults.
    pub json: JsonConfig,

    /// CSRF protection settings inspected by the system checks.
    pub csrf: CsrfConfig,

    /// Content-Security-Policy settings inspected by the system checks.
    pub csp: CspConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// URL route table reported by `show-urls`.
    pub routes: Vec<RouteConfig>,
}

/// Outbound HTTP fetch configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    /// Validate server certificates when a request does not say otherwise.
    pub validate_certificate: bool,

    /// Default request deadline in seconds.
    pub deadline_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            validate_certificate: true,
            deadline_secs: 5,
        }
    }
}

/// YAML loading configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct YamlConfig {
    /// Accept explicitly tagged nodes (`!tag value`).
    pub allow_tags: bool,
}

/// JSON encoding configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct JsonConfig {
    /// Escape `<`, `>` and `&` inside encoded strings.
    pub escape_html: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { escape_html: true }
    }
}

/// CSRF configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct CsrfConfig {
    /// Store the CSRF token in the session instead of a cookie.
    pub use_sessions: bool,

    /// Names of the middleware installed in front of the application.
    pub middleware: Vec<String>,
}

/// Content-Security-Policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct CspConfig {
    /// Send the policy as `Content-Security-Policy-Report-Only`.
    pub report_only: bool,

    /// Source lists keyed by directive (e.g. `script-src`).
    pub sources: BTreeMap<String, Vec<String>>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// One entry of the URL route table.
///
/// An entry is either a leaf (`view` set) or an include (`include` non-empty)
/// whose children are matched below `pattern`.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct RouteConfig {
    /// Regular expression fragment matched by this entry.
    pub pattern: String,

    /// Dotted identifier of the view handling a leaf entry.
    #[serde(default)]
    pub view: Option<String>,

    /// URL name used for reversing.
    #[serde(default)]
    pub name: Option<String>,

    /// Decorators applied to the view, in application order.
    #[serde(default)]
    pub decorators: Vec<String>,

    /// Namespace applied to the names of included routes.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Child routes of an include.
    #[serde(default)]
    pub include: Vec<RouteConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_secure() {
        let config = AppConfig::default();
        assert!(config.fetch.validate_certificate);
        assert!(config.json.escape_html);
        assert!(!config.yaml.allow_tags);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [csrf]
            use_sessions = true

            [[routes]]
            pattern = "^a/$"
            view = "app.views.a"
            decorators = ["login_required"]
            "#,
        )
        .unwrap();

        assert!(config.csrf.use_sessions);
        assert!(config.fetch.validate_certificate);
        assert_eq!(config.fetch.deadline_secs, 5);
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].decorators, vec!["login_required"]);
        assert!(config.routes[0].include.is_empty());
    }
}
