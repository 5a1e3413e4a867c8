//! Content-Security-Policy checks.

use crate::checks::CheckMessage;
use crate::config::AppConfig;

/// Source directives inspected by [`check_csp_sources_not_unsafe`], in id order.
pub const CSP_SOURCE_DIRECTIVES: [&str; 9] = [
    "default-src",
    "script-src",
    "img-src",
    "object-src",
    "media-src",
    "frame-src",
    "font-src",
    "style-src",
    "connect-src",
];

const UNSAFE_SOURCES: [&str; 2] = ["'unsafe-inline'", "'unsafe-eval'"];

/// `hardened.E002`: the policy must be enforced, not report-only.
pub fn check_csp_is_not_report_only(config: &AppConfig) -> Vec<CheckMessage> {
    if !config.csp.report_only {
        return Vec::new();
    }
    vec![CheckMessage::error(
        "hardened.E002",
        "CSP_REPORT_ONLY_ENABLED",
        "Set csp.report_only to false",
    )]
}

/// `hardened.E1NN`: no source directive may allow unsafe inline code or eval.
pub fn check_csp_sources_not_unsafe(config: &AppConfig) -> Vec<CheckMessage> {
    CSP_SOURCE_DIRECTIVES
        .iter()
        .enumerate()
        .filter(|(_, directive)| {
            config
                .csp
                .sources
                .get(**directive)
                .is_some_and(|sources| sources.iter().any(|s| UNSAFE_SOURCES.contains(&s.as_str())))
        })
        .map(|(index, directive)| {
            CheckMessage::error(
                format!("hardened.E1{:02}", index),
                format!("{}_UNSAFE", directive.replace('-', "_").to_uppercase()),
                "Remove 'unsafe-inline'/'unsafe-eval' from your CSP policies",
            )
        })
        .collect()
}
