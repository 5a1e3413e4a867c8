//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every route entry is either a leaf or an include
//! - Reject empty patterns and decorator names
//! - Compile every route pattern
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use regex::Regex;
use thiserror::Error;

use crate::config::schema::{AppConfig, RouteConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A route (other than a root include) has an empty pattern.
    #[error("route {location} has an empty pattern")]
    EmptyPattern { location: String },

    /// A route pattern is not a valid regular expression.
    #[error("route {location} has an invalid pattern: {message}")]
    InvalidPattern { location: String, message: String },

    /// A route names a view and also includes children.
    #[error("route {location} has both a view and an include")]
    ViewAndInclude { location: String },

    /// A route names neither a view nor children.
    #[error("route {location} has neither a view nor an include")]
    NoTarget { location: String },

    /// A decorator name is blank.
    #[error("route {location} lists an empty decorator name")]
    EmptyDecorator { location: String },

    /// The fetch deadline is zero.
    #[error("fetch.deadline_secs must be greater than zero")]
    ZeroDeadline,
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.fetch.deadline_secs == 0 {
        errors.push(ValidationError::ZeroDeadline);
    }

    for (i, route) in config.routes.iter().enumerate() {
        validate_route(route, &format!("routes[{}]", i), &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(route: &RouteConfig, location: &str, errors: &mut Vec<ValidationError>) {
    // An include may legitimately match the empty prefix.
    if route.pattern.is_empty() && route.include.is_empty() {
        errors.push(ValidationError::EmptyPattern {
            location: location.to_string(),
        });
    } else if let Err(e) = Regex::new(&route.pattern) {
        errors.push(ValidationError::InvalidPattern {
            location: location.to_string(),
            message: e.to_string(),
        });
    }

    match (route.view.is_some(), !route.include.is_empty()) {
        (true, true) => errors.push(ValidationError::ViewAndInclude {
            location: location.to_string(),
        }),
        (false, false) => errors.push(ValidationError::NoTarget {
            location: location.to_string(),
        }),
        _ => {}
    }

    if route.decorators.iter().any(|d| d.trim().is_empty()) {
        errors.push(ValidationError::EmptyDecorator {
            location: location.to_string(),
        });
    }

    for (i, child) in route.include.iter().enumerate() {
        validate_route(child, &format!("{}.include[{}]", location, i), errors);
    }
}
