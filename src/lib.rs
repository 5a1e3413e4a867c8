//! Secure defaults and route reporting for web applications.

pub mod checks;
pub mod config;
pub mod http;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::schema::AppConfig;
pub use http::SecureDefaultsLayer;
pub use routing::{RouteReport, RouteTable, View};
pub use security::SecureDefaults;
