//! HTTP integration points.
//!
//! # Data Flow
//! ```text
//! Application builds its axum::Router
//!     → .layer(SecureDefaultsLayer::new(&config)?)   (installs once, then absent)
//!     → .layer(from_fn(request_storage_middleware))  (per-request task-local)
//!     → handlers
//! ```

pub mod middleware;

pub use middleware::{current_request, request_storage_middleware, RequestInfo, SecureDefaultsLayer};
