//! Middleware shipped with the add-on.

pub mod request_storage;
pub mod secure_defaults;

pub use request_storage::{current_request, request_storage_middleware, RequestInfo};
pub use secure_defaults::SecureDefaultsLayer;
