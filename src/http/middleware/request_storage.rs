//! Request storage middleware.
//!
//! Makes the current request's metadata reachable from code that is not
//! handed the request, e.g. model hooks deep inside a handler.
//!
//! # Design Decisions
//! - Stored in a tokio task-local, scoped to the rest of the request
//! - Nothing outlives the request: the scope ends when the response is built
//!   or the handler future is dropped
//! - Tasks spawned from a handler do not inherit the request

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, Uri},
    middleware::Next,
    response::Response,
};

tokio::task_local! {
    static CURRENT_REQUEST: RequestInfo;
}

/// Metadata of the request being served.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl RequestInfo {
    fn from_request(req: &Request<Body>) -> Self {
        Self {
            method: req.method().clone(),
            uri: req.uri().clone(),
            headers: req.headers().clone(),
        }
    }
}

pub async fn request_storage_middleware(req: Request<Body>, next: Next) -> Response {
    let info = RequestInfo::from_request(&req);
    CURRENT_REQUEST.scope(info, next.run(req)).await
}

/// The request currently being served on this task, if any.
pub fn current_request() -> Option<RequestInfo> {
    CURRENT_REQUEST.try_with(Clone::clone).ok()
}
