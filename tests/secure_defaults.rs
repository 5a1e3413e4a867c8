//! Process-wide install of the secure defaults.

use std::collections::BTreeMap;

use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
use tower::{Layer, ServiceExt};

use hardened_defaults::security::{self, FetchRequest, YamlError};
use hardened_defaults::{AppConfig, SecureDefaultsLayer};

#[test]
fn test_install_is_idempotent() {
    let first = security::install(&AppConfig::default()).unwrap();
    let second = security::install(&AppConfig::default()).unwrap();

    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(security::installed().unwrap(), first));
}

#[test]
fn test_first_configuration_wins() {
    let first = security::install(&AppConfig::default()).unwrap();

    let mut relaxed = AppConfig::default();
    relaxed.json.escape_html = false;
    relaxed.fetch.validate_certificate = false;
    let second = security::install(&relaxed).unwrap();

    assert!(std::ptr::eq(first, second));
    assert!(second.json().escapes_html());
    assert!(second
        .fetch()
        .effective_validation(&FetchRequest::get("https://example.com")));
}

#[test]
fn test_installed_defaults_are_secure() {
    let defaults = security::install(&AppConfig::default()).unwrap();

    assert!(defaults
        .fetch()
        .effective_validation(&FetchRequest::get("https://example.com")));

    let loaded: Result<BTreeMap<String, String>, YamlError> = defaults
        .yaml()
        .load("payload: !!python/object/apply:subprocess.check_output [['id']]\n");
    assert!(loaded.is_err());

    let encoded = defaults
        .json()
        .to_string(&serde_json::json!({"a": "<b>&c"}))
        .unwrap();
    assert_eq!(encoded, r#"{"a":"\u003cb\u003e\u0026c"}"#);
}

#[test]
fn test_layer_returns_inner_service() {
    let layer = SecureDefaultsLayer::new(&AppConfig::default()).unwrap();
    assert!(std::ptr::eq(layer.defaults(), security::installed().unwrap()));

    let inner = tower::service_fn(|_: ()| async { Ok::<_, std::convert::Infallible>(7) });
    // The layered service is the inner service type itself.
    let _same: tower::util::ServiceFn<_> = layer.layer(inner);
}

#[tokio::test]
async fn test_layer_is_transparent_in_router() {
    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .layer(SecureDefaultsLayer::new(&AppConfig::default()).unwrap());

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"ok");
}
