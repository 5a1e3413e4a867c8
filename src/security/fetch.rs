//! Outbound HTTP fetch with certificate validation on by default.
//!
//! # Responsibilities
//! - Resolve the effective certificate-validation flag per request
//! - Warn about plaintext `http` URLs without blocking them
//! - Apply the configured deadline unless the request overrides it
//!
//! # Design Decisions
//! - Two pooled `reqwest` clients are built up front, one validating and one
//!   not; a request picks one, nothing is rebuilt per call
//! - Only `http` and `https` are fetchable

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Method;
use thiserror::Error;
use url::Url;

use crate::config::FetchConfig;

/// Errors produced by [`FetchClient`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme {0:?}")]
    UnsupportedScheme(String),

    #[error("request to {url} exceeded deadline of {deadline:?}")]
    Deadline { url: String, deadline: Duration },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A single outbound request.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    pub payload: Option<Vec<u8>>,
    pub deadline: Option<Duration>,
    /// `None` means "use the client default".
    pub validate_certificate: Option<bool>,
}

impl FetchRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HeaderMap::new(),
            payload: None,
            deadline: None,
            validate_certificate: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self::new(Method::POST, url).payload(payload)
    }

    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn validate_certificate(mut self, validate: bool) -> Self {
        self.validate_certificate = Some(validate);
        self
    }
}

/// Response of a completed fetch.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub content: Vec<u8>,
    pub final_url: String,
}

/// HTTP client with secure defaults.
#[derive(Debug, Clone)]
pub struct FetchClient {
    validating: reqwest::Client,
    non_validating: reqwest::Client,
    validate_by_default: bool,
    default_deadline: Duration,
}

impl FetchClient {
    pub fn from_config(config: &FetchConfig) -> Result<Self, FetchError> {
        let validating = reqwest::Client::builder().build()?;
        let non_validating = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self {
            validating,
            non_validating,
            validate_by_default: config.validate_certificate,
            default_deadline: Duration::from_secs(config.deadline_secs),
        })
    }

    /// Certificate validation used for `request`.
    pub fn effective_validation(&self, request: &FetchRequest) -> bool {
        request.validate_certificate.unwrap_or(self.validate_by_default)
    }

    /// Deadline used for `request`.
    pub fn effective_deadline(&self, request: &FetchRequest) -> Duration {
        request.deadline.unwrap_or(self.default_deadline)
    }

    pub async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, FetchError> {
        let url = Url::parse(&request.url).map_err(|source| FetchError::InvalidUrl {
            url: request.url.clone(),
            source,
        })?;

        match url.scheme() {
            "https" => {}
            "http" => {
                tracing::warn!(
                    url = %url,
                    "Fetching over plaintext http; certificate validation does not apply"
                );
            }
            other => return Err(FetchError::UnsupportedScheme(other.to_string())),
        }

        let validate = self.effective_validation(&request);
        let deadline = self.effective_deadline(&request);
        let client = if validate {
            &self.validating
        } else {
            tracing::debug!(url = %url, "Certificate validation disabled for request");
            &self.non_validating
        };

        let mut builder = client
            .request(request.method, url.clone())
            .headers(request.headers)
            .timeout(deadline);
        if let Some(payload) = request.payload {
            builder = builder.body(payload);
        }

        let response = builder.send().await.map_err(|e| timeout_or(e, &url, deadline))?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let final_url = response.url().to_string();
        let content = response
            .bytes()
            .await
            .map_err(|e| timeout_or(e, &url, deadline))?
            .to_vec();

        tracing::debug!(url = %url, status, bytes = content.len(), "Fetch completed");

        Ok(FetchResponse {
            status,
            headers,
            content,
            final_url,
        })
    }
}

fn timeout_or(error: reqwest::Error, url: &Url, deadline: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Deadline {
            url: url.to_string(),
            deadline,
        }
    } else {
        FetchError::Transport(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FetchClient {
        FetchClient::from_config(&FetchConfig::default()).unwrap()
    }

    #[test]
    fn test_validation_defaults_to_true() {
        let client = client();
        assert!(client.effective_validation(&FetchRequest::get("https://example.com")));
    }

    #[test]
    fn test_explicit_flag_wins() {
        let client = client();
        let request = FetchRequest::get("https://example.com").validate_certificate(false);
        assert!(!client.effective_validation(&request));
    }

    #[test]
    fn test_deadline_override() {
        let client = client();
        let request = FetchRequest::get("https://example.com");
        assert_eq!(client.effective_deadline(&request), Duration::from_secs(5));

        let request = request.deadline(Duration::from_millis(250));
        assert_eq!(client.effective_deadline(&request), Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_rejected() {
        let err = client()
            .fetch(FetchRequest::get("ftp://example.com/file"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedScheme(s) if s == "ftp"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let err = client().fetch(FetchRequest::get("not a url")).await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
