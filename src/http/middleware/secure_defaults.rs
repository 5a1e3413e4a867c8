//! Layer that installs the secure defaults at startup.
//!
//! The work happens when the layer is constructed, which is when the
//! application builds its middleware stack. Applying the layer hands back the
//! inner service untouched, so no per-request code from this module runs.

use tower::Layer;

use crate::config::AppConfig;
use crate::security::{self, InstallError, SecureDefaults};

/// Installs [`SecureDefaults`] and then stays out of the request path.
#[derive(Debug, Clone, Copy)]
pub struct SecureDefaultsLayer {
    defaults: &'static SecureDefaults,
}

impl SecureDefaultsLayer {
    pub fn new(config: &AppConfig) -> Result<Self, InstallError> {
        let defaults = security::install(config)?;
        Ok(Self { defaults })
    }

    /// The defaults this layer installed (or found installed).
    pub fn defaults(&self) -> &'static SecureDefaults {
        self.defaults
    }
}

impl<S> Layer<S> for SecureDefaultsLayer {
    type Service = S;

    fn layer(&self, inner: S) -> Self::Service {
        tracing::debug!("Secure defaults in place; layer removed from the request chain");
        inner
    }
}
