//! Security subsystem: secure defaults for shared client facilities.
//!
//! # Data Flow
//! ```text
//! AppConfig (fetch, yaml, json sections)
//!     → defaults.rs (build once, publish process-wide)
//!         → fetch.rs (certificate validation on unless a request opts out)
//!         → yaml.rs  (tagged nodes refused)
//!         → json.rs  (<, >, & escaped)
//! ```
//!
//! # Design Decisions
//! - Configured instances instead of mutated library globals
//! - Install is idempotent; there is no uninstall

pub mod defaults;
pub mod fetch;
pub mod json;
pub mod yaml;

pub use defaults::{install, installed, InstallError, SecureDefaults};
pub use fetch::{FetchClient, FetchError, FetchRequest, FetchResponse};
pub use json::{HtmlSafeFormatter, JsonEncoder, JsonError};
pub use yaml::{YamlError, YamlLoader};
