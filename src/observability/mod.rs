//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → logging.rs (subscriber: EnvFilter + fmt to stderr)
//! ```
//!
//! # Design Decisions
//! - stdout is reserved for command output (reports, fetched bodies)
//! - Log level configurable via config and environment

pub mod logging;
