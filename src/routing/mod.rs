//! Routing subsystem: route table and route report.
//!
//! # Data Flow
//! ```text
//! [[routes]] config / builder calls
//!     → table.rs (ordered tree of patterns and includes)
//!     → report.rs (depth-first walk, one row per leaf)
//!         → pattern.rs (join fragments, simplify for display)
//!     → render_text / render_json
//! ```
//!
//! # Design Decisions
//! - The table is read-only; nothing here dispatches requests
//! - Deterministic: rows follow registration order
//! - Decorators are metadata recorded at registration, not discovered

pub mod pattern;
pub mod report;
pub mod table;

pub use report::{render_json, render_text, ReportRow, RouteReport};
pub use table::{RouteTable, UrlInclude, UrlNode, UrlPattern, View};
