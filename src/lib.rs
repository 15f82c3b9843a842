//! # Minuteman TUI
//!
//! A terminal explorer for the "60s" catalogue of third-party read-only
//! data endpoints (news digests, hot-topic rankings, translation, hashing,
//! weather, and friends).
//!
//! ## Features
//! - Static catalogue of ~30 endpoints with declared parameters and examples
//! - Parameter form with live URL preview and example auto-fill
//! - One GET per send; status, headers, and JSON/text body inspection
//! - Share the probe as a plain URL or curl one-liner
//! - Session probe log
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod query;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use catalog::{lookup, Category, EndpointDescriptor, CATALOG};
pub use config::Config;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{Body, Outcome, ProbeRecord, ResponseEnvelope};
pub use network::NetworkActor;
pub use query::{build_query, build_url};
