//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the upstream data service
pub const DEFAULT_BASE_URL: &str = "https://60s.viki.moe";

/// Path prefix shared by every catalogued endpoint
pub const API_PREFIX: &str = "/v2";

/// Application name
pub const APP_NAME: &str = "Minuteman TUI";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
