//! Operator-facing text shown in banners, the history list and the submit control.

pub const CONFIG_MISSING: &str =
    "API URL is not configured. Please set DASHBOARD_API_URL in environment variables.";
pub const HISTORY_UNAVAILABLE: &str =
    "Could not load generation history. The backend may be unavailable.";
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";
pub const GENERATION_SUCCEEDED: &str = "Content generated successfully! Refreshing history...";
pub const INVALID_URL: &str = "Please enter a valid URL.";
pub const NO_HISTORY: &str = "No history found.";
pub const SUBMIT_IDLE: &str = "Generate Content";
pub const SUBMIT_BUSY: &str = "Generating...";
