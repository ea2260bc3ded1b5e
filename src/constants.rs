//! Constants for the price tracker controller
//!
//! Defaults for the tracker live here. `TrackerConfig::from_env()` can override
//! the endpoint, refresh interval and ticker; the cosmetic timings are fixed.

/// How often the periodic refresh fires (in milliseconds)
pub const REFRESH_INTERVAL_MS: u64 = 30_000;

/// How long a changed slot stays highlighted (in milliseconds)
pub const HIGHLIGHT_DURATION_MS: u64 = 500;

/// How long a notification stays on screen before its exit transition (in milliseconds)
pub const NOTIFICATION_DISPLAY_MS: u64 = 3_000;

/// Length of the notification exit transition (in milliseconds)
pub const NOTIFICATION_EXIT_MS: u64 = 300;

/// How long a stat tooltip stays visible (in milliseconds)
pub const TOOLTIP_DURATION_MS: u64 = 2_000;

/// Vertical distance between a tooltip and the top of its anchor (in pixels)
pub const TOOLTIP_OFFSET_PX: f64 = 30.0;

/// Advisory text shown in stat tooltips
pub const TOOLTIP_TEXT: &str = "Click to see more details";

/// Default price endpoint served by the backend
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:5000/api/bitcoin";

/// Default ticker appended to the circulating supply
pub const DEFAULT_TICKER: &str = "BTC";

/// Notification shown after a successful manual refresh
pub const REFRESH_SUCCESS_MESSAGE: &str = "Data refreshed successfully!";

/// Notification shown after a failed manual refresh
pub const REFRESH_FAILURE_MESSAGE: &str = "Failed to refresh data. Please try again.";

/// Label of the refresh trigger while idle
pub const REFRESH_IDLE_LABEL: &str = "Refresh";

/// Label of the refresh trigger while a manual refresh is in flight
pub const REFRESH_BUSY_LABEL: &str = "Refreshing...";

/// Label written into the change period slot
pub const CHANGE_PERIOD_LABEL: &str = "(24h)";

/// Environment variable overriding the endpoint URL
pub const ENV_ENDPOINT: &str = "PRICE_TRACKER_ENDPOINT";

/// Environment variable overriding the refresh interval (milliseconds)
pub const ENV_REFRESH_MS: &str = "PRICE_TRACKER_REFRESH_MS";

/// Environment variable overriding the ticker symbol
pub const ENV_TICKER: &str = "PRICE_TRACKER_TICKER";

/// User agent for HTTP requests
pub const USER_AGENT: &str = "price-tracker-widget/0.1.0";
