//! # Price Tracker Widget
//!
//! Polls a backend price endpoint on a fixed timer and renders the latest
//! cryptocurrency snapshot (price, 24h change, market cap, volume, supply,
//! all-time high/low) into a display surface, with manual refresh,
//! notifications and tooltips.
//!
//! ## Usage
//!
//! The page bootstrap owns the controller and injects the surface it renders
//! into:
//!
//! ```no_run
//! use price_tracker::{InputEvent, MemoryDisplay, PriceTrackerController, TrackerConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let display = Arc::new(MemoryDisplay::with_all_slots());
//! let controller = PriceTrackerController::new(TrackerConfig::default(), display.clone())?;
//!
//! // One immediate refresh, then every 30 seconds
//! let input = controller.initialize();
//!
//! // Manual refresh, same as the button or Ctrl+R
//! input.send(InputEvent::RefreshClicked)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! PriceTrackerController::initialize()
//!     ↓
//! Timer (every 30s) / InputEvent (Ctrl+R, refresh button)
//!     ↓
//! PriceSource (HTTP GET, JSON)
//!     ↓
//! SnapshotPayload::validate()
//!     ↓
//! RenderedSnapshot → DisplaySurface slots
//! ```
//!
//! ## Error Handling
//!
//! Refresh failures never stop the tracker. Scheduled failures are only
//! logged; manual ones also show an error notification. Callers that drive
//! refreshes directly can inspect the result:
//!
//! ```no_run
//! # use price_tracker::{PriceTrackerController, RefreshError};
//! # async fn example(controller: PriceTrackerController) {
//! match controller.fetch_and_render(true).await {
//!     Ok(()) => {}
//!     Err(RefreshError::DataUnavailable(msg)) => eprintln!("Backend error: {}", msg),
//!     Err(RefreshError::TransportFailure(msg)) => eprintln!("Request failed: {}", msg),
//! }
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod controller;
pub mod display;
pub mod error;
pub mod format;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use config::TrackerConfig;
pub use controller::PriceTrackerController;
pub use display::{ChartCapability, DisplaySurface, MemoryDisplay};
pub use error::{ConfigError, RefreshError, SourceError};
pub use source::{HttpPriceSource, PriceSource};
pub use types::{
    Anchor, ChangeTone, InputEvent, NotificationKind, PriceSnapshot, Slot, SnapshotPayload,
};
