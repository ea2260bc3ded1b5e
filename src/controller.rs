//! Price tracker controller
//!
//! Polls the price source on a fixed timer and on manual request, and writes
//! the formatted snapshot into the display surface.

use crate::{
    config::TrackerConfig,
    constants::{
        HIGHLIGHT_DURATION_MS, NOTIFICATION_DISPLAY_MS, NOTIFICATION_EXIT_MS,
        REFRESH_BUSY_LABEL, REFRESH_FAILURE_MESSAGE, REFRESH_IDLE_LABEL,
        REFRESH_SUCCESS_MESSAGE, TOOLTIP_DURATION_MS, TOOLTIP_OFFSET_PX, TOOLTIP_TEXT,
        CHANGE_PERIOD_LABEL,
    },
    display::{ChartCapability, DisplaySurface},
    error::{RefreshError, SourceError},
    format::RenderedSnapshot,
    source::{HttpPriceSource, PriceSource},
    types::{Anchor, InputEvent, NotificationKind, PriceSnapshot, Slot},
};
use chrono::Local;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use uuid::Uuid;

/// Price tracker controller
///
/// Cheap to clone; clones share the same source, surface and spawned tasks.
/// The page bootstrap owns the controller and hands clones to whatever needs
/// to trigger a refresh. All methods must be called from within a tokio
/// runtime, since cosmetic timers are spawned as tasks.
///
/// # Example
/// ```no_run
/// use price_tracker::{MemoryDisplay, PriceTrackerController, TrackerConfig, InputEvent};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let display = Arc::new(MemoryDisplay::with_all_slots());
/// let controller = PriceTrackerController::new(TrackerConfig::from_env()?, display)?;
///
/// let input = controller.initialize();
/// input.send(InputEvent::KeyDown { ctrl: true, key: 'r' })?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PriceTrackerController {
    config: Arc<TrackerConfig>,
    source: Arc<dyn PriceSource>,
    surface: Arc<dyn DisplaySurface>,
    chart: Option<Arc<dyn ChartCapability>>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl PriceTrackerController {
    /// Creates a controller polling the configured HTTP endpoint
    pub fn new(
        config: TrackerConfig,
        surface: Arc<dyn DisplaySurface>,
    ) -> Result<Self, SourceError> {
        let source = Arc::new(HttpPriceSource::new(config.endpoint_url.clone())?);
        Ok(Self::with_source(config, source, surface))
    }

    /// Creates a controller with a custom price source
    pub fn with_source(
        config: TrackerConfig,
        source: Arc<dyn PriceSource>,
        surface: Arc<dyn DisplaySurface>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            source,
            surface,
            chart: None,
            tasks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Attaches a charting capability that is resized on viewport changes
    pub fn with_chart(mut self, chart: Arc<dyn ChartCapability>) -> Self {
        self.chart = Some(chart);
        self
    }

    pub fn refresh_interval(&self) -> Duration {
        self.config.refresh_interval()
    }

    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }

    /// Starts the tracker
    ///
    /// Kicks off one immediate fetch-and-render, arms the periodic timer and
    /// installs the input listener. Returns the sender the page forwards
    /// [`InputEvent`]s through.
    ///
    /// Call this once. A second call arms a second timer, so every tick then
    /// refreshes twice.
    pub fn initialize(&self) -> mpsc::UnboundedSender<InputEvent> {
        let initial = self.clone();
        tokio::spawn(async move {
            let _ = initial.fetch_and_render(false).await;
        });

        let timer = self.start_timer();

        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        let controller = self.clone();
        let listener = tokio::spawn(async move {
            while let Some(event) = input_rx.recv().await {
                controller.handle_input(event);
            }
        });

        self.track(timer);
        self.track(listener);

        input_tx
    }

    /// Arms the refresh timer; each tick runs as its own task
    fn start_timer(&self) -> JoinHandle<()> {
        let controller = self.clone();
        let period = self.config.refresh_interval();

        tokio::spawn(async move {
            tracing::info!(
                refresh_interval_ms = period.as_millis() as u64,
                source = controller.source_name(),
                "Starting price tracker refresh timer"
            );

            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let cycle = controller.clone();
                tokio::spawn(async move {
                    let _ = cycle.fetch_and_render(false).await;
                });
            }
        })
    }

    fn track(&self, handle: JoinHandle<()>) {
        self.tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(handle);
    }

    /// Stops the timer and the input listener
    ///
    /// Refresh cycles and cosmetic timers already in flight run to completion.
    pub fn shutdown(&self) {
        let handles: Vec<_> = self
            .tasks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .drain(..)
            .collect();

        for handle in handles {
            handle.abort();
        }
        tracing::info!("Price tracker stopped");
    }

    /// Fetches one snapshot and renders it
    ///
    /// Failures never propagate beyond this call's result: they are logged and,
    /// for manual refreshes, surfaced as an error notification. Manual
    /// refreshes disable the refresh trigger until the call settles.
    pub async fn fetch_and_render(&self, is_manual: bool) -> Result<(), RefreshError> {
        let _busy = is_manual.then(|| BusyGuard::engage(self.surface.clone()));

        let outcome = match self.source.fetch_snapshot().await {
            Ok(payload) => payload.validate(),
            Err(e) => Err(RefreshError::from(e)),
        };

        match outcome {
            Ok(snapshot) => {
                tracing::debug!(
                    price_usd = snapshot.price_usd,
                    manual = is_manual,
                    "Rendering price snapshot"
                );
                self.render_snapshot(&snapshot);
                self.update_last_updated();

                if is_manual {
                    self.surface_notification(REFRESH_SUCCESS_MESSAGE, NotificationKind::Success);
                }
                Ok(())
            }
            Err(err) => {
                match (&err, is_manual) {
                    (RefreshError::DataUnavailable(msg), _) => {
                        tracing::error!(error = %msg, manual = is_manual, "Price endpoint returned an error");
                    }
                    (RefreshError::TransportFailure(msg), true) => {
                        tracing::error!(error = %msg, "Failed to refresh price data");
                    }
                    (RefreshError::TransportFailure(msg), false) => {
                        tracing::warn!(error = %msg, "Scheduled price refresh failed");
                    }
                }

                if is_manual {
                    self.surface_notification(REFRESH_FAILURE_MESSAGE, NotificationKind::Error);
                }
                Err(err)
            }
        }
    }

    /// Formats a snapshot and writes it into every present slot
    pub fn render_snapshot(&self, snapshot: &PriceSnapshot) {
        let rendered = RenderedSnapshot::new(snapshot, &self.config.ticker);

        self.update_slot(Slot::CurrentPrice, &rendered.price);
        self.update_slot(Slot::UpdatePrice, &rendered.price);

        if self.surface.slot_text(Slot::ChangeAmount).is_some() {
            self.update_slot(Slot::ChangeAmount, &rendered.change);
            self.surface.set_change_tone(rendered.change_tone);
        }
        self.update_slot(Slot::ChangePeriod, CHANGE_PERIOD_LABEL);
        self.update_slot(Slot::UpdateChange, &rendered.change);

        self.update_slot(Slot::MarketCap, &rendered.market_cap);
        self.update_slot(Slot::Volume24h, &rendered.volume);
        self.update_slot(Slot::UpdateMarketCap, &rendered.market_cap);
        self.update_slot(Slot::UpdateVolume, &rendered.volume);

        self.update_slot(Slot::CirculatingSupply, &rendered.circulating_supply);
        self.update_slot(Slot::Ath, &rendered.ath);
        self.update_slot(Slot::Atl, &rendered.atl);

        // Price slots pulse on every render, changed or not
        self.flash(Slot::CurrentPrice);
        self.flash(Slot::UpdatePrice);
    }

    /// Writes a value into a slot, highlighting it when the text changes
    fn update_slot(&self, slot: Slot, value: &str) {
        let Some(current) = self.surface.slot_text(slot) else {
            return;
        };
        if current != value {
            self.flash(slot);
        }
        self.surface.set_slot_text(slot, value);
    }

    fn flash(&self, slot: Slot) {
        if self.surface.slot_text(slot).is_none() {
            return;
        }
        self.surface.set_highlight(slot, true);

        let surface = self.surface.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(HIGHLIGHT_DURATION_MS)).await;
            surface.set_highlight(slot, false);
        });
    }

    fn update_last_updated(&self) {
        let label = format!("Last updated: {}", Local::now().format("%-I:%M:%S %p"));
        self.update_slot(Slot::LastUpdated, &label);
    }

    /// Shows a banner that dismisses itself after 3000ms plus a 300ms exit
    ///
    /// Every call produces an independent banner.
    pub fn surface_notification(&self, message: &str, kind: NotificationKind) -> Uuid {
        let id = Uuid::new_v4();
        self.surface.show_notification(id, message, kind);

        let surface = self.surface.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(NOTIFICATION_DISPLAY_MS)).await;
            surface.begin_notification_exit(id);
            sleep(Duration::from_millis(NOTIFICATION_EXIT_MS)).await;
            surface.remove_notification(id);
        });

        id
    }

    /// Shows the stat tooltip just above an anchor for 2000ms
    pub fn surface_tooltip(&self, anchor: &Anchor) -> Uuid {
        let id = Uuid::new_v4();
        self.surface
            .show_tooltip(id, TOOLTIP_TEXT, anchor.left, anchor.top - TOOLTIP_OFFSET_PX);

        let surface = self.surface.clone();
        tokio::spawn(async move {
            sleep(Duration::from_millis(TOOLTIP_DURATION_MS)).await;
            surface.remove_tooltip(id);
        });

        id
    }

    /// Dispatches one input event
    ///
    /// # Returns
    /// True if the event was consumed and the page's default action should be
    /// suppressed
    pub fn handle_input(&self, event: InputEvent) -> bool {
        match event {
            InputEvent::KeyDown { ctrl: true, key } if key.eq_ignore_ascii_case(&'r') => {
                self.spawn_manual_refresh();
                true
            }
            InputEvent::RefreshClicked => {
                self.spawn_manual_refresh();
                true
            }
            InputEvent::Click {
                stat_card: Some(anchor),
            } => {
                self.surface_tooltip(&anchor);
                false
            }
            InputEvent::Resize => {
                if let Some(chart) = &self.chart {
                    chart.resize();
                }
                false
            }
            InputEvent::ChartClicked => {
                tracing::debug!("Chart clicked");
                false
            }
            _ => false,
        }
    }

    fn spawn_manual_refresh(&self) {
        let controller = self.clone();
        tokio::spawn(async move {
            let _ = controller.fetch_and_render(true).await;
        });
    }
}

/// Disables the refresh trigger while alive
///
/// Re-enables it on drop, so every exit path of a manual refresh restores the
/// trigger.
struct BusyGuard {
    surface: Arc<dyn DisplaySurface>,
}

impl BusyGuard {
    fn engage(surface: Arc<dyn DisplaySurface>) -> Self {
        surface.set_refresh_busy(true, REFRESH_BUSY_LABEL);
        Self { surface }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.surface.set_refresh_busy(false, REFRESH_IDLE_LABEL);
    }
}
