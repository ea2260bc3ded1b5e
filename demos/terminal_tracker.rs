//! Runs the price tracker against a live endpoint and prints every slot write.
//!
//! Type `r` + Enter to refresh manually (same as Ctrl+R on the page), `q` to quit.
//! Endpoint, interval and ticker come from `PRICE_TRACKER_*` environment variables.

use price_tracker::{
    ChangeTone, DisplaySurface, InputEvent, MemoryDisplay, NotificationKind,
    PriceTrackerController, Slot, TrackerConfig,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Prints changes to stdout and keeps slot state in memory
struct TerminalDisplay {
    inner: MemoryDisplay,
}

impl DisplaySurface for TerminalDisplay {
    fn slot_text(&self, slot: Slot) -> Option<String> {
        self.inner.slot_text(slot)
    }

    fn set_slot_text(&self, slot: Slot, text: &str) {
        if self.inner.slot_text(slot).as_deref() != Some(text) {
            println!("{:<20} {}", slot.id(), text);
        }
        self.inner.set_slot_text(slot, text);
    }

    fn set_highlight(&self, slot: Slot, highlighted: bool) {
        self.inner.set_highlight(slot, highlighted);
    }

    fn set_change_tone(&self, tone: ChangeTone) {
        self.inner.set_change_tone(tone);
    }

    fn set_refresh_busy(&self, busy: bool, label: &str) {
        if busy {
            println!("[{}]", label);
        }
        self.inner.set_refresh_busy(busy, label);
    }

    fn show_notification(&self, id: Uuid, message: &str, kind: NotificationKind) {
        println!(">> [{}] {}", kind.css_class(), message);
        self.inner.show_notification(id, message, kind);
    }

    fn begin_notification_exit(&self, id: Uuid) {
        self.inner.begin_notification_exit(id);
    }

    fn remove_notification(&self, id: Uuid) {
        self.inner.remove_notification(id);
    }

    fn show_tooltip(&self, id: Uuid, text: &str, left: f64, top: f64) {
        self.inner.show_tooltip(id, text, left, top);
    }

    fn remove_tooltip(&self, id: Uuid) {
        self.inner.remove_tooltip(id);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = TrackerConfig::from_env()?;
    println!("Price Tracker ({})", config.endpoint_url);
    println!("==================================");

    let display = Arc::new(TerminalDisplay {
        inner: MemoryDisplay::with_all_slots(),
    });
    let controller = PriceTrackerController::new(config, display)?;
    let input = controller.initialize();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "r" => {
                input.send(InputEvent::KeyDown { ctrl: true, key: 'r' })?;
            }
            "q" => break,
            _ => {}
        }
    }

    controller.shutdown();
    Ok(())
}
