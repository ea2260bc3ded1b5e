//! Display surface abstraction and an in-memory implementation
//!
//! The controller never owns the page. It writes through a [`DisplaySurface`]
//! injected at construction, and treats absent slots as a silent no-op.

use crate::{
    constants::REFRESH_IDLE_LABEL,
    types::{ChangeTone, NotificationKind, Slot},
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Maximum number of busy transitions kept for inspection
const MAX_BUSY_HISTORY: usize = 64;

/// Trait for surfaces the controller renders into
///
/// Implementations must tolerate writes to slots they do not have.
pub trait DisplaySurface: Send + Sync {
    /// Current text of a slot, or `None` when the slot is absent
    fn slot_text(&self, slot: Slot) -> Option<String>;

    /// Replaces the text of a slot
    fn set_slot_text(&self, slot: Slot, text: &str);

    /// Adds or removes the transient highlight on a slot
    fn set_highlight(&self, slot: Slot, highlighted: bool);

    /// Applies the positive/negative style to the change badge
    fn set_change_tone(&self, tone: ChangeTone);

    /// Disables (busy) or enables the refresh trigger and sets its label
    fn set_refresh_busy(&self, busy: bool, label: &str);

    /// Shows a notification banner
    fn show_notification(&self, id: Uuid, message: &str, kind: NotificationKind);

    /// Starts the exit transition of a notification
    fn begin_notification_exit(&self, id: Uuid);

    /// Removes a notification if it is still displayed
    fn remove_notification(&self, id: Uuid);

    /// Shows a tooltip at page coordinates
    fn show_tooltip(&self, id: Uuid, text: &str, left: f64, top: f64);

    /// Removes a tooltip
    fn remove_tooltip(&self, id: Uuid);
}

/// Optional charting capability of the page
pub trait ChartCapability: Send + Sync {
    /// Re-lays out the chart after the viewport changed
    fn resize(&self);
}

/// A notification as currently displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    pub exiting: bool,
}

/// A tooltip as currently displayed
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipView {
    pub id: Uuid,
    pub text: String,
    pub left: f64,
    pub top: f64,
}

#[derive(Debug)]
struct MemoryState {
    slots: HashMap<Slot, String>,
    highlighted: HashSet<Slot>,
    highlight_counts: HashMap<Slot, usize>,
    change_tone: Option<ChangeTone>,
    refresh_busy: bool,
    refresh_label: String,
    busy_history: VecDeque<bool>,
    notifications: Vec<NotificationView>,
    tooltips: Vec<TooltipView>,
}

/// In-memory display surface
///
/// Holds the text of every slot it was created with and records cosmetic
/// state so embedders (and tests) can inspect what the controller did.
#[derive(Debug)]
pub struct MemoryDisplay {
    state: Mutex<MemoryState>,
}

impl Default for MemoryDisplay {
    fn default() -> Self {
        Self::with_all_slots()
    }
}

impl MemoryDisplay {
    /// Creates a surface that has every known slot, all empty
    pub fn with_all_slots() -> Self {
        Self::with_slots(Slot::all())
    }

    /// Creates a surface that only has the given slots
    pub fn with_slots(slots: &[Slot]) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                slots: slots.iter().map(|slot| (*slot, String::new())).collect(),
                highlighted: HashSet::new(),
                highlight_counts: HashMap::new(),
                change_tone: None,
                refresh_busy: false,
                refresh_label: REFRESH_IDLE_LABEL.to_string(),
                busy_history: VecDeque::with_capacity(MAX_BUSY_HISTORY),
                notifications: Vec::new(),
                tooltips: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Text of every present slot
    pub fn snapshot_text(&self) -> HashMap<Slot, String> {
        self.state().slots.clone()
    }

    pub fn is_highlighted(&self, slot: Slot) -> bool {
        self.state().highlighted.contains(&slot)
    }

    /// How many times a slot has been highlighted
    pub fn highlight_count(&self, slot: Slot) -> usize {
        self.state().highlight_counts.get(&slot).copied().unwrap_or(0)
    }

    pub fn change_tone(&self) -> Option<ChangeTone> {
        self.state().change_tone
    }

    pub fn is_refresh_busy(&self) -> bool {
        self.state().refresh_busy
    }

    pub fn refresh_label(&self) -> String {
        self.state().refresh_label.clone()
    }

    /// Most recent busy/enabled transitions of the refresh trigger, oldest first
    ///
    /// Only the last 64 transitions are kept.
    pub fn busy_history(&self) -> Vec<bool> {
        self.state().busy_history.iter().copied().collect()
    }

    pub fn notifications(&self) -> Vec<NotificationView> {
        self.state().notifications.clone()
    }

    pub fn tooltips(&self) -> Vec<TooltipView> {
        self.state().tooltips.clone()
    }
}

impl DisplaySurface for MemoryDisplay {
    fn slot_text(&self, slot: Slot) -> Option<String> {
        self.state().slots.get(&slot).cloned()
    }

    fn set_slot_text(&self, slot: Slot, text: &str) {
        if let Some(current) = self.state().slots.get_mut(&slot) {
            *current = text.to_string();
        }
    }

    fn set_highlight(&self, slot: Slot, highlighted: bool) {
        let mut state = self.state();
        if !state.slots.contains_key(&slot) {
            return;
        }
        if highlighted {
            state.highlighted.insert(slot);
            *state.highlight_counts.entry(slot).or_insert(0) += 1;
        } else {
            state.highlighted.remove(&slot);
        }
    }

    fn set_change_tone(&self, tone: ChangeTone) {
        let mut state = self.state();
        if state.slots.contains_key(&Slot::ChangeAmount) {
            state.change_tone = Some(tone);
        }
    }

    fn set_refresh_busy(&self, busy: bool, label: &str) {
        let mut state = self.state();
        state.refresh_busy = busy;
        state.refresh_label = label.to_string();
        if state.busy_history.len() >= MAX_BUSY_HISTORY {
            state.busy_history.pop_front();
        }
        state.busy_history.push_back(busy);
    }

    fn show_notification(&self, id: Uuid, message: &str, kind: NotificationKind) {
        self.state().notifications.push(NotificationView {
            id,
            message: message.to_string(),
            kind,
            exiting: false,
        });
    }

    fn begin_notification_exit(&self, id: Uuid) {
        if let Some(view) = self.state().notifications.iter_mut().find(|n| n.id == id) {
            view.exiting = true;
        }
    }

    fn remove_notification(&self, id: Uuid) {
        self.state().notifications.retain(|n| n.id != id);
    }

    fn show_tooltip(&self, id: Uuid, text: &str, left: f64, top: f64) {
        self.state().tooltips.push(TooltipView {
            id,
            text: text.to_string(),
            left,
            top,
        });
    }

    fn remove_tooltip(&self, id: Uuid) {
        self.state().tooltips.retain(|t| t.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_slot_is_skipped() {
        let display = MemoryDisplay::with_slots(&[Slot::CurrentPrice]);

        display.set_slot_text(Slot::Ath, "$1.00");
        display.set_highlight(Slot::Ath, true);

        assert_eq!(display.slot_text(Slot::Ath), None);
        assert!(!display.is_highlighted(Slot::Ath));
        assert_eq!(display.slot_text(Slot::CurrentPrice), Some(String::new()));
    }

    #[test]
    fn test_highlight_counts_activations() {
        let display = MemoryDisplay::with_all_slots();

        display.set_highlight(Slot::MarketCap, true);
        display.set_highlight(Slot::MarketCap, false);
        display.set_highlight(Slot::MarketCap, true);

        assert!(display.is_highlighted(Slot::MarketCap));
        assert_eq!(display.highlight_count(Slot::MarketCap), 2);
    }

    #[test]
    fn test_busy_history_is_bounded() {
        let display = MemoryDisplay::default();

        for _ in 0..100 {
            display.set_refresh_busy(true, "Refreshing...");
            display.set_refresh_busy(false, "Refresh");
        }

        let history = display.busy_history();
        assert_eq!(history.len(), MAX_BUSY_HISTORY);
        assert_eq!(history.last(), Some(&false));
        assert!(!display.is_refresh_busy());
    }

    #[test]
    fn test_notification_lifecycle() {
        let display = MemoryDisplay::default();
        let id = Uuid::new_v4();

        display.show_notification(id, "hello", NotificationKind::Info);
        display.begin_notification_exit(id);
        assert!(display.notifications()[0].exiting);

        display.remove_notification(id);
        display.remove_notification(id);
        assert!(display.notifications().is_empty());
    }

    #[test]
    fn test_refresh_busy_history() {
        let display = MemoryDisplay::default();
        assert_eq!(display.refresh_label(), "Refresh");

        display.set_refresh_busy(true, "Refreshing...");
        assert!(display.is_refresh_busy());
        display.set_refresh_busy(false, "Refresh");

        assert_eq!(display.busy_history(), vec![true, false]);
        assert_eq!(display.refresh_label(), "Refresh");
    }
}
