//! Handles to the mutable slots of one page: the query box, the search
//! button, the status banner and the results area.
//!
//! Every handle is a cheap clone over shared state. Components receive the
//! handles they touch when they are built; nothing reaches them globally.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

use crate::models::status::StatusMessage;
use crate::views::html::Element;

pub const DEFAULT_QUERY: &str = "budget meeting notes from last week";

fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone)]
pub struct QueryInput {
    value: Arc<Mutex<String>>,
}

impl QueryInput {
    pub fn new(initial: &str) -> Self {
        QueryInput {
            value: Arc::new(Mutex::new(initial.to_string())),
        }
    }

    pub fn value(&self) -> String {
        lock(&self.value).clone()
    }

    pub fn set_value(&self, value: &str) {
        *lock(&self.value) = value.to_string();
    }
}

impl Default for QueryInput {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabel {
    Idle,
    Processing,
}

impl ButtonLabel {
    pub fn text(self) -> &'static str {
        match self {
            ButtonLabel::Idle => "Search Virtual Inbox",
            ButtonLabel::Processing => "Processing...",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ButtonLabel::Idle => "fas fa-search",
            ButtonLabel::Processing => "fas fa-cog fa-spin",
        }
    }
}

#[derive(Debug)]
struct ButtonState {
    disabled: bool,
    label: ButtonLabel,
}

#[derive(Clone)]
pub struct SearchButton {
    state: Arc<Mutex<ButtonState>>,
}

impl Default for SearchButton {
    fn default() -> Self {
        SearchButton {
            state: Arc::new(Mutex::new(ButtonState {
                disabled: false,
                label: ButtonLabel::Idle,
            })),
        }
    }
}

impl SearchButton {
    pub fn is_disabled(&self) -> bool {
        lock(&self.state).disabled
    }

    pub fn label(&self) -> ButtonLabel {
        lock(&self.state).label
    }

    /// Disables the button for one operation. Returns `None` when an
    /// operation already holds it.
    pub fn press(&self) -> Option<SearchGuard> {
        let mut state = lock(&self.state);
        if state.disabled {
            return None;
        }
        state.disabled = true;
        state.label = ButtonLabel::Processing;
        Some(SearchGuard {
            button: self.clone(),
        })
    }
}

/// Keeps the search button disabled while alive; dropping it re-enables the
/// button and restores the idle label.
pub struct SearchGuard {
    button: SearchButton,
}

impl Drop for SearchGuard {
    fn drop(&mut self) {
        let mut state = lock(&self.button.state);
        state.disabled = false;
        state.label = ButtonLabel::Idle;
    }
}

#[derive(Debug, Default)]
struct StatusSlot {
    message: Option<StatusMessage>,
    hide_at: Option<Instant>,
}

impl StatusSlot {
    /// Drops the message once its dismissal deadline has passed.
    fn expire(&mut self) {
        if self.hide_at.is_some_and(|at| Instant::now() >= at) {
            self.message = None;
            self.hide_at = None;
        }
    }
}

#[derive(Clone, Default)]
pub struct StatusArea {
    slot: Arc<Mutex<StatusSlot>>,
}

impl StatusArea {
    /// Replaces the visible message. `dismiss_after` schedules hiding this
    /// message; a later `show` discards the schedule.
    pub fn show(&self, message: StatusMessage, dismiss_after: Option<Duration>) {
        let mut slot = lock(&self.slot);
        slot.message = Some(message);
        slot.hide_at = dismiss_after.map(|after| Instant::now() + after);
    }

    pub fn hide(&self) {
        let mut slot = lock(&self.slot);
        slot.message = None;
        slot.hide_at = None;
    }

    /// The message currently on screen, if any.
    pub fn visible(&self) -> Option<StatusMessage> {
        let mut slot = lock(&self.slot);
        slot.expire();
        slot.message.clone()
    }

    /// Time left before the visible message hides itself.
    pub fn dismissal_due_in(&self) -> Option<Duration> {
        let mut slot = lock(&self.slot);
        slot.expire();
        slot.hide_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }
}

#[derive(Debug, Default)]
struct ResultsSlot {
    fragment: Option<Element>,
    scroll_requested: bool,
}

#[derive(Clone, Default)]
pub struct ResultsArea {
    slot: Arc<Mutex<ResultsSlot>>,
}

impl ResultsArea {
    /// Empties and hides the area.
    pub fn clear(&self) {
        let mut slot = lock(&self.slot);
        slot.fragment = None;
        slot.scroll_requested = false;
    }

    pub fn mount(&self, fragment: Element) {
        let mut slot = lock(&self.slot);
        slot.fragment = Some(fragment);
    }

    pub fn request_scroll(&self) {
        lock(&self.slot).scroll_requested = true;
    }

    pub fn fragment(&self) -> Option<Element> {
        lock(&self.slot).fragment.clone()
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.slot).fragment.is_some()
    }

    /// Returns a pending scroll request and clears it.
    pub fn take_scroll_request(&self) -> bool {
        std::mem::take(&mut lock(&self.slot).scroll_requested)
    }
}
