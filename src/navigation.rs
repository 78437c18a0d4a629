//! Shared cursor over the navigable part of a parsed script.
//!
//! A [`Navigator`] owns the loaded script and a list of subscribers. Every
//! cursor change is pushed to all subscribers, in registration order, as a
//! [`Window`] centered on the current element where possible.

use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::NavigationConfig;
use crate::element::ScriptElement;
use crate::error::{Error, Result};

/// Default number of elements shown around the cursor
pub const DEFAULT_WINDOW_SIZE: usize = 11;

/// Handle returned by [`Navigator::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The three logical commands a host maps its input onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Advance,
    Retreat,
    ResetToTop,
}

/// Bounded slice of the navigable sequence prepared for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Window<'a> {
    pub elements: &'a [ScriptElement],
    /// Index of `elements[0]` in the navigable sequence
    pub start: usize,
    /// Position of the current element within `elements`
    pub active_offset: usize,
}

impl<'a> Window<'a> {
    /// Inclusive index of the last element in the navigable sequence.
    pub fn end(&self) -> Option<usize> {
        (!self.elements.is_empty()).then(|| self.start + self.elements.len() - 1)
    }

    pub fn active(&self) -> Option<&'a ScriptElement> {
        self.elements.get(self.active_offset)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

type Subscriber = Box<dyn FnMut(&Window<'_>)>;

/// Everything tied to one loaded script. Replaced wholesale on reload.
struct NavigationState {
    elements: Vec<ScriptElement>,
    navigable: Vec<ScriptElement>,
    cursor: usize,
}

impl NavigationState {
    fn new(elements: Vec<ScriptElement>) -> Self {
        let navigable = elements
            .iter()
            .filter(|e| e.is_navigable())
            .cloned()
            .collect();
        Self {
            elements,
            navigable,
            cursor: 0,
        }
    }

    fn window(&self, size: usize) -> Window<'_> {
        match window_bounds(self.navigable.len(), self.cursor, size) {
            Some((start, end)) => Window {
                elements: &self.navigable[start..=end],
                start,
                active_offset: self.cursor - start,
            },
            None => Window {
                elements: &[],
                start: 0,
                active_offset: 0,
            },
        }
    }
}

/// Compute the inclusive `(start, end)` of the window around `cursor`.
///
/// The span is `min(len, size)`; `size` must be at least 1, which
/// `Navigator::new` guarantees. The window stays centered on the cursor and
/// is clamped to the low edge first, then the high edge. Returns `None` for
/// an empty sequence.
fn window_bounds(len: usize, cursor: usize, size: usize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let span = len.min(size);
    let half = span / 2;

    let bounds = match cursor.checked_sub(half) {
        None => (0, span - 1),
        Some(_) if cursor + half >= len => {
            let end = len - 1;
            ((end + 1).saturating_sub(span), end)
        }
        Some(start) => (start, cursor + half),
    };
    Some(bounds)
}

/// Publish/subscribe cursor over a loaded script.
pub struct Navigator {
    state: Option<NavigationState>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
    window_size: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            state: None,
            subscribers: Vec::new(),
            next_id: 0,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl Navigator {
    /// Create a navigator showing `window_size` elements around the cursor.
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 || window_size % 2 == 0 {
            return Err(Error::InvalidWindowSize { size: window_size });
        }
        Ok(Self {
            window_size,
            ..Self::default()
        })
    }

    pub fn from_config(config: &NavigationConfig) -> Result<Self> {
        Self::new(config.window_size)
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    /// Install a freshly parsed script, move to the top and notify everyone.
    pub fn load(&mut self, elements: Vec<ScriptElement>) {
        let state = NavigationState::new(elements);
        debug!(
            elements = state.elements.len(),
            navigable = state.navigable.len(),
            "loaded script"
        );
        self.state = Some(state);
        self.notify();
    }

    /// Register a callback for window updates.
    ///
    /// The callback is not invoked here; render the current window yourself
    /// after subscribing.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Window<'_>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        debug!(id = id.0, total = self.subscribers.len(), "subscribed");
        id
    }

    /// Remove a callback. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        let removed = self.subscribers.len() != before;
        if removed {
            debug!(id = id.0, total = self.subscribers.len(), "unsubscribed");
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Move to the next element. Returns whether the cursor moved; at the
    /// last element this is a no-op and nobody is notified.
    pub fn advance(&mut self) -> Result<bool> {
        let state = self.state.as_mut().ok_or(Error::NotLoaded)?;
        if state.cursor + 1 >= state.navigable.len() {
            return Ok(false);
        }
        state.cursor += 1;
        debug!(cursor = state.cursor, "advance");
        self.notify();
        Ok(true)
    }

    /// Move to the previous element. No-op at the first element.
    pub fn retreat(&mut self) -> Result<bool> {
        let state = self.state.as_mut().ok_or(Error::NotLoaded)?;
        if state.cursor == 0 {
            return Ok(false);
        }
        state.cursor -= 1;
        debug!(cursor = state.cursor, "retreat");
        self.notify();
        Ok(true)
    }

    /// Jump to the top. Always notifies, even when already there.
    pub fn reset(&mut self) -> Result<()> {
        let state = self.state.as_mut().ok_or(Error::NotLoaded)?;
        state.cursor = 0;
        debug!("reset to top");
        self.notify();
        Ok(())
    }

    /// Dispatch a logical command. Returns whether the cursor moved.
    pub fn apply(&mut self, command: NavCommand) -> Result<bool> {
        match command {
            NavCommand::Advance => self.advance(),
            NavCommand::Retreat => self.retreat(),
            NavCommand::ResetToTop => self.reset().map(|()| true),
        }
    }

    pub fn current_window(&self) -> Result<Window<'_>> {
        let state = self.state.as_ref().ok_or(Error::NotLoaded)?;
        Ok(state.window(self.window_size))
    }

    /// Cursor position, or `None` when nothing navigable is loaded.
    pub fn cursor(&self) -> Option<usize> {
        self.state
            .as_ref()
            .filter(|s| !s.navigable.is_empty())
            .map(|s| s.cursor)
    }

    /// Full parse result, scene headings included.
    pub fn elements(&self) -> &[ScriptElement] {
        self.state
            .as_ref()
            .map(|s| s.elements.as_slice())
            .unwrap_or(&[])
    }

    pub fn navigable(&self) -> &[ScriptElement] {
        self.state
            .as_ref()
            .map(|s| s.navigable.as_slice())
            .unwrap_or(&[])
    }

    fn notify(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let window = state.window(self.window_size);

        for (id, subscriber) in self.subscribers.iter_mut() {
            let delivered = panic::catch_unwind(AssertUnwindSafe(|| subscriber(&window)));
            if delivered.is_err() {
                warn!(id = id.0, "subscriber panicked during notification");
            }
        }
    }
}
