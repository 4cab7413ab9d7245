//! Open/close state controller
//!
//! Works in one of two modes, picked per instance:
//! - **Uncontrolled**: the controller owns the boolean.
//! - **Controlled**: the host owns the value and re-supplies it every render;
//!   transitions only ask the host to change it through the notifier.
//!
//! Call sites never branch on the mode; they call `toggle`/`open`/`close` and
//! act on the returned [`Transition`].

use std::fmt;
use std::rc::Rc;

use tracing::debug;

/// Change notifier, called with the requested open value
pub type ToggleCallback = Rc<dyn Fn(bool)>;

/// Result of a state request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Internal state went from closed to open
    Opened,
    /// Internal state went from open to closed
    Closed,
    /// Controlled mode: the host was asked for this value, nothing changed locally
    Requested(bool),
    /// Nothing happened (already in that state, or disabled)
    Unchanged,
}

impl Transition {
    pub fn opened(&self) -> bool {
        matches!(self, Self::Opened)
    }

    pub fn closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

pub struct OpenState {
    internal: bool,
    controlled: Option<bool>,
    notifier: Option<ToggleCallback>,
    close_on_select: bool,
    disabled: bool,
}

impl Default for OpenState {
    fn default() -> Self {
        Self::uncontrolled()
    }
}

impl OpenState {
    /// Self-managed state, initially closed.
    pub fn uncontrolled() -> Self {
        Self {
            internal: false,
            controlled: None,
            notifier: None,
            close_on_select: true,
            disabled: false,
        }
    }

    /// Host-managed state.
    pub fn controlled(is_open: bool, notifier: impl Fn(bool) + 'static) -> Self {
        Self {
            controlled: Some(is_open),
            notifier: Some(Rc::new(notifier)),
            ..Self::uncontrolled()
        }
    }

    /// Observe transitions. In uncontrolled mode the internal state still
    /// changes; the notifier is told about it.
    pub fn with_notifier(mut self, notifier: ToggleCallback) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_close_on_select(mut self, close_on_select: bool) -> Self {
        self.close_on_select = close_on_select;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Re-supply the host's value (controlled mode) or hand ownership back
    /// to the controller with `None`.
    pub fn set_controlled(&mut self, value: Option<bool>) {
        self.controlled = value;
    }

    pub fn set_notifier(&mut self, notifier: Option<ToggleCallback>) {
        self.notifier = notifier;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn set_close_on_select(&mut self, close_on_select: bool) {
        self.close_on_select = close_on_select;
    }

    pub fn is_open(&self) -> bool {
        self.controlled.unwrap_or(self.internal)
    }

    pub fn is_controlled(&self) -> bool {
        self.controlled.is_some()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn close_on_select(&self) -> bool {
        self.close_on_select
    }

    /// Flip the open state. Ignored while disabled.
    pub fn toggle(&mut self) -> Transition {
        if self.disabled {
            debug!("Dropdown disabled, ignoring toggle");
            return Transition::Unchanged;
        }
        self.request(!self.is_open())
    }

    /// Open the menu. Ignored while disabled.
    pub fn open(&mut self) -> Transition {
        if self.disabled {
            debug!("Dropdown disabled, ignoring open");
            return Transition::Unchanged;
        }
        self.request(true)
    }

    /// Close the menu. Works while disabled so an open menu can still be
    /// dismissed.
    pub fn close(&mut self) -> Transition {
        self.request(false)
    }

    /// Called after an item activates: closes when close-on-select is set.
    pub fn handle_item_click(&mut self) -> Transition {
        if self.close_on_select {
            self.close()
        } else {
            Transition::Unchanged
        }
    }

    fn request(&mut self, next: bool) -> Transition {
        if self.controlled.is_some() {
            debug!(next, "Requesting open state from host");
            if let Some(notifier) = &self.notifier {
                notifier(next);
            }
            return Transition::Requested(next);
        }

        if self.internal == next {
            return Transition::Unchanged;
        }
        self.internal = next;
        debug!(is_open = next, "Dropdown open state changed");
        if let Some(notifier) = &self.notifier {
            notifier(next);
        }
        if next {
            Transition::Opened
        } else {
            Transition::Closed
        }
    }
}

impl fmt::Debug for OpenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenState")
            .field("internal", &self.internal)
            .field("controlled", &self.controlled)
            .field("has_notifier", &self.notifier.is_some())
            .field("close_on_select", &self.close_on_select)
            .field("disabled", &self.disabled)
            .finish()
    }
}
