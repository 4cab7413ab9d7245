//! Listener lifetime for one open session
//!
//! Everything a dropdown listens to while open (outside presses, keys,
//! resize, scroll) is attached when the menu opens and owned by an
//! [`OpenSession`]. Dropping the session detaches all of it, so closing the
//! menu or tearing the widget down can never leave a listener behind.
//!
//! Deferred work (measuring the menu, focusing the first item) is tagged with
//! the [`Epoch`] of the session that scheduled it; once the menu closes or
//! reopens, stale work is discarded instead of touching a menu that no longer
//! exists.

use tracing::debug;

/// Where a listener is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Window,
    Document,
}

/// Process-wide listeners held while the menu is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerDown,
    TouchStart,
    KeyDown,
    WindowResize,
    WindowScroll,
    DocumentScroll,
}

impl ListenerKind {
    /// Every listener an open session attaches
    pub const OPEN_SESSION: [ListenerKind; 6] = [
        Self::PointerDown,
        Self::TouchStart,
        Self::KeyDown,
        Self::WindowResize,
        Self::WindowScroll,
        Self::DocumentScroll,
    ];

    pub fn event_name(&self) -> &'static str {
        match self {
            Self::PointerDown => "mousedown",
            Self::TouchStart => "touchstart",
            Self::KeyDown => "keydown",
            Self::WindowResize => "resize",
            Self::WindowScroll | Self::DocumentScroll => "scroll",
        }
    }

    pub fn target(&self) -> ListenerTarget {
        match self {
            Self::WindowResize | Self::WindowScroll => ListenerTarget::Window,
            Self::PointerDown | Self::TouchStart | Self::KeyDown | Self::DocumentScroll => {
                ListenerTarget::Document
            }
        }
    }

    /// Scroll listeners never call `preventDefault`
    pub fn is_passive(&self) -> bool {
        matches!(self, Self::WindowScroll | Self::DocumentScroll)
    }

    /// Listeners that feed the outside-interaction detector
    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::PointerDown | Self::TouchStart)
    }

    /// Listeners that trigger a position recomputation
    pub fn is_viewport(&self) -> bool {
        matches!(
            self,
            Self::WindowResize | Self::WindowScroll | Self::DocumentScroll
        )
    }
}

/// Something that can attach listeners. The returned guard detaches its
/// listener when dropped.
pub trait ListenerHost {
    type Guard;

    fn attach(&mut self, kind: ListenerKind) -> Self::Guard;
}

/// Identifies one open session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Epoch(u64);

/// Issues epochs and knows which one is live
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    counter: u64,
    live: Option<Epoch>,
}

impl SessionClock {
    /// Start a new session; every earlier epoch becomes stale.
    pub fn begin(&mut self) -> Epoch {
        self.counter += 1;
        let epoch = Epoch(self.counter);
        self.live = Some(epoch);
        epoch
    }

    /// End the live session without starting another.
    pub fn end(&mut self) {
        self.live = None;
    }

    pub fn is_live(&self, epoch: Epoch) -> bool {
        self.live == Some(epoch)
    }

    pub fn live(&self) -> Option<Epoch> {
        self.live
    }
}

/// Work pushed past the current render commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredWork {
    /// Measure trigger and menu, recompute the position
    Position,
    /// Focus the first navigable item
    FocusFirst,
}

/// A zero-delay callback tagged with the session that scheduled it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub epoch: Epoch,
    pub work: DeferredWork,
}

/// Owns every listener attached for one open session.
pub struct OpenSession<G> {
    epoch: Epoch,
    guards: Vec<(ListenerKind, G)>,
}

impl<G> OpenSession<G> {
    /// Attach every open-session listener through `host`.
    pub fn start<H>(host: &mut H, epoch: Epoch) -> Self
    where
        H: ListenerHost<Guard = G>,
    {
        let guards = ListenerKind::OPEN_SESSION
            .iter()
            .map(|&kind| (kind, host.attach(kind)))
            .collect();
        debug!(?epoch, "Open session started");
        Self { epoch, guards }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn listener_count(&self) -> usize {
        self.guards.len()
    }

    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.guards.iter().any(|(k, _)| *k == kind)
    }
}

impl<G> Drop for OpenSession<G> {
    fn drop(&mut self) {
        debug!(epoch = ?self.epoch, "Open session ended, detaching listeners");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter(Rc<Cell<usize>>);

    impl Drop for Counter {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    struct Host(Rc<Cell<usize>>);

    impl ListenerHost for Host {
        type Guard = Counter;

        fn attach(&mut self, _kind: ListenerKind) -> Counter {
            self.0.set(self.0.get() + 1);
            Counter(self.0.clone())
        }
    }

    #[test]
    fn test_session_attaches_and_detaches_everything() {
        let count = Rc::new(Cell::new(0));
        let mut host = Host(count.clone());
        let mut clock = SessionClock::default();

        let session = OpenSession::start(&mut host, clock.begin());
        assert_eq!(count.get(), 6);
        assert_eq!(session.listener_count(), 6);
        assert!(session.is_listening(ListenerKind::DocumentScroll));

        drop(session);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_clock_invalidates_old_epochs() {
        let mut clock = SessionClock::default();
        let first = clock.begin();
        assert!(clock.is_live(first));

        let second = clock.begin();
        assert!(!clock.is_live(first));
        assert!(clock.is_live(second));

        clock.end();
        assert!(!clock.is_live(second));
        assert_eq!(clock.live(), None);
    }

    #[test]
    fn test_listener_metadata() {
        assert_eq!(ListenerKind::PointerDown.event_name(), "mousedown");
        assert_eq!(ListenerKind::WindowScroll.target(), ListenerTarget::Window);
        assert_eq!(ListenerKind::DocumentScroll.target(), ListenerTarget::Document);
        assert!(ListenerKind::DocumentScroll.is_passive());
        assert!(!ListenerKind::KeyDown.is_passive());
        assert!(ListenerKind::TouchStart.is_pointer());
        assert!(ListenerKind::WindowResize.is_viewport());
    }
}
