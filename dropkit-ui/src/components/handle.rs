//! Dropdown state shared by the trigger and the overlay menu
//!
//! `use_dropdown()` returns a [`DropdownHandle`] that owns the engine pieces
//! for one dropdown: the open state, the last computed position, mounted
//! element refs and the listener session for the current open period.
//!
//! Props are pushed in with [`DropdownHandle::sync`] on every render. The
//! engine state is only ever `peek`ed, so syncing does not re-render; the
//! `open` signal mirrors it and is what rendering subscribes to.

use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_core::{Runtime, RuntimeGuard, Task};
use dropkit_core::item::navigable_item;
use dropkit_core::keyboard::{focus_first, handle_menu_key, handle_trigger_key};
use dropkit_core::position::compute_position_with_margin;
use dropkit_core::session::{Epoch, SessionClock};
use dropkit_core::{
    ActivationSource, DropdownConfig, DropdownItem, KeyOutcome, ListenerKind, NavKey,
    OpenSession, OpenState, OutsideClickDetector, Position, ToggleCallback, Transition,
    TriggerKeyAction,
};
use tracing::{debug, trace, warn};
use wasm_bindgen_x::JsCast;

use crate::dom::{self, DomFocus, DomListenerHost, DomTree};
use crate::wasm_utils::{call_method, sleep_ms, DomEventListener};

/// Per-render inputs of a dropdown
pub struct DropdownInputs {
    /// Host-owned open value; `None` leaves the state to the dropdown
    pub is_open: Option<bool>,
    pub on_toggle: Option<EventHandler<bool>>,
    pub disabled: bool,
    pub config: DropdownConfig,
    pub items: Vec<DropdownItem<Element>>,
}

/// Handle to one dropdown's state. Cheap to copy into event handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct DropdownHandle {
    state: Signal<OpenState>,
    open: Signal<bool>,
    position: Signal<Position>,
    config: Signal<DropdownConfig>,
    items: Signal<Vec<DropdownItem<Element>>>,
    container: Signal<Option<Rc<MountedData>>>,
    trigger: Signal<Option<Rc<MountedData>>>,
    menu: Signal<Option<Rc<MountedData>>>,
    clock: Signal<SessionClock>,
    session: Signal<Option<OpenSession<DomEventListener>>>,
    deferred: Signal<Option<Task>>,
}

impl DropdownHandle {
    /// Push this render's props into the engine.
    pub fn sync(&self, inputs: DropdownInputs) {
        let mut state = self.state;
        let notifier = inputs.on_toggle.map(|handler| {
            let callback: ToggleCallback = Rc::new(move |value| handler.call(value));
            callback
        });
        {
            let mut state = state.write();
            state.set_controlled(inputs.is_open);
            state.set_notifier(notifier);
            state.set_disabled(inputs.disabled);
            state.set_close_on_select(inputs.config.close_on_select);
        }
        let mut config = self.config;
        config.set(inputs.config);
        let mut items = self.items;
        items.set(inputs.items);
        self.refresh();
    }

    /// Whether the menu is shown. Subscribes the caller.
    pub fn is_open(&self) -> bool {
        (self.open)()
    }

    /// Current menu coordinates. Subscribes the caller.
    pub fn position(&self) -> Position {
        (self.position)()
    }

    pub fn toggle(&self) -> Transition {
        self.transition(OpenState::toggle)
    }

    pub fn open(&self) -> Transition {
        self.transition(OpenState::open)
    }

    pub fn close(&self) -> Transition {
        self.transition(OpenState::close)
    }

    /// Keydown on the trigger. Returns `None` for keys the trigger ignores.
    pub fn trigger_key(&self, key: NavKey) -> Option<Transition> {
        let is_open = self.state.peek().is_open();
        match handle_trigger_key(is_open, key)? {
            TriggerKeyAction::Toggle => Some(self.toggle()),
            TriggerKeyAction::Open => Some(self.open()),
        }
    }

    /// Pointer activation of `items[index]`.
    pub fn click_item(&self, index: usize) -> bool {
        let item = self.items.peek().get(index).cloned();
        match item {
            Some(item) => self.activate(index, &item, ActivationSource::Pointer),
            None => false,
        }
    }

    /// Keyboard activation of the navigable row at `nav_index`.
    pub fn select(&self, nav_index: usize) -> bool {
        let picked = navigable_item(self.items.peek().as_slice(), nav_index)
            .map(|(index, item)| (index, item.clone()));
        match picked {
            Some((index, item)) => self.activate(index, &item, ActivationSource::Keyboard),
            None => false,
        }
    }

    pub fn container_mounted(&self, data: Rc<MountedData>) {
        let mut container = self.container;
        container.set(Some(data));
    }

    pub fn trigger_mounted(&self, data: Rc<MountedData>) {
        let mut trigger = self.trigger;
        trigger.set(Some(data));
    }

    /// The overlay menu mounted: lift it into the top layer and place it.
    pub fn menu_mounted(&self, data: Rc<MountedData>) {
        if let Some(element) = dom::element(&data) {
            if !call_method(&element, "showPopover") {
                warn!("showPopover failed, menu stays in document flow");
            }
        }
        let mut menu = self.menu;
        menu.set(Some(data));
        self.recompute();
    }

    /// Measure trigger and menu and store a fresh position. Skipped while
    /// either one is not mounted.
    pub fn recompute(&self) -> bool {
        let trigger = self.trigger.peek().as_ref().and_then(dom::measure);
        let menu = self.menu.peek().as_ref().and_then(dom::measure);
        let viewport = web_sys_x::window().as_ref().and_then(dom::viewport);
        let (Some(trigger), Some(menu), Some(viewport)) = (trigger, menu, viewport) else {
            trace!("Trigger or menu not mounted, skipping position update");
            return false;
        };
        let next = {
            let config = self.config.peek();
            compute_position_with_margin(
                trigger,
                menu,
                viewport,
                config.placement,
                config.offset,
                config.viewport_margin,
            )
        };
        trace!(position = ?next, "Recomputed dropdown position");
        let mut position = self.position;
        if *position.peek() != next {
            position.set(next);
        }
        true
    }

    fn transition(&self, apply: impl FnOnce(&mut OpenState) -> Transition) -> Transition {
        let mut state = self.state;
        let transition = apply(&mut state.write());
        self.refresh();
        transition
    }

    fn activate(
        &self,
        index: usize,
        item: &DropdownItem<Element>,
        source: ActivationSource,
    ) -> bool {
        if !item.activate(index, source) {
            trace!(index, "Ignoring activation of inert item");
            return false;
        }
        self.transition(OpenState::handle_item_click);
        true
    }

    /// Mirror the engine's open value into the rendered signal.
    fn refresh(&self) {
        let now = self.state.peek().is_open();
        let mut open = self.open;
        if *open.peek() != now {
            if !now {
                self.restore_focus();
            }
            open.set(now);
        }
    }

    /// Hand focus held by a menu row back to the trigger while the menu is
    /// still in the document.
    fn restore_focus(&self) {
        let menu = self.menu.peek().as_ref().and_then(dom::element);
        let trigger = self.trigger.peek().as_ref().and_then(dom::element);
        let (Some(menu), Some(trigger)) = (menu, trigger) else {
            return;
        };
        let Some(document) = web_sys_x::window().and_then(|w| w.document()) else {
            return;
        };
        if dom::has_focus_within(&document, &menu) {
            trace!("Returning focus to trigger");
            dom::focus_element(&trigger);
        }
    }

    fn begin_session(&self) {
        if self.session.peek().is_some() {
            return;
        }
        let mut clock = self.clock;
        let epoch = clock.write().begin();

        // Listener callbacks run from wasm-bindgen outside the Dioxus runtime.
        let runtime = Runtime::current();
        let handle = *self;
        let dispatch: dom::Dispatch = Rc::new(move |kind: ListenerKind, event| {
            let _guard = RuntimeGuard::new(runtime.clone());
            handle.dispatch(kind, &event);
        });
        let Some(mut host) = DomListenerHost::new(dispatch) else {
            warn!("No window or document, dropdown listeners not attached");
            return;
        };
        let mut session = self.session;
        session.set(Some(OpenSession::start(&mut host, epoch)));

        let task = spawn(async move {
            sleep_ms(0).await;
            handle.run_deferred(epoch);
        });
        let mut deferred = self.deferred;
        if let Some(stale) = deferred.write().replace(task) {
            stale.cancel();
        }
    }

    fn end_session(&self) {
        let mut clock = self.clock;
        if clock.peek().live().is_none() && self.session.peek().is_none() {
            return;
        }
        clock.write().end();
        let mut deferred = self.deferred;
        if let Some(task) = deferred.write().take() {
            task.cancel();
        }
        let mut session = self.session;
        drop(session.write().take());
        let mut position = self.position;
        if !position.peek().is_empty() {
            position.set(Position::default());
        }
        let mut menu = self.menu;
        if menu.peek().is_some() {
            menu.set(None);
        }
    }

    fn run_deferred(&self, epoch: Epoch) {
        if !self.clock.peek().is_live(epoch) || !self.state.peek().is_open() {
            trace!(?epoch, "Discarding stale deferred work");
            return;
        }
        self.recompute();
        let Some(document) = web_sys_x::window().and_then(|w| w.document()) else {
            return;
        };
        let menu = self.menu.peek().as_ref().and_then(dom::element);
        focus_first(&mut DomFocus::new(document, menu.as_ref()));
    }

    fn dispatch(&self, kind: ListenerKind, event: &wasm_bindgen_x::JsValue) {
        // Signals are gone if the component unmounted before the session
        // was dropped.
        match self.session.try_peek() {
            Ok(session) if session.is_some() => {}
            _ => return,
        }
        match kind {
            ListenerKind::KeyDown => self.on_key_down(event),
            kind if kind.is_pointer() => self.on_pointer_down(event),
            _ => {
                self.recompute();
            }
        }
    }

    fn on_pointer_down(&self, event: &wasm_bindgen_x::JsValue) {
        let Some(target) = dom::event_target_node(event) else {
            return;
        };
        let container: Option<web_sys_x::Node> = self
            .container
            .peek()
            .as_ref()
            .and_then(dom::element)
            .map(Into::into);
        let mut detector = OutsideClickDetector::new(container);
        if let Some(menu) = self.menu.peek().as_ref().and_then(dom::element) {
            detector = detector.exclude(menu.into());
        }
        detector.handle(&DomTree, &target, || {
            debug!("Pointer interaction outside dropdown, closing");
            self.close();
        });
    }

    fn on_key_down(&self, event: &wasm_bindgen_x::JsValue) {
        let Some(event) = event.dyn_ref::<web_sys_x::KeyboardEvent>() else {
            return;
        };
        let Some(key) = NavKey::from_key(&event.key()) else {
            return;
        };
        let Some(document) = web_sys_x::window().and_then(|w| w.document()) else {
            return;
        };
        let menu = self.menu.peek().as_ref().and_then(dom::element);
        let is_open = self.state.peek().is_open();
        let mut focus = DomFocus::new(document, menu.as_ref());
        let outcome = handle_menu_key(is_open, key, &mut focus);
        if outcome != KeyOutcome::Ignored && key.prevents_default() {
            event.prevent_default();
        }
        match outcome {
            KeyOutcome::Close => {
                self.close();
            }
            KeyOutcome::Select(index) => {
                self.select(index);
            }
            KeyOutcome::Focused(_) | KeyOutcome::Ignored => {}
        }
    }
}

/// Hook creating the state for one dropdown.
///
/// Listeners for outside presses, keys, resize and scroll are attached while
/// the menu is open and dropped as soon as it closes.
pub fn use_dropdown() -> DropdownHandle {
    let handle = DropdownHandle {
        state: use_signal(OpenState::uncontrolled),
        open: use_signal(|| false),
        position: use_signal(Position::default),
        config: use_signal(DropdownConfig::default),
        items: use_signal(Vec::new),
        container: use_signal(|| None),
        trigger: use_signal(|| None),
        menu: use_signal(|| None),
        clock: use_signal(SessionClock::default),
        session: use_signal(|| None),
        deferred: use_signal(|| None),
    };

    use_effect(move || {
        if (handle.open)() {
            handle.begin_session();
        } else {
            handle.end_session();
        }
    });

    use_drop(move || {
        if let Some(task) = handle.deferred.peek().as_ref() {
            task.cancel();
        }
        // WORKAROUND: drop the listeners from a spawned task. Dropping JS refs
        // during scope teardown runs synchronous IPC inside the diff cycle.
        let mut session = handle.session;
        if let Some(session) = session.write().take() {
            spawn(async move {
                drop(session);
            });
        }
    });

    handle
}
