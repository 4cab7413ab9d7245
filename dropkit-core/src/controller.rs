//! Headless dropdown controller
//!
//! Wires the state controller, position calculator, outside-click detector and
//! keyboard navigator together against a [`DropdownHost`]. The host provides
//! measurement, containment, focus, listener attachment and a deferred task
//! queue; the controller decides what happens.
//!
//! Ordering rules:
//! - Opening mounts the menu and attaches listeners immediately, but only
//!   *schedules* measurement and first-item focus. They run once the host
//!   hands the deferred tasks back, after the menu has been committed.
//! - Closing drops the session (detaching every listener) and unmounts the
//!   menu; deferred tasks from that session are discarded when they run.
//!   Focus left on a menu row goes back to the trigger.

use tracing::{debug, trace};

use crate::config::DropdownConfig;
use crate::geometry::{Rect, Viewport};
use crate::item::{ActivationSource, DropdownItem};
use crate::keyboard::{
    focus_first, handle_menu_key, handle_trigger_key, FocusModel, KeyOutcome, NavKey,
    TriggerKeyAction,
};
use crate::outside::{Containment, OutsideClickDetector};
use crate::position::{compute_position_with_margin, Position};
use crate::session::{Deferred, DeferredWork, ListenerHost, OpenSession, SessionClock};
use crate::state::{OpenState, Transition};

/// One rendered row of a mounted menu
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSlot<N> {
    pub node: N,
    /// Index in the caller's item list
    pub item_index: usize,
    /// Focusable and activatable (not a divider, not disabled)
    pub navigable: bool,
}

/// A menu surface mounted in an overlay layer
#[derive(Debug, Clone, PartialEq)]
pub struct MountedMenu<N> {
    pub root: N,
    pub slots: Vec<MenuSlot<N>>,
}

impl<N> MountedMenu<N> {
    /// Navigable rows in render order.
    pub fn navigable(&self) -> impl Iterator<Item = &MenuSlot<N>> {
        self.slots.iter().filter(|slot| slot.navigable)
    }
}

/// Environment a dropdown runs in.
pub trait DropdownHost: ListenerHost + Containment<Node: Clone + PartialEq> {
    fn viewport(&self) -> Viewport;

    /// Current bounds of a node, `None` when it is not mounted.
    fn bounds(&self, node: &Self::Node) -> Option<Rect>;

    /// Queue work to run after the current render commit.
    fn defer(&mut self, task: Deferred);

    /// Mount the menu surface in a new overlay layer.
    fn mount_menu<I>(&mut self, items: &[DropdownItem<I>]) -> MountedMenu<Self::Node>;

    fn unmount_menu(&mut self, menu: MountedMenu<Self::Node>);

    /// Node holding input focus.
    fn active_node(&self) -> Option<Self::Node>;

    fn focus_node(&mut self, node: &Self::Node);
}

/// [`FocusModel`] over the navigable rows of a mounted menu
struct MenuFocus<'a, H: DropdownHost> {
    host: &'a mut H,
    menu: &'a MountedMenu<H::Node>,
}

impl<H: DropdownHost> FocusModel for MenuFocus<'_, H> {
    fn item_count(&self) -> usize {
        self.menu.navigable().count()
    }

    fn focused_index(&self) -> Option<usize> {
        focused_in(&*self.host, self.menu)
    }

    fn focus(&mut self, index: usize) {
        if let Some(slot) = self.menu.navigable().nth(index) {
            self.host.focus_node(&slot.node);
        }
    }
}

fn focused_in<H: DropdownHost>(host: &H, menu: &MountedMenu<H::Node>) -> Option<usize> {
    let active = host.active_node()?;
    menu.navigable().position(|slot| slot.node == active)
}

pub struct DropdownController<H: DropdownHost, I = ()> {
    config: DropdownConfig,
    state: OpenState,
    items: Vec<DropdownItem<I>>,
    container: Option<H::Node>,
    trigger: Option<H::Node>,
    menu: Option<MountedMenu<H::Node>>,
    position: Position,
    clock: SessionClock,
    session: Option<OpenSession<H::Guard>>,
}

impl<H: DropdownHost, I> DropdownController<H, I> {
    /// Uncontrolled dropdown with the given settings.
    pub fn new(config: DropdownConfig) -> Self {
        Self::with_state(config, OpenState::uncontrolled())
    }

    /// Dropdown driven by a prepared [`OpenState`] (e.g. controlled mode).
    /// `config.close_on_select` overrides the state's own setting.
    pub fn with_state(config: DropdownConfig, mut state: OpenState) -> Self {
        state.set_close_on_select(config.close_on_select);
        Self {
            config,
            state,
            items: Vec::new(),
            container: None,
            trigger: None,
            menu: None,
            position: Position::default(),
            clock: SessionClock::default(),
            session: None,
        }
    }

    /// Record the trigger's wrapping container and the trigger element.
    pub fn attach(&mut self, container: H::Node, trigger: H::Node) {
        self.container = Some(container);
        self.trigger = Some(trigger);
    }

    /// Replace the item list. An open menu is re-rendered with the new items.
    pub fn set_items(&mut self, host: &mut H, items: Vec<DropdownItem<I>>) {
        self.items = items;
        if let Some(menu) = self.menu.take() {
            host.unmount_menu(menu);
            self.menu = Some(host.mount_menu(&self.items));
        }
    }

    pub fn items(&self) -> &[DropdownItem<I>] {
        &self.items
    }

    pub fn config(&self) -> &DropdownConfig {
        &self.config
    }

    pub fn state(&self) -> &OpenState {
        &self.state
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.state.set_disabled(disabled);
    }

    /// Re-supply the host's open value (controlled mode) and reconcile.
    pub fn set_controlled(&mut self, host: &mut H, value: Option<bool>) {
        self.state.set_controlled(value);
        self.sync(host);
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn menu(&self) -> Option<&MountedMenu<H::Node>> {
        self.menu.as_ref()
    }

    pub fn session(&self) -> Option<&OpenSession<H::Guard>> {
        self.session.as_ref()
    }

    /// Navigable index of the focused menu row.
    pub fn focused_index(&self, host: &H) -> Option<usize> {
        focused_in(host, self.menu.as_ref()?)
    }

    pub fn toggle(&mut self, host: &mut H) -> Transition {
        let transition = self.state.toggle();
        self.sync(host);
        transition
    }

    pub fn open(&mut self, host: &mut H) -> Transition {
        let transition = self.state.open();
        self.sync(host);
        transition
    }

    pub fn close(&mut self, host: &mut H) -> Transition {
        let transition = self.state.close();
        self.sync(host);
        transition
    }

    /// Tear down on unmount: detach listeners and drop the menu.
    pub fn teardown(&mut self, host: &mut H) {
        if self.session.is_some() || self.menu.is_some() {
            self.end_session(host, false);
        }
    }

    /// Run a deferred task handed back by the host. Returns whether it ran.
    pub fn run_deferred(&mut self, host: &mut H, task: Deferred) -> bool {
        if !self.clock.is_live(task.epoch) || !self.state.is_open() {
            trace!(?task, "Discarding stale deferred work");
            return false;
        }
        match task.work {
            DeferredWork::Position => self.recompute(host),
            DeferredWork::FocusFirst => {
                let Some(menu) = self.menu.as_ref() else {
                    return false;
                };
                focus_first(&mut MenuFocus { host, menu }).is_some()
            }
        }
    }

    /// Window resize or window/document scroll.
    pub fn on_viewport_change(&mut self, host: &mut H) -> bool {
        if self.session.is_none() {
            return false;
        }
        self.recompute(host)
    }

    /// Global pointer-down or touch-start. Returns whether it asked the menu
    /// to close.
    pub fn on_pointer_down(&mut self, host: &mut H, target: &H::Node) -> bool {
        if self.session.is_none() {
            return false;
        }
        let mut detector = OutsideClickDetector::new(self.container.clone());
        if let Some(menu) = &self.menu {
            detector = detector.exclude(menu.root.clone());
        }
        if !detector.is_outside(&*host, target) {
            return false;
        }
        debug!("Pointer interaction outside dropdown, closing");
        self.close(host);
        true
    }

    /// Global keydown while the menu may be open.
    pub fn on_key_down(&mut self, host: &mut H, key: NavKey) -> KeyOutcome {
        if self.session.is_none() {
            return KeyOutcome::Ignored;
        }
        let outcome = {
            let Some(menu) = self.menu.as_ref() else {
                return KeyOutcome::Ignored;
            };
            let mut focus = MenuFocus {
                host: &mut *host,
                menu,
            };
            handle_menu_key(self.state.is_open(), key, &mut focus)
        };
        match outcome {
            KeyOutcome::Close => {
                self.close(host);
            }
            KeyOutcome::Select(index) => {
                self.select(host, index);
            }
            KeyOutcome::Focused(_) | KeyOutcome::Ignored => {}
        }
        outcome
    }

    /// Keydown on the trigger element.
    pub fn on_trigger_key(&mut self, host: &mut H, key: NavKey) -> Option<Transition> {
        match handle_trigger_key(self.state.is_open(), key)? {
            TriggerKeyAction::Toggle => Some(self.toggle(host)),
            TriggerKeyAction::Open => Some(self.open(host)),
        }
    }

    /// Keyboard selection of the navigable row at `nav_index`.
    pub fn select(&mut self, host: &mut H, nav_index: usize) -> bool {
        let Some(item_index) = self
            .menu
            .as_ref()
            .and_then(|menu| menu.navigable().nth(nav_index))
            .map(|slot| slot.item_index)
        else {
            return false;
        };
        self.activate(host, item_index, ActivationSource::Keyboard)
    }

    /// Pointer activation of the row for `items[item_index]`.
    pub fn click_item(&mut self, host: &mut H, item_index: usize) -> bool {
        if self.menu.is_none() {
            return false;
        }
        self.activate(host, item_index, ActivationSource::Pointer)
    }

    fn activate(&mut self, host: &mut H, item_index: usize, source: ActivationSource) -> bool {
        let Some(item) = self.items.get(item_index) else {
            return false;
        };
        if !item.activate(item_index, source) {
            trace!(item_index, "Ignoring activation of inert item");
            return false;
        }
        self.state.handle_item_click();
        self.sync(host);
        true
    }

    /// Measure and recompute. Skipped silently while trigger or menu is not
    /// mounted.
    fn recompute(&mut self, host: &mut H) -> bool {
        let trigger = self.trigger.as_ref().and_then(|node| host.bounds(node));
        let menu = self.menu.as_ref().and_then(|menu| host.bounds(&menu.root));
        let (Some(trigger), Some(menu)) = (trigger, menu) else {
            trace!("Trigger or menu not mounted, skipping position update");
            return false;
        };
        self.position = compute_position_with_margin(
            trigger,
            menu,
            host.viewport(),
            self.config.placement,
            self.config.offset,
            self.config.viewport_margin,
        );
        trace!(position = ?self.position, "Recomputed dropdown position");
        true
    }

    /// Bring sessions in line with the (possibly host-owned) open value.
    fn sync(&mut self, host: &mut H) {
        match (self.state.is_open(), self.session.is_some()) {
            (true, false) => self.begin_session(host),
            (false, true) => self.end_session(host, true),
            _ => {}
        }
    }

    fn begin_session(&mut self, host: &mut H) {
        let epoch = self.clock.begin();
        self.menu = Some(host.mount_menu(&self.items));
        self.session = Some(OpenSession::start(host, epoch));
        host.defer(Deferred {
            epoch,
            work: DeferredWork::Position,
        });
        host.defer(Deferred {
            epoch,
            work: DeferredWork::FocusFirst,
        });
    }

    /// With `restore_focus`, focus held by a menu row moves back to the
    /// trigger before the row unmounts.
    fn end_session(&mut self, host: &mut H, restore_focus: bool) {
        self.clock.end();
        self.session = None;
        if let Some(menu) = self.menu.take() {
            let focus_in_menu = host
                .active_node()
                .is_some_and(|active| host.contains(&menu.root, &active));
            host.unmount_menu(menu);
            if restore_focus && focus_in_menu {
                if let Some(trigger) = &self.trigger {
                    trace!("Returning focus to trigger");
                    host.focus_node(trigger);
                }
            }
        }
        self.position = Position::default();
    }
}
