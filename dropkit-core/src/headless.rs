//! In-memory host for running a dropdown without a DOM
//!
//! Layout is whatever the caller assigns with [`HeadlessHost::set_bounds`];
//! menus mount into their own overlay layer at a configurable size. Focus is a
//! single "active node", the stand-in for `document.activeElement`, so the
//! navigator still derives its index from focus rather than keeping one.
//! Deferred tasks queue up until [`HeadlessHost::flush`] runs them, which plays
//! the role of the event loop turning over after a render commit.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use tracing::trace;

use crate::controller::{DropdownController, DropdownHost, MenuSlot, MountedMenu};
use crate::geometry::{Rect, Viewport};
use crate::item::DropdownItem;
use crate::outside::Containment;
use crate::overlay::{NodeId, OverlayTree};
use crate::session::{Deferred, ListenerHost, ListenerKind};

type Registry = Rc<RefCell<HashMap<ListenerKind, usize>>>;

/// Attached listener; detaches on drop
#[derive(Debug)]
pub struct HeadlessListener {
    kind: ListenerKind,
    registry: Registry,
}

impl HeadlessListener {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for HeadlessListener {
    fn drop(&mut self) {
        let mut registry = self.registry.borrow_mut();
        if let Some(count) = registry.get_mut(&self.kind) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                registry.remove(&self.kind);
            }
        }
    }
}

#[derive(Debug)]
pub struct HeadlessHost {
    tree: OverlayTree,
    bounds: HashMap<NodeId, Rect>,
    viewport: Viewport,
    menu_size: Rect,
    active: Option<NodeId>,
    listeners: Registry,
    deferred: VecDeque<Deferred>,
    menus_mounted: usize,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            tree: OverlayTree::new(),
            bounds: HashMap::new(),
            viewport,
            menu_size: Rect::default(),
            active: None,
            listeners: Rc::new(RefCell::new(HashMap::new())),
            deferred: VecDeque::new(),
            menus_mounted: 0,
        }
    }

    pub fn tree(&self) -> &OverlayTree {
        &self.tree
    }

    pub fn document_root(&self) -> NodeId {
        self.tree.document_root()
    }

    /// Add a page node under `parent`.
    pub fn append(&mut self, parent: NodeId) -> NodeId {
        self.tree.append(parent)
    }

    pub fn set_bounds(&mut self, node: NodeId, rect: Rect) {
        self.bounds.insert(node, rect);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Size menus take once mounted.
    pub fn set_menu_size(&mut self, width: f64, height: f64) {
        self.menu_size = Rect::sized(width, height);
    }

    /// Focus any attached node, navigable or not.
    pub fn focus(&mut self, node: NodeId) {
        if self.tree.is_attached(node) {
            self.active = Some(node);
        }
    }

    pub fn blur(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Listeners of `kind` currently attached.
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners.borrow().get(&kind).copied().unwrap_or(0)
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.borrow().values().sum()
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    pub fn pop_deferred(&mut self) -> Option<Deferred> {
        self.deferred.pop_front()
    }

    /// Hand every queued task to `controller`. Returns how many actually ran.
    pub fn flush<I>(&mut self, controller: &mut DropdownController<HeadlessHost, I>) -> usize {
        let mut ran = 0;
        while let Some(task) = self.deferred.pop_front() {
            if controller.run_deferred(self, task) {
                ran += 1;
            }
        }
        ran
    }
}

impl ListenerHost for HeadlessHost {
    type Guard = HeadlessListener;

    fn attach(&mut self, kind: ListenerKind) -> HeadlessListener {
        *self.listeners.borrow_mut().entry(kind).or_insert(0) += 1;
        HeadlessListener {
            kind,
            registry: self.listeners.clone(),
        }
    }
}

impl Containment for HeadlessHost {
    type Node = NodeId;

    fn contains(&self, ancestor: &NodeId, target: &NodeId) -> bool {
        self.tree.contains(*ancestor, *target)
    }
}

impl DropdownHost for HeadlessHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn bounds(&self, node: &NodeId) -> Option<Rect> {
        if !self.tree.is_attached(*node) {
            return None;
        }
        self.bounds.get(node).copied()
    }

    fn defer(&mut self, task: Deferred) {
        self.deferred.push_back(task);
    }

    fn mount_menu<I>(&mut self, items: &[DropdownItem<I>]) -> MountedMenu<NodeId> {
        self.menus_mounted += 1;
        let layer = self
            .tree
            .push_layer(format!("dropdown-menu-{}", self.menus_mounted));
        self.bounds.insert(layer.root, self.menu_size);
        let slots = items
            .iter()
            .enumerate()
            .map(|(item_index, item)| MenuSlot {
                node: self.tree.append(layer.root),
                item_index,
                navigable: item.is_navigable(),
            })
            .collect();
        trace!(items = items.len(), "Mounted headless menu");
        MountedMenu {
            root: layer.root,
            slots,
        }
    }

    fn unmount_menu(&mut self, menu: MountedMenu<NodeId>) {
        if let Some(layer) = self.tree.layer_of(menu.root) {
            self.tree.remove_layer(layer);
        }
        self.bounds.remove(&menu.root);
        if self.active.is_some_and(|node| !self.tree.is_attached(node)) {
            self.active = None;
        }
    }

    fn active_node(&self) -> Option<NodeId> {
        self.active
    }

    fn focus_node(&mut self, node: &NodeId) {
        self.focus(*node);
    }
}
