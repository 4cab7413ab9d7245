//! Outside-interaction detection
//!
//! The menu is mounted in an overlay layer, not inside the trigger's
//! container. A plain "outside the container" test would treat a press on a
//! menu item as an outside press and close the menu before the item's own
//! click handler runs, so the menu surface is passed in as an excluded
//! surface.

use crate::overlay::{NodeId, OverlayTree};

/// Answers "is `target` inside `ancestor`" for some node type.
pub trait Containment {
    type Node;

    fn contains(&self, ancestor: &Self::Node, target: &Self::Node) -> bool;
}

impl Containment for OverlayTree {
    type Node = NodeId;

    fn contains(&self, ancestor: &NodeId, target: &NodeId) -> bool {
        OverlayTree::contains(self, *ancestor, *target)
    }
}

/// Decides whether a pointer interaction happened outside every surface that
/// belongs to the dropdown.
#[derive(Debug, Clone)]
pub struct OutsideClickDetector<N> {
    container: Option<N>,
    excluded: Vec<N>,
    enabled: bool,
}

impl<N> Default for OutsideClickDetector<N> {
    fn default() -> Self {
        Self {
            container: None,
            excluded: Vec::new(),
            enabled: false,
        }
    }
}

impl<N> OutsideClickDetector<N> {
    pub fn new(container: Option<N>) -> Self {
        Self {
            container,
            excluded: Vec::new(),
            enabled: true,
        }
    }

    pub fn exclude(mut self, surface: N) -> Self {
        self.excluded.push(surface);
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True when the target is outside the container and every excluded
    /// surface. An unmounted container never reports an outside press.
    pub fn is_outside<C>(&self, tree: &C, target: &N) -> bool
    where
        C: Containment<Node = N>,
    {
        if !self.enabled {
            return false;
        }
        let Some(container) = &self.container else {
            return false;
        };
        if tree.contains(container, target) {
            return false;
        }
        !self
            .excluded
            .iter()
            .any(|surface| tree.contains(surface, target))
    }

    /// Run `on_outside` if the interaction landed outside. Returns whether it ran.
    pub fn handle<C>(&self, tree: &C, target: &N, on_outside: impl FnOnce()) -> bool
    where
        C: Containment<Node = N>,
    {
        if self.is_outside(tree, target) {
            on_outside();
            true
        } else {
            false
        }
    }
}
