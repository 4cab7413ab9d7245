//! Window-level overlay layers
//!
//! A small node tree split into a stack of layers. The base layer holds the
//! page; every overlay (a dropdown menu, for instance) gets its own layer on
//! top, so its nodes are never descendants of the element that opened it.
//! That is the property outside-click detection has to account for.
//!
//! Slots of removed nodes are reused. A [`NodeId`] carries the generation of
//! its slot, so a handle kept past its layer's removal stays detached.

use tracing::debug;

/// Handle to a node in an [`OverlayTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// Handle to a layer in an [`OverlayTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    layer: LayerId,
    generation: u32,
    attached: bool,
}

/// A single layer in the stack
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer {
    pub id: LayerId,
    /// Caller-chosen name, unique among live layers
    pub name: String,
    pub root: NodeId,
}

/// Node tree with a base layer and a stack of overlay layers
#[derive(Debug, Clone)]
pub struct OverlayTree {
    nodes: Vec<Node>,
    /// Detached slots waiting to be reused
    free: Vec<usize>,
    /// Bottom to top; index 0 is the base layer
    layers: Vec<OverlayLayer>,
    next_layer: usize,
}

impl Default for OverlayTree {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayTree {
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            layers: Vec::new(),
            next_layer: 0,
        };
        tree.push_layer("document");
        tree
    }

    /// Root of the base (page) layer.
    pub fn document_root(&self) -> NodeId {
        self.layers[0].root
    }

    /// Append a child node under `parent`.
    pub fn append(&mut self, parent: NodeId) -> NodeId {
        let layer = self.nodes[parent.index].layer;
        self.insert(Some(parent), layer)
    }

    /// Push a new overlay layer on top of the stack and return its root node.
    pub fn push_layer(&mut self, name: impl Into<String>) -> OverlayLayer {
        let id = LayerId(self.next_layer);
        self.next_layer += 1;
        let root = self.insert(None, id);
        let layer = OverlayLayer {
            id,
            name: name.into(),
            root,
        };
        debug!(name = %layer.name, "Pushing overlay layer");
        self.layers.push(layer.clone());
        layer
    }

    /// Remove a layer and detach every node in it. The base layer stays.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        let Some(pos) = self.layers.iter().position(|l| l.id == id) else {
            return false;
        };
        if pos == 0 {
            return false;
        }
        let layer = self.layers.remove(pos);
        debug!(name = %layer.name, "Removing overlay layer");
        for (index, node) in self.nodes.iter_mut().enumerate() {
            if node.layer == id && node.attached {
                node.attached = false;
                self.free.push(index);
            }
        }
        true
    }

    /// Remove the layer with the given name.
    pub fn remove_layer_by_name(&mut self, name: &str) -> bool {
        match self.layers.iter().find(|l| l.name == name) {
            Some(layer) => {
                let id = layer.id;
                self.remove_layer(id)
            }
            None => false,
        }
    }

    /// Live layers, bottom to top.
    pub fn layers(&self) -> &[OverlayLayer] {
        &self.layers
    }

    pub fn top_layer(&self) -> &OverlayLayer {
        &self.layers[self.layers.len() - 1]
    }

    pub fn layer_of(&self, node: NodeId) -> Option<LayerId> {
        self.node(node).filter(|n| n.attached).map(|n| n.layer)
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.attached)
    }

    /// Slots allocated so far, attached or free.
    pub fn node_slots(&self) -> usize {
        self.nodes.len()
    }

    /// DOM `Node.contains` semantics: a node contains itself and every
    /// descendant. Detached nodes contain nothing and are contained by nothing.
    pub fn contains(&self, ancestor: NodeId, target: NodeId) -> bool {
        if !self.is_attached(ancestor) || !self.is_attached(target) {
            return false;
        }
        let mut current = Some(target);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes[node.index].parent;
        }
        false
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.index)
            .filter(|n| n.generation == id.generation)
    }

    fn insert(&mut self, parent: Option<NodeId>, layer: LayerId) -> NodeId {
        if let Some(index) = self.free.pop() {
            let node = &mut self.nodes[index];
            node.generation = node.generation.wrapping_add(1);
            node.parent = parent;
            node.layer = layer;
            node.attached = true;
            return NodeId {
                index,
                generation: node.generation,
            };
        }
        let index = self.nodes.len();
        self.nodes.push(Node {
            parent,
            layer,
            generation: 0,
            attached: true,
        });
        NodeId {
            index,
            generation: 0,
        }
    }
}
