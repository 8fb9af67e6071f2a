use std::sync::atomic::{AtomicU32, Ordering};

use crate::BinaryTree;

/// Source of arena ids, every arena created gets a new one
static NEXT_ARENA: AtomicU32 = AtomicU32::new(0);

/// Handle of a node in an [`ArenaTree`]
///
/// A handle carries the id of the arena it was created in, so handles of two different arenas
/// never compare equal even if they sit in the same slot. Clones of an arena share its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    arena: u32,
    slot: u32,
}

impl NodeId {
    /// Position of the node in the arena, in order of creation
    pub fn index(self) -> usize {
        self.slot as usize
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Children {
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// A binary tree whose nodes live in a single vector.
///
/// Nodes are created detached and linked with [`ArenaTree::set_left`], [`ArenaTree::set_right`]
/// and [`ArenaTree::set_root`]. Creating nodes does not change the shape of the tree reachable
/// from the root, linking does, so only linking bumps the generation.
#[derive(Clone, Debug)]
pub struct ArenaTree {
    id: u32,
    children: Vec<Children>,
    root: Option<NodeId>,
    generation: u64,
}

impl Default for ArenaTree {
    fn default() -> Self {
        Self {
            id: NEXT_ARENA.fetch_add(1, Ordering::Relaxed),
            children: Vec::new(),
            root: None,
            generation: 0,
        }
    }
}

impl ArenaTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            children: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Create a node without children
    pub fn add_leaf(&mut self) -> NodeId {
        self.add_node(None, None)
    }

    /// Create a node with given children
    ///
    /// The new node is detached until it is linked below another node or made the root.
    ///
    /// # Panics
    ///
    /// If the arena already holds `u32::MAX` nodes.
    pub fn add_node(&mut self, left: Option<NodeId>, right: Option<NodeId>) -> NodeId {
        let slot = u32::try_from(self.children.len()).expect("Arena is full");
        self.children.push(Children { left, right });
        NodeId {
            arena: self.id,
            slot,
        }
    }

    /// Set or clear the left child of `parent`
    ///
    /// # Panics
    ///
    /// If `parent` does not belong to this arena.
    pub fn set_left(&mut self, parent: NodeId, child: Option<NodeId>) {
        assert!(self.contains(parent), "{parent:?} is not in this arena");
        self.children[parent.index()].left = child;
        self.generation += 1;
    }

    /// Set or clear the right child of `parent`
    ///
    /// # Panics
    ///
    /// If `parent` does not belong to this arena.
    pub fn set_right(&mut self, parent: NodeId, child: Option<NodeId>) {
        assert!(self.contains(parent), "{parent:?} is not in this arena");
        self.children[parent.index()].right = child;
        self.generation += 1;
    }

    pub fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
        self.generation += 1;
    }

    /// Number of nodes in the arena, attached or not
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// All nodes in order of creation
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        let arena = self.id;
        (0..self.children.len() as u32).map(move |slot| NodeId { arena, slot })
    }
}

impl BinaryTree for ArenaTree {
    type Node = NodeId;

    fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn left(&self, node: NodeId) -> Option<NodeId> {
        self.children[node.index()].left
    }

    fn right(&self, node: NodeId) -> Option<NodeId> {
        self.children[node.index()].right
    }

    fn contains(&self, node: NodeId) -> bool {
        node.arena == self.id && node.index() < self.children.len()
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}
