//! Arena storage for tree nodes.
//!
//! Nodes live in a slab of slots addressed by [`NodeId`], so parent→child
//! edges and the leaf-chain successor are plain indices rather than
//! pointers. Slots freed by merges go on a free list and are reused by the
//! next split (LIFO for locality).

use crate::common::NodeId;
use crate::tree::node::Node;

/// Slab of nodes plus a free list of reusable slots.
///
/// Allocation happens only at tree creation and in the split procedures;
/// deallocation only in merges and root collapse. Accessing a freed slot is
/// an engine bug and panics.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena {
    /// Node slots; `None` marks a freed slot awaiting reuse.
    slots: Vec<Option<Node>>,

    /// Freed slot IDs (LIFO).
    free_list: Vec<NodeId>,
}

impl NodeArena {
    /// Create an empty arena.
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Store `node` in a free slot and return its ID.
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        match self.free_list.pop() {
            Some(id) => {
                debug_assert!(self.slots[id.index()].is_none());
                self.slots[id.index()] = Some(node);
                id
            }
            None => {
                let id = NodeId::new(self.slots.len() as u32);
                self.slots.push(Some(node));
                id
            }
        }
    }

    /// Remove the node at `id` and recycle its slot.
    ///
    /// Returns the detached node so the caller can fold its contents into a
    /// neighbor before it is gone.
    pub(crate) fn free(&mut self, id: NodeId) -> Node {
        let node = self.slots[id.index()]
            .take()
            .expect("free of an already-freed node slot");
        self.free_list.push(id);
        node
    }

    /// Borrow the node at `id`.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.slots[id.index()]
            .as_ref()
            .expect("access to a freed node slot")
    }

    /// Mutably borrow the node at `id`.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.index()]
            .as_mut()
            .expect("access to a freed node slot")
    }

    /// Mutably borrow two distinct nodes at once.
    ///
    /// Needed by borrow/merge steps that move keys between siblings.
    pub(crate) fn pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut Node, &mut Node) {
        assert_ne!(a, b, "pair_mut requires distinct nodes");
        let (low, high, swapped) = if a.index() < b.index() {
            (a.index(), b.index(), false)
        } else {
            (b.index(), a.index(), true)
        };

        let (head, tail) = self.slots.split_at_mut(high);
        let low_node = head[low].as_mut().expect("access to a freed node slot");
        let high_node = tail[0].as_mut().expect("access to a freed node slot");

        if swapped {
            (high_node, low_node)
        } else {
            (low_node, high_node)
        }
    }

    /// Number of live nodes.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }
}
