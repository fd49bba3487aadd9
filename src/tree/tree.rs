//! The B+Tree handle and its recursive insert/delete descent.
//!
//! The [`BPlusTree`] owns the node arena, the root ID and the one capacity
//! shared by every node. Mutations are ordinary recursive functions: each
//! stack frame re-examines the child it descended into after the recursive
//! call returns and decides whether that child needs rebalancing. Overflow
//! (a full child) is handled by the split procedures; underflow (an empty
//! child) by merge/borrow — both live in `rebalance.rs`.

use crate::common::config::MIN_CAPACITY;
use crate::common::{Error, NodeId, Result};
use crate::tree::arena::NodeArena;
use crate::tree::iter::LeafKeys;
use crate::tree::node::{Node, NodeKind};

/// An in-memory order-`k` B+Tree over unique `i64` keys.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │                       BPlusTree                          │
/// │  root: NodeId ──▶ ┌─────────────────────────────────┐    │
/// │  capacity: k      │      arena: NodeArena           │    │
/// │  len              │  [Node0] [Node1] [Node2] ...    │    │
/// │                   └─────────────────────────────────┘    │
/// │                                                          │
/// │        RootInternal          keys partition children     │
/// │        /         \                                       │
/// │    Internal    Internal      all leaves at equal depth   │
/// │    /     \     /      \                                  │
/// │  Leaf ─▶ Leaf ─▶ Leaf ─▶ Leaf   ascending leaf chain     │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// # Usage
/// ```
/// use chaintree::BPlusTree;
///
/// let mut tree = BPlusTree::new(3).unwrap();
/// for key in [5, 1, 4, 2, 3] {
///     tree.insert(key).unwrap();
/// }
/// tree.delete(4).unwrap();
///
/// let keys: Vec<i64> = tree.iter().collect();
/// assert_eq!(keys, vec![1, 2, 3, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct BPlusTree {
    /// Storage for every node in the tree.
    pub(crate) arena: NodeArena,

    /// The current root; replaced only by root collapse.
    pub(crate) root: NodeId,

    /// Maximum keys per node (immutable after construction).
    capacity: usize,

    /// Number of keys currently stored.
    len: usize,
}

impl BPlusTree {
    /// Create an empty tree of the given node capacity.
    ///
    /// # Errors
    /// `Error::InvalidCapacity` if `capacity` is below
    /// [`MIN_CAPACITY`](crate::MIN_CAPACITY).
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < MIN_CAPACITY {
            return Err(Error::InvalidCapacity(capacity));
        }

        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::new(NodeKind::RootLeaf));

        Ok(Self {
            arena,
            root,
            capacity,
            len: 0,
        })
    }

    /// Maximum keys a node may hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of keys in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live nodes (exposed for structural tests).
    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.live()
    }

    // ========================================================================
    // Public API: Mutation
    // ========================================================================

    /// Insert `key` into the tree.
    ///
    /// # Errors
    /// `Error::DuplicateKey` if the key is already present; the tree is
    /// left structurally unchanged.
    pub fn insert(&mut self, key: i64) -> Result<()> {
        self.insert_into(self.root, key)?;
        self.len += 1;
        Ok(())
    }

    /// Remove `key` from the tree.
    ///
    /// May replace the root (root collapse) when the old root runs out of
    /// separators.
    ///
    /// # Errors
    /// `Error::KeyNotFound` if the key is absent; harmless, the tree is
    /// unchanged.
    pub fn delete(&mut self, key: i64) -> Result<()> {
        self.delete_from(self.root, key)?;
        self.collapse_root();
        self.len -= 1;
        Ok(())
    }

    // ========================================================================
    // Public API: Read-only views
    // ========================================================================

    /// Ascending iterator over every key, produced by walking the leaf
    /// chain from the leftmost leaf.
    pub fn iter(&self) -> LeafKeys<'_> {
        LeafKeys::new(self)
    }

    // ========================================================================
    // Recursive descent
    // ========================================================================

    /// Recursive half of [`insert`](Self::insert).
    ///
    /// Splitting is always performed one level above the overflowing node:
    /// after the recursive call returns, this frame checks whether the
    /// child it descended into filled up. The root has no frame above it,
    /// so it checks itself (`RootLeaf` right after its own insert,
    /// `RootInternal` as a second trigger after the child check).
    fn insert_into(&mut self, id: NodeId, key: i64) -> Result<()> {
        let kind = self.arena.node(id).kind;
        match kind {
            NodeKind::RootLeaf | NodeKind::Leaf => {
                let node = self.arena.node_mut(id);
                if node.contains_key(key) {
                    return Err(Error::DuplicateKey(key));
                }
                node.insert_key(key);

                if kind == NodeKind::RootLeaf && node.is_full(self.capacity) {
                    self.split_root_leaf();
                }
                Ok(())
            }
            NodeKind::RootInternal | NodeKind::Internal => {
                let node = self.arena.node(id);
                let child = node.children[node.descent_index(key)];
                self.insert_into(child, key)?;

                if self.arena.node(child).is_full(self.capacity) {
                    self.split_full_child(id);
                }
                if kind == NodeKind::RootInternal && self.arena.node(id).is_full(self.capacity) {
                    self.split_root_internal();
                }
                Ok(())
            }
        }
    }

    /// Recursive half of [`delete`](Self::delete).
    ///
    /// On the way back up each frame first repairs any separator equal to
    /// the deleted key (lazy separator repair), then rebalances if the
    /// child it descended into was emptied. Underflow is only rechecked at
    /// the immediate parent per frame; a parent emptied by a merge is
    /// caught by *its* parent one level up.
    fn delete_from(&mut self, id: NodeId, key: i64) -> Result<()> {
        let node = self.arena.node(id);
        if node.kind.is_leaf() {
            if !self.arena.node_mut(id).remove_key(key) {
                return Err(Error::KeyNotFound(key));
            }
            return Ok(());
        }

        let child = node.children[node.descent_index(key)];
        self.delete_from(child, key)?;

        self.repair_separator(id, key);
        if self.arena.node(child).is_empty() {
            self.rebalance_underflow(id);
        }
        Ok(())
    }

    /// Replace an empty `RootInternal` with its sole remaining child.
    ///
    /// The promoted child is retagged as the root (`Internal` →
    /// `RootInternal`, `Leaf` → `RootLeaf`) and the old root is freed.
    fn collapse_root(&mut self) {
        let root = self.arena.node(self.root);
        if root.kind != NodeKind::RootInternal || !root.is_empty() {
            return;
        }
        assert_eq!(root.children.len(), 1, "empty root must have a sole child");

        let old_root = self.arena.free(self.root);
        let child = old_root.children[0];
        let child_node = self.arena.node_mut(child);
        child_node.kind = match child_node.kind {
            NodeKind::Internal => NodeKind::RootInternal,
            NodeKind::Leaf => NodeKind::RootLeaf,
            kind => unreachable!("root child already tagged {kind:?}"),
        };
        self.root = child;
    }

    /// Follow leftmost-child links from `id` down to a leaf.
    pub(crate) fn leftmost_leaf(&self, mut id: NodeId) -> NodeId {
        while self.arena.node(id).kind.is_internal() {
            id = *self
                .arena
                .node(id)
                .children
                .first()
                .expect("internal node with no children");
        }
        id
    }
}
