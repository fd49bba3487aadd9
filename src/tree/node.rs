//! Tree node representation and key-list primitives.

use crate::common::NodeId;

/// Role of a node in the tree.
///
/// `RootLeaf` and `RootInternal` mean "this node is currently the root";
/// exactly one node carries a `Root*` kind at any time and it is always the
/// node referenced by the tree handle. Transitions:
///
/// ```text
/// RootLeaf ──(root overflow)──▶ RootInternal
/// RootInternal ──(root collapse onto a leaf child)──▶ RootLeaf
/// ```
///
/// `Leaf`/`Internal` kinds of non-root nodes never change except when a node
/// is destroyed by a merge or promoted by a root collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    /// The root while the tree is a single node.
    RootLeaf,
    /// A non-root node on the bottom level; member of the leaf chain.
    Leaf,
    /// The root once it has children.
    RootInternal,
    /// A non-root node with children.
    Internal,
}

impl NodeKind {
    /// Whether this kind stores keys on the bottom level.
    #[inline]
    pub(crate) fn is_leaf(self) -> bool {
        matches!(self, NodeKind::RootLeaf | NodeKind::Leaf)
    }

    /// Whether this kind owns child nodes.
    #[inline]
    pub(crate) fn is_internal(self) -> bool {
        !self.is_leaf()
    }
}

/// A single tree node.
///
/// Keys are kept strictly ascending with no duplicates. An internal node
/// with `n` keys owns exactly `n + 1` children between operations; `keys[i]`
/// separates `children[i]` (keys `< keys[i]`) from `children[i + 1]` (keys
/// `>= keys[i]`). Leaves own no children and instead carry `next`, the
/// non-owning successor link of the leaf chain.
///
/// The node does not know the tree's capacity; fullness is judged by the
/// tree, which holds the one capacity shared by every node.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// Role of this node; see [`NodeKind`].
    pub(crate) kind: NodeKind,

    /// Keys in strictly ascending order, length in `[0, capacity]`.
    pub(crate) keys: Vec<i64>,

    /// Owned children (internal nodes only).
    pub(crate) children: Vec<NodeId>,

    /// Leaf-chain successor (leaves only); `None` for the rightmost leaf.
    pub(crate) next: Option<NodeId>,
}

impl Node {
    /// Create an empty node of the given kind.
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            keys: Vec::new(),
            children: Vec::new(),
            next: None,
        }
    }

    /// Whether this node stores keys on the bottom level.
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    /// Whether this node holds zero keys (underflow).
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether this node holds `capacity` keys (overflow).
    #[inline]
    pub(crate) fn is_full(&self, capacity: usize) -> bool {
        self.keys.len() >= capacity
    }

    /// Whether `key` is present in this node's key list.
    #[inline]
    pub(crate) fn contains_key(&self, key: i64) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    /// Insert `key` keeping ascending order.
    ///
    /// Returns the index the key landed at. The caller must have rejected
    /// duplicates already; inserting a present key would break the
    /// strictly-ascending invariant.
    pub(crate) fn insert_key(&mut self, key: i64) -> usize {
        let pos = self.keys.partition_point(|&k| k < key);
        debug_assert_ne!(self.keys.get(pos), Some(&key), "duplicate key {key}");
        self.keys.insert(pos, key);
        pos
    }

    /// Remove `key` from the key list.
    ///
    /// Returns `false` (and leaves the node untouched) when the key is not
    /// present.
    pub(crate) fn remove_key(&mut self, key: i64) -> bool {
        match self.keys.binary_search(&key) {
            Ok(pos) => {
                self.keys.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Index of the child to descend into for `key`.
    ///
    /// First index `i` with `key < keys[i]`, else `len(keys)`. Equal keys
    /// descend right, matching the `>= separator` side of the partition.
    #[inline]
    pub(crate) fn descent_index(&self, key: i64) -> usize {
        self.keys.partition_point(|&k| k <= key)
    }
}
