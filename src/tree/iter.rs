//! Ordered key iteration over the leaf chain.

use crate::common::NodeId;
use crate::tree::tree::BPlusTree;

/// Ascending iterator over every key in the tree.
///
/// Walks the leaf chain from the leftmost leaf via successor links instead
/// of descending the hierarchy, so iteration is independent of tree height.
/// The iterator is finite and restartable: call
/// [`BPlusTree::iter`](crate::BPlusTree::iter) again for a fresh pass.
#[derive(Debug, Clone)]
pub struct LeafKeys<'a> {
    tree: &'a BPlusTree,
    /// Leaf currently being read, `None` once the chain is exhausted.
    leaf: Option<NodeId>,
    /// Position of the next key within the current leaf.
    pos: usize,
}

impl<'a> LeafKeys<'a> {
    pub(crate) fn new(tree: &'a BPlusTree) -> Self {
        Self {
            tree,
            leaf: Some(tree.leftmost_leaf(tree.root)),
            pos: 0,
        }
    }
}

impl Iterator for LeafKeys<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        loop {
            let node = self.tree.arena.node(self.leaf?);
            if let Some(&key) = node.keys.get(self.pos) {
                self.pos += 1;
                return Some(key);
            }
            // Current leaf exhausted (or an empty root leaf): follow the
            // chain.
            self.leaf = node.next;
            self.pos = 0;
        }
    }
}

impl std::iter::FusedIterator for LeafKeys<'_> {}
