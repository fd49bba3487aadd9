//! Split, merge/borrow and separator-repair procedures.
//!
//! All rebalancing is driven from one level above the node that overflowed
//! or underflowed: the parent frame of the insert/delete recursion notices
//! the condition on its child and calls in here. The root, having no parent
//! frame, gets its own split entry points.
//!
//! Invariants are allowed to be broken *within* a single procedure (a leaf
//! briefly holds zero keys, a separator is briefly stale); every procedure
//! restores them before returning to the descent.

use std::mem;

use crate::common::NodeId;
use crate::tree::node::{Node, NodeKind};
use crate::tree::tree::BPlusTree;

/// Outcome of probing an empty child's siblings for a spare key.
///
/// The left sibling is preferred; a sibling can donate only while it keeps
/// at least one key of its own, so donors need more than one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DonorSide {
    /// Left sibling exists and has a key to spare.
    BorrowLeft,
    /// Right sibling exists and has a key to spare.
    BorrowRight,
    /// Neither side can donate; the empty node must be merged away.
    Merge,
}

impl BPlusTree {
    // ========================================================================
    // Split on overflow
    // ========================================================================

    /// Split a full `RootLeaf` into two leaves under a fresh `RootInternal`.
    ///
    /// The low `capacity / 2` keys go to the left sibling, the rest to the
    /// right; the root keeps a single separator equal to the right
    /// sibling's first key, and the two leaves start the leaf chain.
    pub(crate) fn split_root_leaf(&mut self) {
        let divider = self.capacity() / 2;
        let root_id = self.root;

        let root = self.arena.node_mut(root_id);
        debug_assert_eq!(root.kind, NodeKind::RootLeaf);
        let right_keys = root.keys.split_off(divider);
        let left_keys = mem::take(&mut root.keys);
        let separator = right_keys[0];

        let right_id = self.arena.alloc(Node {
            kind: NodeKind::Leaf,
            keys: right_keys,
            children: Vec::new(),
            next: None,
        });
        let left_id = self.arena.alloc(Node {
            kind: NodeKind::Leaf,
            keys: left_keys,
            children: Vec::new(),
            next: Some(right_id),
        });

        let root = self.arena.node_mut(root_id);
        root.kind = NodeKind::RootInternal;
        root.keys = vec![separator];
        root.children = vec![left_id, right_id];
    }

    /// Split a full `RootInternal` around its midpoint key.
    ///
    /// Both halves become new `Internal` siblings; the midpoint key is
    /// promoted to be the root's sole separator. The root node itself
    /// stays in place (and stays `RootInternal`), so the tree handle never
    /// moves on growth.
    pub(crate) fn split_root_internal(&mut self) {
        let mid = self.capacity() / 2;
        let root_id = self.root;

        let root = self.arena.node_mut(root_id);
        debug_assert_eq!(root.kind, NodeKind::RootInternal);
        let separator = root.keys[mid];
        let right_keys = root.keys.split_off(mid + 1);
        root.keys.pop(); // the promoted midpoint
        let left_keys = mem::take(&mut root.keys);
        let right_children = root.children.split_off(mid + 1);
        let left_children = mem::take(&mut root.children);

        let left_id = self.arena.alloc(Node {
            kind: NodeKind::Internal,
            keys: left_keys,
            children: left_children,
            next: None,
        });
        let right_id = self.arena.alloc(Node {
            kind: NodeKind::Internal,
            keys: right_keys,
            children: right_children,
            next: None,
        });

        let root = self.arena.node_mut(root_id);
        root.keys = vec![separator];
        root.children = vec![left_id, right_id];
    }

    /// Split the full child of `parent_id`.
    ///
    /// The split key is the child's key at index `capacity / 2`. For a leaf
    /// child it is *copied* up (leaf keys are data); for an internal child
    /// it is *moved* up (separators are not data). The new right sibling is
    /// installed immediately after the child in the parent's child list.
    pub(crate) fn split_full_child(&mut self, parent_id: NodeId) {
        let capacity = self.capacity();
        let divider = capacity / 2;

        let parent = self.arena.node(parent_id);
        let overflow = parent
            .children
            .iter()
            .position(|&c| self.arena.node(c).is_full(capacity))
            .expect("overflow rebalance with no full child");
        let child_id = parent.children[overflow];

        let child = self.arena.node(child_id);
        let split_key = child.keys[divider];

        if child.is_leaf() {
            let new_id = self.arena.alloc(Node::new(NodeKind::Leaf));

            let parent = self.arena.node_mut(parent_id);
            let idx = parent.insert_key(split_key);
            parent.children.insert(idx + 1, new_id);

            let child = self.arena.node_mut(child_id);
            let moved_keys = child.keys.split_off(divider);
            let old_next = child.next;
            child.next = Some(new_id);

            let new_leaf = self.arena.node_mut(new_id);
            new_leaf.keys = moved_keys;
            new_leaf.next = old_next;
        } else {
            let new_id = self.arena.alloc(Node::new(NodeKind::Internal));

            let parent = self.arena.node_mut(parent_id);
            let idx = parent.insert_key(split_key);
            parent.children.insert(idx + 1, new_id);

            let child = self.arena.node_mut(child_id);
            child.keys.remove(divider); // promoted, not duplicated
            let moved_keys = child.keys.split_off(divider);
            let moved_children = child.children.split_off(divider + 1);

            let new_node = self.arena.node_mut(new_id);
            new_node.keys = moved_keys;
            new_node.children = moved_children;
        }
    }

    // ========================================================================
    // Separator repair
    // ========================================================================

    /// Replace a separator equal to the just-deleted `key` with the new
    /// minimum of its right subtree.
    ///
    /// Repair is deferred (no-op) while the subtree's leftmost leaf is
    /// still empty mid-rebalance and no usable successor exists; the
    /// caller's merge step resolves the emptiness right after.
    pub(crate) fn repair_separator(&mut self, id: NodeId, key: i64) {
        let node = self.arena.node(id);
        let Ok(pos) = node.keys.binary_search(&key) else {
            return;
        };

        let subtree = node.children[pos + 1];
        let leaf_id = self.leftmost_leaf(subtree);
        let leaf = self.arena.node(leaf_id);

        let replacement = match leaf.keys.first() {
            Some(&min) => min,
            None => {
                // Mid-rebalance: the leaf is about to be merged away. Its
                // successor's minimum works unless that path is unusable,
                // in which case repair is deferred.
                if self.arena.node(subtree).is_empty() {
                    return;
                }
                let Some(next_id) = leaf.next else {
                    return;
                };
                match self.arena.node(next_id).keys.first() {
                    Some(&min) => min,
                    None => return,
                }
            }
        };

        let node = self.arena.node_mut(id);
        node.remove_key(key);
        node.insert_key(replacement);
    }

    // ========================================================================
    // Merge/borrow on underflow
    // ========================================================================

    /// Fix the first empty child of `parent_id` by borrowing a key from a
    /// sibling, or by merging the empty node away when neither sibling can
    /// donate.
    pub(crate) fn rebalance_underflow(&mut self, parent_id: NodeId) {
        let parent = self.arena.node(parent_id);
        if parent.keys.is_empty() {
            // Parent itself already underflowed; handled one level up.
            return;
        }

        let underflow = parent
            .children
            .iter()
            .position(|&c| self.arena.node(c).is_empty())
            .expect("underflow rebalance with no empty child");
        let empty_id = parent.children[underflow];
        let empty_is_leaf = self.arena.node(empty_id).is_leaf();
        let side = self.donor_side(parent_id, underflow);

        match (empty_is_leaf, side) {
            (true, DonorSide::BorrowLeft) => self.leaf_borrow_left(parent_id, underflow),
            (true, DonorSide::BorrowRight) => self.leaf_borrow_right(parent_id, underflow),
            (true, DonorSide::Merge) => self.leaf_merge(parent_id, underflow),
            (false, DonorSide::BorrowLeft) => self.internal_borrow_left(parent_id, underflow),
            (false, DonorSide::BorrowRight) => self.internal_borrow_right(parent_id, underflow),
            (false, DonorSide::Merge) => self.internal_merge(parent_id, underflow),
        }
    }

    /// Probe the siblings of the empty child at `underflow` for a donor.
    fn donor_side(&self, parent_id: NodeId, underflow: usize) -> DonorSide {
        let parent = self.arena.node(parent_id);
        if underflow > 0 && self.arena.node(parent.children[underflow - 1]).keys.len() > 1 {
            return DonorSide::BorrowLeft;
        }
        if underflow + 1 < parent.children.len()
            && self.arena.node(parent.children[underflow + 1]).keys.len() > 1
        {
            return DonorSide::BorrowRight;
        }
        DonorSide::Merge
    }

    /// Move the left sibling's last key into the empty leaf; the moved key
    /// becomes the new separator between the two.
    fn leaf_borrow_left(&mut self, parent_id: NodeId, underflow: usize) {
        let parent = self.arena.node(parent_id);
        let left_id = parent.children[underflow - 1];
        let empty_id = parent.children[underflow];

        let (left, empty) = self.arena.pair_mut(left_id, empty_id);
        let shifted = left.keys.pop().expect("donor leaf has a key");
        empty.keys.push(shifted);

        let parent = self.arena.node_mut(parent_id);
        parent.keys.remove(underflow - 1);
        parent.insert_key(shifted);
    }

    /// Move the right sibling's first key into the empty leaf; the right
    /// sibling's *new* first key replaces the stale separator.
    fn leaf_borrow_right(&mut self, parent_id: NodeId, underflow: usize) {
        let parent = self.arena.node(parent_id);
        let empty_id = parent.children[underflow];
        let right_id = parent.children[underflow + 1];

        let (empty, right) = self.arena.pair_mut(empty_id, right_id);
        let shifted = right.keys.remove(0);
        empty.keys.push(shifted);
        let new_front = *right.keys.first().expect("donor had more than one key");

        let parent = self.arena.node_mut(parent_id);
        let stale = underflow.saturating_sub(1);
        parent.keys.remove(stale);
        parent.insert_key(new_front);
    }

    /// Remove an empty leaf with no usable donor: splice it out of the
    /// leaf chain, detach it from the parent and drop the orphaned
    /// separator.
    ///
    /// The chain is relinked *before* detachment so the leaf is never
    /// unreachable from both directions at once.
    fn leaf_merge(&mut self, parent_id: NodeId, underflow: usize) {
        let empty_id = self.arena.node(parent_id).children[underflow];
        self.unlink_leaf(empty_id);

        let parent = self.arena.node_mut(parent_id);
        parent.children.remove(underflow);
        parent.keys.remove(underflow.saturating_sub(1));
        self.arena.free(empty_id);
    }

    /// Rotate through the parent into an empty internal node: the
    /// separator descends as the empty node's sole key, the left donor's
    /// last key is promoted, and the donor's last child moves across.
    fn internal_borrow_left(&mut self, parent_id: NodeId, underflow: usize) {
        let parent = self.arena.node(parent_id);
        let left_id = parent.children[underflow - 1];
        let empty_id = parent.children[underflow];
        let separator = parent.keys[underflow - 1];

        let (left, empty) = self.arena.pair_mut(left_id, empty_id);
        let promoted = left.keys.pop().expect("donor node has a key");
        let moved_child = left.children.pop().expect("internal donor has children");
        empty.keys.push(separator);
        empty.children.insert(0, moved_child);

        let parent = self.arena.node_mut(parent_id);
        parent.keys.remove(underflow - 1);
        parent.insert_key(promoted);
    }

    /// Mirror image of [`internal_borrow_left`](Self::internal_borrow_left)
    /// using the right donor's first key and first child.
    fn internal_borrow_right(&mut self, parent_id: NodeId, underflow: usize) {
        let parent = self.arena.node(parent_id);
        let empty_id = parent.children[underflow];
        let right_id = parent.children[underflow + 1];
        let separator = parent.keys[underflow];

        let (empty, right) = self.arena.pair_mut(empty_id, right_id);
        let promoted = right.keys.remove(0);
        let moved_child = right.children.remove(0);
        empty.keys.push(separator);
        empty.children.push(moved_child);

        let parent = self.arena.node_mut(parent_id);
        parent.keys.remove(underflow);
        parent.insert_key(promoted);
    }

    /// Fold an empty internal node (one key short of existing: zero keys,
    /// one child) into a neighbor together with its adjacent separator.
    ///
    /// The left neighbor is preferred; the leftmost child folds rightward.
    fn internal_merge(&mut self, parent_id: NodeId, underflow: usize) {
        let parent = self.arena.node(parent_id);
        let empty_id = parent.children[underflow];
        let empty = self.arena.node(empty_id);
        assert_eq!(empty.children.len(), 1, "empty internal node keeps one child");
        let orphan = empty.children[0];

        if underflow > 0 {
            let parent = self.arena.node_mut(parent_id);
            let left_id = parent.children[underflow - 1];
            let separator = parent.keys.remove(underflow - 1);
            parent.children.remove(underflow);

            let left = self.arena.node_mut(left_id);
            left.insert_key(separator);
            left.children.push(orphan);
        } else {
            let parent = self.arena.node_mut(parent_id);
            let right_id = parent.children[1];
            let separator = parent.keys.remove(0);
            parent.children.remove(0);

            let right = self.arena.node_mut(right_id);
            right.insert_key(separator);
            right.children.insert(0, orphan);
        }
        self.arena.free(empty_id);
    }

    /// Splice `leaf` out of the leaf chain.
    ///
    /// The predecessor is found by walking the chain from the tree's
    /// leftmost leaf; when `leaf` is the chain head there is nothing
    /// upstream to relink.
    fn unlink_leaf(&mut self, leaf: NodeId) {
        let successor = self.arena.node(leaf).next;

        let mut cursor = self.leftmost_leaf(self.root);
        if cursor == leaf {
            return;
        }
        loop {
            let next = self
                .arena
                .node(cursor)
                .next
                .expect("leaf chain ended before the leaf being unlinked");
            if next == leaf {
                self.arena.node_mut(cursor).next = successor;
                return;
            }
            cursor = next;
        }
    }
}
