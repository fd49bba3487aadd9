//! Integration tests for tree operations.
//!
//! These tests drive whole insert/delete workloads through the public API
//! and check the resulting structure, not just the key sequence.

use chaintree::{BPlusTree, Error};
use std::collections::BTreeSet;

fn keys_of(tree: &BPlusTree) -> Vec<i64> {
    tree.iter().collect()
}

/// Capacity below the minimum is rejected up front.
#[test]
fn test_invalid_capacity() {
    for capacity in [0, 1, 2] {
        assert_eq!(
            BPlusTree::new(capacity).unwrap_err(),
            Error::InvalidCapacity(capacity)
        );
    }
    assert!(BPlusTree::new(3).is_ok());
}

/// A fresh tree is one empty leaf.
#[test]
fn test_new_tree_is_empty() {
    let tree = BPlusTree::new(3).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.node_count(), 1);
    assert!(tree.shape().is_leaf());
}

/// Ascending inserts at capacity 3: the first overflow creates a root with
/// two leaves, keeping the split key in the right leaf and a copy above.
#[test]
fn test_first_overflow_splits_root_leaf() {
    let mut tree = BPlusTree::new(3).unwrap();
    for key in [1, 2, 3] {
        tree.insert(key).unwrap();
    }

    let shape = tree.shape();
    assert_eq!(shape.keys, vec![2]);
    assert_eq!(shape.children[0].keys, vec![1]);
    assert_eq!(shape.children[1].keys, vec![2, 3]);
    assert_eq!(tree.node_count(), 3);
}

/// The next overflow splits a leaf below the root without growing height.
#[test]
fn test_leaf_split_keeps_height() {
    let mut tree = BPlusTree::new(3).unwrap();
    for key in [1, 2, 3, 4] {
        tree.insert(key).unwrap();
    }

    let shape = tree.shape();
    assert_eq!(shape.keys, vec![2, 3]);
    assert_eq!(shape.depth(), 2);
    assert_eq!(shape.children[0].keys, vec![1]);
    assert_eq!(shape.children[1].keys, vec![2]);
    assert_eq!(shape.children[2].keys, vec![3, 4]);
}

/// Deleting down to an empty leaf merges it away and drops its separator.
#[test]
fn test_empty_leaf_merges_into_parent() {
    let mut tree = BPlusTree::new(3).unwrap();
    for key in [1, 2, 3, 4] {
        tree.insert(key).unwrap();
    }
    tree.delete(1).unwrap();

    let shape = tree.shape();
    assert_eq!(shape.keys, vec![3]);
    assert_eq!(shape.children[0].keys, vec![2]);
    assert_eq!(shape.children[1].keys, vec![3, 4]);
    assert_eq!(keys_of(&tree), vec![2, 3, 4]);
}

/// Duplicate inserts fail and leave the tree untouched.
#[test]
fn test_duplicate_insert_fails_cleanly() {
    let mut tree = BPlusTree::new(3).unwrap();
    for key in [1, 2, 3, 4, 5] {
        tree.insert(key).unwrap();
    }
    let before = tree.shape();

    assert_eq!(tree.insert(3).unwrap_err(), Error::DuplicateKey(3));
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.shape(), before);
}

/// Deleting an absent key fails and leaves the tree untouched.
#[test]
fn test_delete_absent_key_fails_cleanly() {
    let mut tree = BPlusTree::new(3).unwrap();
    for key in [10, 20, 30] {
        tree.insert(key).unwrap();
    }
    let before = tree.shape();

    assert_eq!(tree.delete(25).unwrap_err(), Error::KeyNotFound(25));
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.shape(), before);
}

/// Interleaved inserts and deletes against a BTreeSet oracle.
#[test]
fn test_mixed_workload_matches_oracle() {
    let mut tree = BPlusTree::new(3).unwrap();
    let mut oracle = BTreeSet::new();

    // Simple LCG so the workload is deterministic.
    let mut state: u64 = 0xdead_beef;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state
    };

    for _ in 0..2000 {
        let key = (next() % 200) as i64;
        if next() % 3 == 0 {
            match tree.delete(key) {
                Ok(()) => assert!(oracle.remove(&key)),
                Err(Error::KeyNotFound(k)) => {
                    assert_eq!(k, key);
                    assert!(!oracle.contains(&key));
                }
                Err(e) => panic!("unexpected delete error: {e}"),
            }
        } else {
            match tree.insert(key) {
                Ok(()) => assert!(oracle.insert(key)),
                Err(Error::DuplicateKey(k)) => {
                    assert_eq!(k, key);
                    assert!(oracle.contains(&key));
                }
                Err(e) => panic!("unexpected insert error: {e}"),
            }
        }
        assert_eq!(tree.len(), oracle.len());
    }

    let expected: Vec<i64> = oracle.into_iter().collect();
    assert_eq!(keys_of(&tree), expected);
}

/// Grow to several levels, then delete everything; the tree ends as a
/// single empty leaf with every other node reclaimed.
#[test]
fn test_grow_then_drain() {
    let mut tree = BPlusTree::new(4).unwrap();
    for key in 0..100 {
        tree.insert(key).unwrap();
    }
    assert!(tree.shape().depth() > 2);

    for key in 0..100 {
        tree.delete(key).unwrap();
    }
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 1);
    assert_eq!(keys_of(&tree), Vec::<i64>::new());
}

/// Deleting a key that sits in an internal separator refreshes the
/// separator from the right subtree.
#[test]
fn test_deleted_key_leaves_no_stale_separator() {
    let mut tree = BPlusTree::new(3).unwrap();
    for key in 1..=6 {
        tree.insert(key).unwrap();
    }

    tree.delete(3).unwrap();

    fn assert_no_key(shape: &chaintree::TreeShape, key: i64) {
        assert!(!shape.keys.contains(&key), "stale key {key} in {:?}", shape.keys);
        for child in &shape.children {
            assert_no_key(child, key);
        }
    }
    assert_no_key(&tree.shape(), 3);
    assert_eq!(keys_of(&tree), vec![1, 2, 4, 5, 6]);
}

/// Larger capacity pushes splits further apart but the ordering contract
/// is the same.
#[test]
fn test_capacity_seven_ordering() {
    let mut tree = BPlusTree::new(7).unwrap();
    let mut keys: Vec<i64> = (0..60).map(|i| (i * 37) % 61).collect();
    for &key in &keys {
        tree.insert(key).unwrap();
    }

    keys.sort_unstable();
    assert_eq!(keys_of(&tree), keys);
}
