//! ChainTree - An in-memory B+Tree with chained leaves and eager rebalancing.
//!
//! # Architecture
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          ChainTree                            │
//! ├───────────────────────────────────────────────────────────────┤
//! │  ┌───────────────────────────────────────────────────────┐   │
//! │  │               Tree Handle (tree/)                      │   │
//! │  │     BPlusTree: insert / delete / iter / shape          │   │
//! │  └───────────────────────────────────────────────────────┘   │
//! │                             ↓                                 │
//! │  ┌───────────────────────────────────────────────────────┐   │
//! │  │            Rebalancing Engine (tree/)                  │   │
//! │  │   split on overflow | borrow/merge on underflow        │   │
//! │  │   separator repair  | root growth and collapse         │   │
//! │  └───────────────────────────────────────────────────────┘   │
//! │                             ↓                                 │
//! │  ┌───────────────────────────────────────────────────────┐   │
//! │  │             Node Storage (tree/arena)                  │   │
//! │  │   NodeArena slots + free list, NodeId-indexed edges    │   │
//! │  │   leaf chain: leftmost leaf → ... → rightmost leaf     │   │
//! │  └───────────────────────────────────────────────────────┘   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`tree`] - The tree itself: handle, nodes, rebalancing, iteration
//!
//! # Quick Start
//! ```
//! use chaintree::BPlusTree;
//!
//! let mut tree = BPlusTree::new(3).unwrap();
//! for key in [5, 1, 4, 2, 3] {
//!     tree.insert(key).unwrap();
//! }
//! tree.delete(4).unwrap();
//!
//! let keys: Vec<i64> = tree.iter().collect();
//! assert_eq!(keys, vec![1, 2, 3, 5]);
//! ```

pub mod common;
pub mod tree;

// Re-export commonly used items at crate root for convenience
pub use common::config::MIN_CAPACITY;
pub use common::{Error, NodeId, Result};

pub use tree::{BPlusTree, LeafKeys, TreeShape};
