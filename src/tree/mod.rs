//! In-memory B+Tree with a fixed node capacity.
//!
//! ```text
//!                    ┌──────────────┐
//!                    │  BPlusTree   │  handle: root id + capacity
//!                    └──────┬───────┘
//!                           │
//!              ┌────────────┼─────────────┐
//!              ▼            ▼             ▼
//!        ┌──────────┐ ┌───────────┐ ┌───────────┐
//!        │ NodeArena│ │ rebalance │ │ LeafKeys  │
//!        │  (slots) │ │ (splits,  │ │ (ordered  │
//!        │          │ │  merges)  │ │  scan)    │
//!        └──────────┘ └───────────┘ └───────────┘
//! ```
//!
//! The tree stores `i64` keys. All nodes share one capacity `c >= 3`; a node
//! reaching `c` keys overflows and is split, a non-root node reaching zero
//! keys underflows and borrows from or merges with a sibling. Bottom-level
//! nodes are threaded into a singly linked chain that [`LeafKeys`] walks for
//! ordered iteration. [`TreeShape`] exposes structural snapshots for
//! inspection.

mod arena;
mod iter;
mod node;
mod rebalance;
mod shape;
mod tree;

pub use iter::LeafKeys;
pub use shape::TreeShape;
pub use tree::BPlusTree;
