//! Configuration constants for chaintree.

/// Minimum node capacity (maximum keys per node) a tree may be built with.
///
/// Below 3 the split arithmetic degenerates:
/// - `divider = capacity / 2` must leave at least one key on each side of a
///   leaf split, which requires `capacity >= 3`
/// - an internal split promotes one key and must still leave both siblings
///   with at least one key of their own
///
/// [`BPlusTree::new`](crate::BPlusTree::new) rejects smaller capacities with
/// [`Error::InvalidCapacity`](crate::Error::InvalidCapacity).
pub const MIN_CAPACITY: usize = 3;
