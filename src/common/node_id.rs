//! Node identifier type.

use std::fmt;

/// Identifies a node slot in the tree's arena.
///
/// Nodes reference each other by `NodeId` instead of pointers: parent→child
/// edges are owning (the arena frees a node exactly once, when the engine
/// detaches it), while the leaf-chain successor is a plain non-owning copy
/// of the same index. Following a stale successor can therefore never
/// double-free.
///
/// # Example
/// ```
/// use chaintree::NodeId;
///
/// let id = NodeId::new(42);
/// assert!(id.is_valid());
/// assert_eq!(id.index(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Invalid/sentinel node ID.
    ///
    /// Used to represent "no node" or uninitialized state.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    /// Create a new NodeId.
    #[inline]
    pub fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// Check if this node ID is valid (not the sentinel value).
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    /// The arena slot index this ID refers to.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "Node(INVALID)")
        } else {
            write!(f, "Node({})", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_new() {
        let id = NodeId::new(42);
        assert_eq!(id.0, 42);
        assert!(id.is_valid());
    }

    #[test]
    fn test_node_id_invalid() {
        assert!(!NodeId::INVALID.is_valid());
        assert_eq!(NodeId::INVALID.0, u32::MAX);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(format!("{}", NodeId::new(42)), "Node(42)");
        assert_eq!(format!("{}", NodeId::INVALID), "Node(INVALID)");
    }
}
