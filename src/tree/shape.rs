//! Structural snapshots for inspection and testing.

use std::fmt;

use crate::common::NodeId;
use crate::tree::tree::BPlusTree;

/// Owned snapshot of the tree's hierarchy.
///
/// Each entry mirrors one node: its key list and, for internal nodes, one
/// child snapshot per subtree in left-to-right order. Leaves have no
/// children. The snapshot is detached from the tree; later mutations do not
/// affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeShape {
    /// Keys of the snapshotted node, ascending.
    pub keys: Vec<i64>,
    /// One snapshot per child, empty for leaves.
    pub children: Vec<TreeShape>,
}

impl TreeShape {
    /// Whether this entry describes a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels below and including this entry.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeShape::depth)
            .max()
            .unwrap_or(0)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        for _ in 0..level {
            write!(f, "    ")?;
        }
        write!(f, "[")?;
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{key}")?;
        }
        writeln!(f, "]")?;
        for child in &self.children {
            child.render(f, level + 1)?;
        }
        Ok(())
    }
}

/// Renders each node on its own line, indented by level:
///
/// ```text
/// [2]
///     [1]
///     [2 3]
/// ```
impl fmt::Display for TreeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl BPlusTree {
    /// Snapshot the current hierarchy starting at the root.
    pub fn shape(&self) -> TreeShape {
        self.shape_of(self.root)
    }

    fn shape_of(&self, id: NodeId) -> TreeShape {
        let node = self.arena.node(id);
        TreeShape {
            keys: node.keys.clone(),
            children: node
                .children
                .iter()
                .map(|&child| self.shape_of(child))
                .collect(),
        }
    }
}
