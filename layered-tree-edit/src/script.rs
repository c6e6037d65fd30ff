//! Edit scripts produced by the tree edit distance.

use crate::{LabeledTree, NodeId};
use std::collections::BTreeMap;
use std::fmt;

/// One step of rewriting the left tree into the right tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation {
    /// Left node is mapped onto right node, relabeled if the labels differ.
    Match {
        left: NodeId,
        right: NodeId,
        relabeled: bool,
    },
    /// Left node is removed.
    Delete { left: NodeId },
    /// Right node is introduced.
    Insert { right: NodeId },
}

/// Coarse classification of an [`EditOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EditKind {
    Keep,
    Rename,
    Delete,
    Insert,
}

impl EditKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditKind::Keep => "keep",
            EditKind::Rename => "rename",
            EditKind::Delete => "delete",
            EditKind::Insert => "insert",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EditOperation {
    pub fn left(&self) -> Option<NodeId> {
        match *self {
            EditOperation::Match { left, .. } | EditOperation::Delete { left } => Some(left),
            EditOperation::Insert { .. } => None,
        }
    }

    pub fn right(&self) -> Option<NodeId> {
        match *self {
            EditOperation::Match { right, .. } | EditOperation::Insert { right } => Some(right),
            EditOperation::Delete { .. } => None,
        }
    }

    pub fn kind(&self) -> EditKind {
        match self {
            EditOperation::Match {
                relabeled: false, ..
            } => EditKind::Keep,
            EditOperation::Match {
                relabeled: true, ..
            } => EditKind::Rename,
            EditOperation::Delete { .. } => EditKind::Delete,
            EditOperation::Insert { .. } => EditKind::Insert,
        }
    }
}

/// Ordered list of edit operations, addressable by left or right node.
///
/// Operations are ordered by left node id; inserts (which have no left
/// node) come last, ordered by right node id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditScript {
    operations: Vec<EditOperation>,
    by_left: BTreeMap<NodeId, usize>,
    by_right: BTreeMap<NodeId, usize>,
}

impl EditScript {
    pub fn from_operations(mut operations: Vec<EditOperation>) -> Self {
        operations.sort_by_key(|op| {
            (
                op.left().map_or(usize::MAX, |n| n.0),
                op.right().map_or(usize::MAX, |n| n.0),
            )
        });

        let mut by_left = BTreeMap::new();
        let mut by_right = BTreeMap::new();
        for (idx, op) in operations.iter().enumerate() {
            if let Some(left) = op.left() {
                by_left.insert(left, idx);
            }
            if let Some(right) = op.right() {
                by_right.insert(right, idx);
            }
        }

        Self {
            operations,
            by_left,
            by_right,
        }
    }

    pub fn operations(&self) -> &[EditOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// The operation touching the given left-tree node.
    pub fn for_left(&self, node: NodeId) -> Option<&EditOperation> {
        self.by_left.get(&node).map(|&idx| &self.operations[idx])
    }

    /// The operation touching the given right-tree node.
    pub fn for_right(&self, node: NodeId) -> Option<&EditOperation> {
        self.by_right.get(&node).map(|&idx| &self.operations[idx])
    }

    /// Count operations of one kind.
    pub fn count(&self, kind: EditKind) -> usize {
        self.operations.iter().filter(|op| op.kind() == kind).count()
    }

    /// Render the script with node labels, one operation per line.
    pub fn humane<'a>(
        &'a self,
        left: &'a LabeledTree,
        right: &'a LabeledTree,
    ) -> HumaneEditScript<'a> {
        HumaneEditScript {
            script: self,
            left,
            right,
        }
    }
}

/// Display adapter returned by [`EditScript::humane`].
pub struct HumaneEditScript<'a> {
    script: &'a EditScript,
    left: &'a LabeledTree,
    right: &'a LabeledTree,
}

impl<'a> fmt::Display for HumaneEditScript<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = |tree: &'a LabeledTree, id: NodeId| {
            tree.get(id).map_or("?", |node| node.label.as_str())
        };

        let mut is_first = true;
        for op in self.script.operations() {
            if is_first {
                is_first = false;
            } else {
                f.write_str("\n")?;
            }
            match *op {
                EditOperation::Match {
                    left,
                    right,
                    relabeled: true,
                } => write!(
                    f,
                    "rename  {} -> {}",
                    label(self.left, left),
                    label(self.right, right)
                )?,
                EditOperation::Match { left, .. } => {
                    write!(f, "keep    {}", label(self.left, left))?
                }
                EditOperation::Delete { left } => {
                    write!(f, "delete  {}", label(self.left, left))?
                }
                EditOperation::Insert { right } => {
                    write!(f, "insert  {}", label(self.right, right))?
                }
            }
        }
        Ok(())
    }
}
