//! Arena-backed labeled ordered trees.
//!
//! Nodes live in a flat `Vec` and refer to each other through [`NodeId`]
//! indices, so a tree can be built once, compared, and dropped without any
//! shared mutable node objects.

use std::fmt;

/// Index of a node inside a [`LabeledTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A single tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Label compared by the edit distance
    pub label: String,
    pub parent: Option<NodeId>,
    /// Children in sibling order
    pub children: Vec<NodeId>,
    /// Caller-defined position this node stands for (e.g. a token index)
    pub anchor: Option<usize>,
}

/// An ordered tree whose root is always `NodeId(0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTree {
    nodes: Vec<Node>,
}

impl LabeledTree {
    /// Create a tree holding only a root node.
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node {
                label: root_label.into(),
                parent: None,
                children: Vec::new(),
                anchor: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        label: impl Into<String>,
        anchor: Option<usize>,
    ) -> NodeId {
        assert!(parent.0 < self.nodes.len(), "unknown parent node {:?}", parent);
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            label: label.into(),
            parent: Some(parent),
            children: Vec::new(),
            anchor,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has its root, so this is only true for a tree that was
    /// never constructed through [`LabeledTree::new`].
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over `(id, node)` pairs in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Find the node standing for the given anchor.
    pub fn find_anchor(&self, anchor: usize) -> Option<NodeId> {
        self.nodes()
            .find(|(_, node)| node.anchor == Some(anchor))
            .map(|(id, _)| id)
    }

    /// Node ids in left-to-right postorder (children before their parent).
    pub fn postorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        // (node, next child to visit)
        let mut stack = vec![(self.root(), 0usize)];
        while let Some((id, next)) = stack.pop() {
            let children = &self.nodes[id.0].children;
            if next < children.len() {
                stack.push((id, next + 1));
                stack.push((children[next], 0));
            } else {
                order.push(id);
            }
        }
        order
    }
}

impl std::ops::Index<NodeId> for LabeledTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

/// Bracket notation: `{root{child}{child{grandchild}}}`.
impl fmt::Display for LabeledTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(tree: &LabeledTree, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{{{}", tree[id].label)?;
            for &child in &tree[id].children {
                write_node(tree, child, f)?;
            }
            f.write_str("}")
        }
        write_node(self, self.root(), f)
    }
}
