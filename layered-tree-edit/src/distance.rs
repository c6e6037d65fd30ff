//! Zhang–Shasha tree edit distance.
//!
//! Computes the minimum cost of rewriting the left tree into the right tree
//! using node deletion, insertion and relabeling, and recovers one optimal
//! edit script by backtracking through the forest distance tables.

use crate::{EditOperation, EditScript, LabeledTree, NodeId};

/// Unit costs for each edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditCosts {
    pub delete: usize,
    pub insert: usize,
    /// Cost of relabeling a node to a different label (same label is free)
    pub rename: usize,
}

impl Default for EditCosts {
    fn default() -> Self {
        Self {
            delete: 1,
            insert: 1,
            rename: 1,
        }
    }
}

/// Result of comparing two trees.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeDistance {
    /// Raw minimum edit cost
    pub cost: usize,
    /// `cost`, divided by the cost of deleting the whole left tree and
    /// inserting the whole right tree when normalization is enabled
    pub distance: f64,
    pub script: EditScript,
}

/// Tree edit distance calculator.
#[derive(Debug, Clone)]
pub struct TreeEditDistance {
    costs: EditCosts,
    normalized: bool,
}

impl Default for TreeEditDistance {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TreeEditDistance {
    pub fn new(normalized: bool) -> Self {
        Self {
            costs: EditCosts::default(),
            normalized,
        }
    }

    pub fn with_costs(mut self, costs: EditCosts) -> Self {
        self.costs = costs;
        self
    }

    /// Compare `left` against `right`.
    pub fn compute(&self, left: &LabeledTree, right: &LabeledTree) -> TreeDistance {
        let l = Postorder::new(left);
        let r = Postorder::new(right);

        let mut tree_dist = vec![vec![0usize; r.len() + 1]; l.len() + 1];
        for &i in &l.keyroots {
            for &j in &r.keyroots {
                self.forest_distance(&l, &r, i, j, &mut tree_dist);
            }
        }

        let cost = tree_dist[l.len()][r.len()];
        let script = self.backtrack(&l, &r, &mut tree_dist);

        let distance = if self.normalized {
            let max_cost = l.len() * self.costs.delete + r.len() * self.costs.insert;
            if max_cost == 0 {
                0.0
            } else {
                cost as f64 / max_cost as f64
            }
        } else {
            cost as f64
        };

        TreeDistance {
            cost,
            distance,
            script,
        }
    }

    fn rename_cost(&self, left: &str, right: &str) -> usize {
        if left == right {
            0
        } else {
            self.costs.rename
        }
    }

    /// Fill the forest distance table for subtrees rooted at postorder
    /// positions `i` and `j`, recording subtree distances into `tree_dist`.
    ///
    /// Row/column 0 of the returned table stand for the empty forest; row
    /// `a` stands for left positions `lml(i)..lml(i) + a - 1`.
    fn forest_distance(
        &self,
        l: &Postorder<'_>,
        r: &Postorder<'_>,
        i: usize,
        j: usize,
        tree_dist: &mut [Vec<usize>],
    ) -> Vec<Vec<usize>> {
        let (li, lj) = (l.lml[i], r.lml[j]);
        let rows = i - li + 2;
        let cols = j - lj + 2;
        let mut fd = vec![vec![0usize; cols]; rows];

        for a in 1..rows {
            fd[a][0] = fd[a - 1][0] + self.costs.delete;
        }
        for b in 1..cols {
            fd[0][b] = fd[0][b - 1] + self.costs.insert;
        }

        for a in 1..rows {
            let x = li + a - 1;
            for b in 1..cols {
                let y = lj + b - 1;
                let delete = fd[a - 1][b] + self.costs.delete;
                let insert = fd[a][b - 1] + self.costs.insert;

                if l.lml[x] == li && r.lml[y] == lj {
                    let rename = fd[a - 1][b - 1] + self.rename_cost(l.label(x), r.label(y));
                    fd[a][b] = delete.min(insert).min(rename);
                    tree_dist[x][y] = fd[a][b];
                } else {
                    let (p, q) = (l.lml[x] - li, r.lml[y] - lj);
                    fd[a][b] = delete.min(insert).min(fd[p][q] + tree_dist[x][y]);
                }
            }
        }

        fd
    }

    fn backtrack(
        &self,
        l: &Postorder<'_>,
        r: &Postorder<'_>,
        tree_dist: &mut [Vec<usize>],
    ) -> EditScript {
        let mut operations = Vec::new();
        let mut pending = vec![(l.len(), r.len())];

        while let Some((i, j)) = pending.pop() {
            let fd = self.forest_distance(l, r, i, j, tree_dist);
            let (li, lj) = (l.lml[i], r.lml[j]);
            let (mut a, mut b) = (i - li + 1, j - lj + 1);

            while a > 0 || b > 0 {
                if a > 0 && b > 0 {
                    let (x, y) = (li + a - 1, lj + b - 1);
                    if l.lml[x] == li && r.lml[y] == lj {
                        let rename = self.rename_cost(l.label(x), r.label(y));
                        if fd[a][b] == fd[a - 1][b - 1] + rename {
                            operations.push(EditOperation::Match {
                                left: l.nodes[x],
                                right: r.nodes[y],
                                relabeled: l.label(x) != r.label(y),
                            });
                            a -= 1;
                            b -= 1;
                            continue;
                        }
                    } else {
                        let (p, q) = (l.lml[x] - li, r.lml[y] - lj);
                        if fd[a][b] == fd[p][q] + tree_dist[x][y] {
                            // subtree pair x/y is resolved on its own
                            pending.push((x, y));
                            a = p;
                            b = q;
                            continue;
                        }
                    }
                }

                if a > 0 && fd[a][b] == fd[a - 1][b] + self.costs.delete {
                    operations.push(EditOperation::Delete {
                        left: l.nodes[li + a - 1],
                    });
                    a -= 1;
                } else {
                    operations.push(EditOperation::Insert {
                        right: r.nodes[lj + b - 1],
                    });
                    b -= 1;
                }
            }
        }

        EditScript::from_operations(operations)
    }
}

/// Postorder view of a tree with 1-based positions.
struct Postorder<'t> {
    tree: &'t LabeledTree,
    /// Position -> node id (index 0 unused)
    nodes: Vec<NodeId>,
    /// Position -> position of its leftmost leaf descendant
    lml: Vec<usize>,
    keyroots: Vec<usize>,
}

impl<'t> Postorder<'t> {
    fn new(tree: &'t LabeledTree) -> Self {
        let order = tree.postorder();
        let n = order.len();

        let mut position = vec![0usize; tree.len()];
        for (idx, id) in order.iter().enumerate() {
            position[id.0] = idx + 1;
        }

        let mut nodes = Vec::with_capacity(n + 1);
        nodes.push(tree.root());
        nodes.extend(order);

        let mut lml = vec![0usize; n + 1];
        for i in 1..=n {
            lml[i] = match tree[nodes[i]].children.first() {
                Some(first) => lml[position[first.0]],
                None => i,
            };
        }

        let mut seen = vec![false; n + 1];
        let mut keyroots = Vec::new();
        for i in (1..=n).rev() {
            if !seen[lml[i]] {
                seen[lml[i]] = true;
                keyroots.push(i);
            }
        }
        keyroots.sort_unstable();

        Self {
            tree,
            nodes,
            lml,
            keyroots,
        }
    }

    fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    fn label(&self, position: usize) -> &str {
        &self.tree[self.nodes[position]].label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EditKind;

    /// `f(d(a c(b)) e)`
    fn left_sample() -> LabeledTree {
        let mut tree = LabeledTree::new("f");
        let d = tree.add_child(tree.root(), "d", None);
        tree.add_child(d, "a", None);
        let c = tree.add_child(d, "c", None);
        tree.add_child(c, "b", None);
        tree.add_child(tree.root(), "e", None);
        tree
    }

    /// `f(c(d(a b)) e)`
    fn right_sample() -> LabeledTree {
        let mut tree = LabeledTree::new("f");
        let c = tree.add_child(tree.root(), "c", None);
        let d = tree.add_child(c, "d", None);
        tree.add_child(d, "a", None);
        tree.add_child(d, "b", None);
        tree.add_child(tree.root(), "e", None);
        tree
    }

    fn script_cost(script: &EditScript) -> usize {
        script.count(EditKind::Delete) + script.count(EditKind::Insert) + script.count(EditKind::Rename)
    }

    #[test]
    fn test_identical_trees_keep_everything() {
        let tree = left_sample();
        let result = TreeEditDistance::new(true).compute(&tree, &tree);

        assert_eq!(result.cost, 0);
        assert_eq!(result.distance, 0.0);
        assert_eq!(result.script.len(), tree.len());
        assert_eq!(result.script.count(EditKind::Keep), tree.len());
    }

    #[test]
    fn test_classic_example_distance() {
        let result = TreeEditDistance::new(false).compute(&left_sample(), &right_sample());
        assert_eq!(result.cost, 2);
        assert_eq!(result.distance, 2.0);
        assert_eq!(script_cost(&result.script), 2);
    }

    #[test]
    fn test_single_rename() {
        let left = left_sample();
        let mut right = LabeledTree::new("f");
        let d = right.add_child(right.root(), "d", None);
        right.add_child(d, "a", None);
        let c = right.add_child(d, "c", None);
        right.add_child(c, "z", None);
        right.add_child(right.root(), "e", None);

        let result = TreeEditDistance::new(false).compute(&left, &right);
        assert_eq!(result.cost, 1);

        let b = left.nodes().find(|(_, n)| n.label == "b").map(|(id, _)| id).unwrap();
        let op = result.script.for_left(b).unwrap();
        assert_eq!(op.kind(), EditKind::Rename);
        assert_eq!(right[op.right().unwrap()].label, "z");
    }

    #[test]
    fn test_leaf_deletion_and_insertion() {
        let mut left = LabeledTree::new("r");
        left.add_child(left.root(), "x", None);
        left.add_child(left.root(), "y", None);

        let mut right = LabeledTree::new("r");
        right.add_child(right.root(), "y", None);
        right.add_child(right.root(), "w", None);
        right.add_child(right.root(), "v", None);

        let result = TreeEditDistance::new(false).compute(&left, &right);
        assert_eq!(result.cost, 3);
        assert_eq!(script_cost(&result.script), result.cost);
        assert!(result.script.count(EditKind::Insert) >= 1);
        assert_eq!(
            result.script.for_left(left.root()).map(EditOperation::kind),
            Some(EditKind::Keep)
        );
    }

    #[test]
    fn test_normalized_distance_is_bounded() {
        let mut left = LabeledTree::new("a");
        left.add_child(left.root(), "b", None);
        let mut right = LabeledTree::new("x");
        right.add_child(right.root(), "y", None);
        right.add_child(right.root(), "z", None);

        let result = TreeEditDistance::new(true).compute(&left, &right);
        assert!(result.distance > 0.0);
        assert!(result.distance <= 1.0);
        assert_eq!(result.distance, result.cost as f64 / 5.0);
    }

    #[test]
    fn test_every_left_node_is_touched_once() {
        let left = left_sample();
        let right = right_sample();
        let result = TreeEditDistance::default().compute(&left, &right);

        for (id, _) in left.nodes() {
            assert!(result.script.for_left(id).is_some(), "node {:?} untouched", id);
        }
        for (id, _) in right.nodes() {
            assert!(result.script.for_right(id).is_some(), "node {:?} untouched", id);
        }
        let lefts = result.script.operations().iter().filter_map(EditOperation::left).count();
        assert_eq!(lefts, left.len());
    }

    #[test]
    fn test_humane_script() {
        let mut left = LabeledTree::new("ROOT");
        left.add_child(left.root(), "paris", None);
        left.add_child(left.root(), "the", None);
        let mut right = LabeledTree::new("ROOT");
        right.add_child(right.root(), "what", None);

        let result = TreeEditDistance::default().compute(&left, &right);
        let humane = result.script.humane(&left, &right).to_string();
        assert!(humane.contains("keep    ROOT"));
        assert_eq!(humane.lines().count(), result.script.len());
    }

    #[test]
    fn test_humane_script_snapshot() {
        let mut left = LabeledTree::new("ROOT");
        let is = left.add_child(left.root(), "be", Some(1));
        left.add_child(is, "paris", Some(0));
        let mut right = LabeledTree::new("ROOT");
        let is = right.add_child(right.root(), "be", Some(1));
        right.add_child(is, "what", Some(0));

        let result = TreeEditDistance::default().compute(&left, &right);
        insta::assert_snapshot!(result.script.humane(&left, &right), @r###"
        keep    ROOT
        keep    be
        rename  paris -> what
        "###);
    }
}
