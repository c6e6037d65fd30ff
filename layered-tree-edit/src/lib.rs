#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Labeled ordered trees and tree edit distance for layered-nlp.
//!
//! ## Core Types
//!
//! - [`LabeledTree`] - Arena-backed ordered tree with string labels
//! - [`TreeEditDistance`] - Zhang–Shasha edit distance, optionally normalized
//! - [`EditScript`] - The keep / rename / delete / insert operations behind a distance
//!
//! ## Example
//!
//! ```
//! use layered_tree_edit::{EditKind, LabeledTree, TreeEditDistance};
//!
//! let mut passage = LabeledTree::new("ROOT");
//! let is = passage.add_child(passage.root(), "be", Some(0));
//! passage.add_child(is, "paris", Some(1));
//!
//! let mut question = LabeledTree::new("ROOT");
//! let is = question.add_child(question.root(), "be", Some(0));
//! question.add_child(is, "what", Some(1));
//!
//! let result = TreeEditDistance::new(true).compute(&passage, &question);
//! assert_eq!(result.cost, 1);
//! assert_eq!(result.script.count(EditKind::Rename), 1);
//! ```

mod distance;
mod script;
mod tree;

pub use distance::{EditCosts, TreeDistance, TreeEditDistance};
pub use script::{EditKind, EditOperation, EditScript, HumaneEditScript};
pub use tree::{LabeledTree, Node, NodeId};
