//! Question/passage tree alignment features.
//!
//! The passage dependency tree is compared with the question dependency
//! tree by tree edit distance, i.e. we look for the cheapest way to rewrite
//! the passage into the question. Each passage token is then described by
//! what that rewrite does to it: kept as is, deleted, or renamed to some
//! question word.

use layered_tree_edit::{EditKind, EditOperation, LabeledTree, TreeEditDistance};
use tracing::debug;

use crate::{Feature, FeatureExtractor, TokenContext};

/// Name prefix shared by every alignment feature.
pub const ALIGN_PREFIX: &str = "align";

/// What the rewrite does to one passage token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEdit {
    pub kind: EditKind,
    /// Question label the token is renamed to
    pub rename_to: Option<String>,
}

/// Edit-distance alignment of one passage against the question.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Raw edit cost
    pub cost: usize,
    /// Normalized (or raw, if normalization is off) distance
    pub distance: f64,
    /// Indexed by passage-relative token position
    edits: Vec<Option<TokenEdit>>,
}

impl Alignment {
    /// Align `passage` (left) against `question` (right).
    ///
    /// `token_count` is the number of passage tokens; node anchors are
    /// passage-relative token positions.
    pub fn compute(
        question: &LabeledTree,
        passage: &LabeledTree,
        token_count: usize,
        distance: &TreeEditDistance,
    ) -> Self {
        let result = distance.compute(passage, question);
        debug!(
            cost = result.cost,
            distance = result.distance,
            "passage to question edit script:\n{}",
            result.script.humane(passage, question)
        );

        let mut edits = vec![None; token_count];
        for op in result.script.operations() {
            let left = match op.left() {
                Some(left) => left,
                None => continue,
            };
            let anchor = match passage.get(left).and_then(|node| node.anchor) {
                Some(anchor) if anchor < token_count => anchor,
                _ => continue,
            };
            let rename_to = match *op {
                EditOperation::Match {
                    right,
                    relabeled: true,
                    ..
                } => question.get(right).map(|node| node.label.clone()),
                _ => None,
            };
            edits[anchor] = Some(TokenEdit {
                kind: op.kind(),
                rename_to,
            });
        }

        Self {
            cost: result.cost,
            distance: result.distance,
            edits,
        }
    }

    /// Edit applied to the passage token at `index`, if it is in the tree.
    pub fn edit(&self, index: usize) -> Option<&TokenEdit> {
        self.edits.get(index).and_then(Option::as_ref)
    }
}

/// Align when both trees exist; a missing tree means no alignment.
pub fn align(
    question: Option<&LabeledTree>,
    passage: Option<&LabeledTree>,
    token_count: usize,
    distance: &TreeEditDistance,
) -> Option<Alignment> {
    match (question, passage) {
        (Some(question), Some(passage)) => {
            Some(Alignment::compute(question, passage, token_count, distance))
        }
        _ => None,
    }
}

impl FeatureExtractor for Alignment {
    fn extract(&self, ctx: &TokenContext<'_>) -> Vec<Feature> {
        let edit = match self.edit(ctx.index) {
            Some(edit) => edit,
            None => return Vec::new(),
        };
        let op = edit.kind.as_str();

        let mut features = Vec::with_capacity(ctx.built.len() + 3);
        features.push(Feature::new(format!("{}:op", ALIGN_PREFIX), op));
        if let Some(target) = &edit.rename_to {
            features.push(Feature::new(
                format!("{}:renameTo", ALIGN_PREFIX),
                target.as_str(),
            ));
        }
        features.push(Feature::new(
            format!("{}:distance", ALIGN_PREFIX),
            self.distance,
        ));
        // conjoin the edit with what we already know about the token
        for feature in ctx.built {
            features.push(Feature {
                name: format!("{}:{}|{}", ALIGN_PREFIX, op, feature.name),
                value: feature.value.clone(),
            });
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_sentence_tree, Token};

    fn passage_tokens() -> Vec<Token> {
        vec![
            Token::new("Paris", "NNP").with_dependency("nsubj", Some(1)),
            Token::new("is", "VBZ")
                .with_lemma("be")
                .with_dependency("root", None),
            Token::new("big", "JJ").with_dependency("acomp", Some(1)),
            Token::new("today", "NN").with_dependency("tmod", Some(1)),
        ]
    }

    fn question_tokens() -> Vec<Token> {
        vec![
            Token::new("What", "WP").with_dependency("nsubj", Some(1)),
            Token::new("is", "VBZ")
                .with_lemma("be")
                .with_dependency("root", None),
            Token::new("big", "JJ").with_dependency("acomp", Some(1)),
        ]
    }

    fn alignment() -> Alignment {
        let passage = build_sentence_tree(&passage_tokens(), None).unwrap();
        let question = build_sentence_tree(&question_tokens(), None).unwrap();
        Alignment::compute(&question, &passage, 4, &TreeEditDistance::new(true))
    }

    #[test]
    fn test_token_edits() {
        let alignment = alignment();
        assert_eq!(alignment.cost, 2);
        assert_eq!(alignment.distance, 2.0 / 9.0);

        assert_eq!(
            alignment.edit(0),
            Some(&TokenEdit {
                kind: EditKind::Rename,
                rename_to: Some("what".to_string()),
            })
        );
        assert_eq!(alignment.edit(1).map(|e| e.kind), Some(EditKind::Keep));
        assert_eq!(alignment.edit(2).map(|e| e.kind), Some(EditKind::Keep));
        assert_eq!(alignment.edit(3).map(|e| e.kind), Some(EditKind::Delete));
        assert!(alignment.edit(4).is_none());
    }

    #[test]
    fn test_features_conjoin_built_features() {
        let alignment = alignment();
        let tokens = passage_tokens();
        let built = vec![Feature::new("pos", "NNP")];
        let features = alignment.extract(&TokenContext {
            tokens: &tokens,
            index: 0,
            built: &built,
        });

        assert_eq!(
            features,
            vec![
                Feature::new("align:op", "rename"),
                Feature::new("align:renameTo", "what"),
                Feature::new("align:distance", 2.0 / 9.0),
                Feature::new("align:rename|pos", "NNP"),
            ]
        );
    }

    #[test]
    fn test_missing_tree_means_no_alignment() {
        let passage = build_sentence_tree(&passage_tokens(), None);
        let distance = TreeEditDistance::default();
        assert!(align(None, passage.as_ref(), 4, &distance).is_none());
        assert!(align(passage.as_ref(), None, 4, &distance).is_none());
        assert!(align(passage.as_ref(), passage.as_ref(), 4, &distance).is_some());
    }
}
