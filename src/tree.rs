//! Dependency trees of questions and passages, as labeled ordered trees.

use layered_tree_edit::{LabeledTree, NodeId};

use crate::{Token, TokenRange};

/// Label of the artificial node every tree hangs from.
pub const ROOT_LABEL: &str = "ROOT";

/// Build the dependency tree of the tokens in `range`.
///
/// Node anchors are token positions relative to `range.start`, and sibling
/// order follows token order. Tokens governed by nothing, or by a token
/// outside the range, hang from the artificial root.
///
/// Returns `None` when the range holds no parsed token, exceeds
/// `max_tokens`, or when the dependency heads do not form a tree.
pub fn build_tree(
    tokens: &[Token],
    range: TokenRange,
    max_tokens: Option<usize>,
) -> Option<LabeledTree> {
    if range.end >= tokens.len() {
        return None;
    }
    let span = &tokens[range.start..=range.end];
    if max_tokens.map_or(false, |max| span.len() > max) {
        return None;
    }
    if span.iter().all(|t| t.dependency.is_none()) {
        return None;
    }

    // children[0] belongs to the artificial root; children[i + 1] to token i
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); span.len() + 1];
    for (idx, token) in span.iter().enumerate() {
        let parent = token
            .dependency
            .as_ref()
            .and_then(|dep| dep.head)
            .filter(|head| range.contains(*head) && *head != range.start + idx)
            .map_or(0, |head| head - range.start + 1);
        children[parent].push(idx);
    }

    let mut tree = LabeledTree::new(ROOT_LABEL);
    let mut stack: Vec<(NodeId, usize)> = children[0]
        .iter()
        .rev()
        .map(|&idx| (tree.root(), idx))
        .collect();
    let mut attached = 0;
    while let Some((parent, idx)) = stack.pop() {
        let node = tree.add_child(parent, span[idx].lemma_or_text(), Some(idx));
        attached += 1;
        for &child in children[idx + 1].iter().rev() {
            stack.push((node, child));
        }
    }

    // tokens caught in a head cycle never reach the root
    if attached != span.len() {
        return None;
    }
    Some(tree)
}

/// Build the dependency tree of a whole token list, e.g. the question.
pub fn build_sentence_tree(tokens: &[Token], max_tokens: Option<usize>) -> Option<LabeledTree> {
    if tokens.is_empty() {
        return None;
    }
    build_tree(tokens, TokenRange::new(0, tokens.len() - 1), max_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// "The capital of France is Paris" with absolute heads starting at `base`.
    fn parsed_passage(base: usize) -> Vec<Token> {
        vec![
            Token::new("The", "DT").with_dependency("det", Some(base + 1)),
            Token::new("capital", "NN").with_dependency("nsubj", Some(base + 4)),
            Token::new("of", "IN").with_dependency("prep", Some(base + 1)),
            Token::new("France", "NNP")
                .with_ne_type("LOCATION")
                .with_dependency("pobj", Some(base + 2)),
            Token::new("is", "VBZ")
                .with_lemma("be")
                .with_dependency("root", None),
            Token::new("Paris", "NNP")
                .with_ne_type("LOCATION")
                .with_dependency("attr", Some(base + 4)),
        ]
    }

    #[test]
    fn test_builds_dependency_tree() {
        let tokens = parsed_passage(0);
        let tree = build_sentence_tree(&tokens, None).unwrap();

        assert_eq!(tree.len(), tokens.len() + 1);
        assert_eq!(tree.to_string(), "{ROOT{be{capital{the}{of{france}}}{paris}}}");

        let paris = tree.find_anchor(5).unwrap();
        assert_eq!(tree[paris].label, "paris");
    }

    #[test]
    fn test_heads_outside_range_attach_to_root() {
        let mut tokens = vec![Token::new("Intro", "NN").with_dependency("root", None)];
        tokens.extend(parsed_passage(1));
        // "Paris" now points outside the passage
        tokens[6].dependency.as_mut().unwrap().head = Some(0);

        let tree = build_tree(&tokens, TokenRange::new(1, 6), None).unwrap();
        assert_eq!(tree.to_string(), "{ROOT{be{capital{the}{of{france}}}}{paris}}");
        assert_eq!(tree.find_anchor(0).map(|id| tree[id].label.as_str()), Some("the"));
    }

    #[test]
    fn test_unparsed_or_oversized_spans_have_no_tree() {
        let unparsed = vec![Token::new("Paris", "NNP"), Token::new("rocks", "VBZ")];
        assert!(build_sentence_tree(&unparsed, None).is_none());
        assert!(build_sentence_tree(&[], None).is_none());

        let tokens = parsed_passage(0);
        assert!(build_sentence_tree(&tokens, Some(5)).is_none());
        assert!(build_sentence_tree(&tokens, Some(6)).is_some());
    }

    #[test]
    fn test_head_cycle_has_no_tree() {
        let tokens = vec![
            Token::new("a", "DT").with_dependency("dep", Some(1)),
            Token::new("b", "NN").with_dependency("dep", Some(0)),
            Token::new("c", "NN").with_dependency("root", None),
        ];
        assert!(build_sentence_tree(&tokens, None).is_none());
    }
}
