//! Annotation views the tagger reads from and writes to.
//!
//! A search result carries two views: the question (tokens plus lexical
//! answer types) and the picked passages (tokens, passage spans and answer
//! mentions). Passages and mentions are typed spans over the passages
//! view's token list.

use crate::{TaggerError, TaggerResult, Token, TokenRange};

/// Type label carried by every answer mention.
pub const ANSWER_MENTION_TYPE: &str = "ans";

/// A lexical answer type attached to the question, e.g. `date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lat {
    pub text: String,
}

impl Lat {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The question being answered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionView {
    tokens: Vec<Token>,
    lats: Vec<Lat>,
}

impl QuestionView {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            lats: Vec::new(),
        }
    }

    pub fn with_lat(mut self, text: impl Into<String>) -> Self {
        self.lats.push(Lat::new(text));
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn lats(&self) -> &[Lat] {
        &self.lats
    }
}

/// A candidate passage, spanning tokens of the passages view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Passage {
    pub range: TokenRange,
}

/// An answer-bearing span: gold at training time, predicted at inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnswerMention {
    pub range: TokenRange,
}

impl AnswerMention {
    pub fn new(range: TokenRange) -> Self {
        Self { range }
    }

    pub fn mention_type(&self) -> &'static str {
        ANSWER_MENTION_TYPE
    }
}

/// Tokens, passages and answer mentions of the retrieved text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassagesView {
    tokens: Vec<Token>,
    passages: Vec<Passage>,
    mentions: Vec<AnswerMention>,
}

impl PassagesView {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            passages: Vec::new(),
            mentions: Vec::new(),
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    /// All mentions in insertion order.
    pub fn mentions(&self) -> &[AnswerMention] {
        &self.mentions
    }

    pub fn add_passage(&mut self, range: TokenRange) -> TaggerResult<Passage> {
        self.check_bounds(&range)?;
        let passage = Passage { range };
        self.passages.push(passage);
        Ok(passage)
    }

    pub fn add_mention(&mut self, mention: AnswerMention) -> TaggerResult<()> {
        self.check_bounds(&mention.range)?;
        self.mentions.push(mention);
        Ok(())
    }

    /// Builder form of [`PassagesView::add_passage`].
    pub fn with_passage(mut self, range: TokenRange) -> TaggerResult<Self> {
        self.add_passage(range)?;
        Ok(self)
    }

    /// Builder form of [`PassagesView::add_mention`].
    pub fn with_mention(mut self, range: TokenRange) -> TaggerResult<Self> {
        self.add_mention(AnswerMention::new(range))?;
        Ok(self)
    }

    /// Tokens covered by the passage.
    pub fn tokens_covered(&self, passage: &Passage) -> TaggerResult<&[Token]> {
        self.check_bounds(&passage.range)?;
        Ok(&self.tokens[passage.range.start..=passage.range.end])
    }

    /// Mentions lying entirely within the passage, ordered by position.
    pub fn mentions_covered(&self, passage: &Passage) -> Vec<AnswerMention> {
        let mut covered: Vec<_> = self
            .mentions
            .iter()
            .filter(|m| passage.range.covers(&m.range))
            .copied()
            .collect();
        covered.sort();
        covered
    }

    fn check_bounds(&self, range: &TokenRange) -> TaggerResult<()> {
        if range.start > range.end {
            return Err(TaggerError::InvertedSpan {
                start: range.start,
                end: range.end,
            });
        }
        if range.end >= self.tokens.len() {
            return Err(TaggerError::SpanOutOfBounds {
                start: range.start,
                end: range.end,
                len: self.tokens.len(),
            });
        }
        Ok(())
    }
}

/// Access to the views of one search result.
///
/// Failing to produce a view is fatal for the whole result.
pub trait AnnotationContext {
    fn question_view(&self) -> TaggerResult<&QuestionView>;
    fn passages_view(&self) -> TaggerResult<&PassagesView>;
    fn passages_view_mut(&mut self) -> TaggerResult<&mut PassagesView>;
}

/// In-memory search result holding both views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    question: Option<QuestionView>,
    passages: Option<PassagesView>,
}

impl SearchResult {
    pub fn new(question: QuestionView, passages: PassagesView) -> Self {
        Self {
            question: Some(question),
            passages: Some(passages),
        }
    }

    /// A result whose passages view was never produced upstream.
    pub fn without_passages(question: QuestionView) -> Self {
        Self {
            question: Some(question),
            passages: None,
        }
    }
}

impl AnnotationContext for SearchResult {
    fn question_view(&self) -> TaggerResult<&QuestionView> {
        self.question
            .as_ref()
            .ok_or(TaggerError::MissingView("Question"))
    }

    fn passages_view(&self) -> TaggerResult<&PassagesView> {
        self.passages
            .as_ref()
            .ok_or(TaggerError::MissingView("PickedPassages"))
    }

    fn passages_view_mut(&mut self) -> TaggerResult<&mut PassagesView> {
        self.passages
            .as_mut()
            .ok_or(TaggerError::MissingView("PickedPassages"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| Token::new(*w, "NN")).collect()
    }

    #[test]
    fn test_tokens_and_mentions_covered() {
        let view = PassagesView::new(tokens(&["a", "b", "c", "d", "e"]))
            .with_passage(TokenRange::new(0, 2))
            .unwrap()
            .with_passage(TokenRange::new(3, 4))
            .unwrap()
            .with_mention(TokenRange::new(4, 4))
            .unwrap()
            .with_mention(TokenRange::new(1, 2))
            .unwrap()
            .with_mention(TokenRange::new(2, 3))
            .unwrap();

        let first = view.passages()[0];
        let covered: Vec<_> = view
            .tokens_covered(&first)
            .unwrap()
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(covered, vec!["a", "b", "c"]);

        // the 2..=3 mention straddles both passages and belongs to neither
        assert_eq!(
            view.mentions_covered(&first),
            vec![AnswerMention::new(TokenRange::new(1, 2))]
        );
        assert_eq!(
            view.mentions_covered(&view.passages()[1]),
            vec![AnswerMention::new(TokenRange::new(4, 4))]
        );
    }

    #[test]
    fn test_out_of_bounds_spans_are_rejected() {
        let mut view = PassagesView::new(tokens(&["a", "b"]));
        let err = view.add_passage(TokenRange::new(1, 2)).unwrap_err();
        assert!(matches!(
            err,
            TaggerError::SpanOutOfBounds { start: 1, end: 2, len: 2 }
        ));
        assert!(view.add_mention(AnswerMention::new(TokenRange::single(5))).is_err());
    }

    #[test]
    fn test_inverted_spans_are_rejected() {
        let mut view = PassagesView::new(tokens(&["a", "b", "c", "d", "e"]));
        let inverted = TokenRange { start: 4, end: 2 };

        assert!(matches!(
            view.add_passage(inverted),
            Err(TaggerError::InvertedSpan { start: 4, end: 2 })
        ));
        assert!(view
            .add_mention(AnswerMention { range: inverted })
            .is_err());
        assert!(matches!(
            view.tokens_covered(&Passage { range: inverted }),
            Err(TaggerError::InvertedSpan { .. })
        ));
        assert!(view.passages().is_empty());
        assert!(view.mentions().is_empty());
    }

    #[test]
    fn test_missing_views_are_errors() {
        let mut result = SearchResult::without_passages(QuestionView::default());
        assert!(result.question_view().is_ok());
        assert!(matches!(
            result.passages_view_mut(),
            Err(TaggerError::MissingView("PickedPassages"))
        ));
        assert!(matches!(
            SearchResult::default().question_view(),
            Err(TaggerError::MissingView("Question"))
        ));
    }
}
