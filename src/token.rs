//! Upstream token annotations.
//!
//! Tokens arrive fully annotated (POS tag, named-entity type, dependency
//! arc) and are never mutated by the tagger.

/// A dependency arc governing a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Relation label, e.g. `nsubj`
    pub relation: String,
    /// Index of the governing token within the same view; `None` for the
    /// sentence root
    pub head: Option<usize>,
}

/// A single annotated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lemma: Option<String>,
    /// Part-of-speech tag
    pub pos: String,
    /// Type of the named entity covering this token, if any
    pub ne_type: Option<String>,
    pub dependency: Option<Dependency>,
}

impl Token {
    pub fn new(text: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lemma: None,
            pos: pos.into(),
            ne_type: None,
            dependency: None,
        }
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    pub fn with_ne_type(mut self, ne_type: impl Into<String>) -> Self {
        self.ne_type = Some(ne_type.into());
        self
    }

    pub fn with_dependency(mut self, relation: impl Into<String>, head: Option<usize>) -> Self {
        self.dependency = Some(Dependency {
            relation: relation.into(),
            head,
        });
        self
    }

    /// Lemma, falling back to the lowercased surface text.
    pub fn lemma_or_text(&self) -> String {
        match &self.lemma {
            Some(lemma) => lemma.clone(),
            None => self.text.to_lowercase(),
        }
    }
}

/// Inclusive token index range, `(start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenRange {
    pub start: usize,
    pub end: usize,
}

#[allow(clippy::len_without_is_empty)]
impl TokenRange {
    /// # Panics
    ///
    /// Panics if `end < start`; a range always covers at least one token.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "token range {}..={} is inverted", start, end);
        Self { start, end }
    }

    pub fn single(idx: usize) -> Self {
        Self::new(idx, idx)
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.start <= idx && idx <= self.end
    }

    /// True if `other` lies entirely within this range.
    pub fn covers(&self, other: &TokenRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn overlaps(&self, other: &TokenRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Shift into coordinates relative to `base.start`.
    pub fn relative_to(&self, base: &TokenRange) -> TokenRange {
        TokenRange::new(self.start - base.start, self.end - base.start)
    }

    /// Shift from coordinates relative to `base.start` back to absolute ones.
    pub fn absolute_from(&self, base: &TokenRange) -> TokenRange {
        TokenRange::new(self.start + base.start, self.end + base.start)
    }
}
