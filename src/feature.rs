//! Named token features and the extractor pipeline.
//!
//! Every kind of feature (token attributes, context n-grams, tree
//! alignment, LAT specialization) is produced by a [`FeatureExtractor`].
//! A [`FeaturePipeline`] runs its stages in order for each token and unions
//! their output, letting later stages see what earlier stages built.

use std::fmt;

use crate::Token;

/// The value of a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Text(text) => f.write_str(text),
            FeatureValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FeatureValue {
    fn from(text: &str) -> Self {
        FeatureValue::Text(text.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(text: String) -> Self {
        FeatureValue::Text(text)
    }
}

impl From<f64> for FeatureValue {
    fn from(n: f64) -> Self {
        FeatureValue::Number(n)
    }
}

/// A named feature. Several features may share a name.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub value: FeatureValue,
}

impl Feature {
    pub fn new(name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// A focus token inside its passage, plus the features built for it so far.
#[derive(Debug, Clone, Copy)]
pub struct TokenContext<'a> {
    /// Tokens of the passage, in order
    pub tokens: &'a [Token],
    /// Position of the focus token within `tokens`
    pub index: usize,
    /// Features produced by earlier pipeline stages for this token
    pub built: &'a [Feature],
}

impl<'a> TokenContext<'a> {
    pub fn focus(&self) -> &'a Token {
        &self.tokens[self.index]
    }

    /// Token at a signed offset from the focus, `None` outside the passage.
    pub fn at_offset(&self, offset: isize) -> Option<&'a Token> {
        let idx = self.index as isize + offset;
        if idx < 0 {
            return None;
        }
        self.tokens.get(idx as usize)
    }
}

/// Produces features for one token in context.
pub trait FeatureExtractor: Send + Sync {
    fn extract(&self, ctx: &TokenContext<'_>) -> Vec<Feature>;
}

/// Token attributes used as base features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenAttribute {
    PartOfSpeech,
    NamedEntity,
    Dependency,
}

impl TokenAttribute {
    pub const ALL: [TokenAttribute; 3] = [
        TokenAttribute::PartOfSpeech,
        TokenAttribute::NamedEntity,
        TokenAttribute::Dependency,
    ];

    /// Feature name of this attribute.
    pub fn name(&self) -> &'static str {
        match self {
            TokenAttribute::PartOfSpeech => "pos",
            TokenAttribute::NamedEntity => "ne",
            TokenAttribute::Dependency => "dep",
        }
    }

    pub fn value<'t>(&self, token: &'t Token) -> Option<&'t str> {
        match self {
            TokenAttribute::PartOfSpeech => Some(token.pos.as_str()),
            TokenAttribute::NamedEntity => token.ne_type.as_deref(),
            TokenAttribute::Dependency => token.dependency.as_ref().map(|d| d.relation.as_str()),
        }
    }
}

/// Emits the focus token's own attributes: `pos`, `ne`, `dep`.
#[derive(Debug, Clone)]
pub struct TokenFeatureExtractor {
    attributes: Vec<TokenAttribute>,
}

impl Default for TokenFeatureExtractor {
    fn default() -> Self {
        Self {
            attributes: TokenAttribute::ALL.to_vec(),
        }
    }
}

impl TokenFeatureExtractor {
    pub fn new(attributes: Vec<TokenAttribute>) -> Self {
        Self { attributes }
    }
}

impl FeatureExtractor for TokenFeatureExtractor {
    fn extract(&self, ctx: &TokenContext<'_>) -> Vec<Feature> {
        let focus = ctx.focus();
        self.attributes
            .iter()
            .filter_map(|attr| attr.value(focus).map(|v| Feature::new(attr.name(), v)))
            .collect()
    }
}

/// Ordered extractor stages whose outputs are unioned per token.
#[derive(Default)]
pub struct FeaturePipeline<'e> {
    stages: Vec<&'e dyn FeatureExtractor>,
}

impl<'e> FeaturePipeline<'e> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn stage(mut self, extractor: &'e dyn FeatureExtractor) -> Self {
        self.stages.push(extractor);
        self
    }

    pub fn push(&mut self, extractor: &'e dyn FeatureExtractor) {
        self.stages.push(extractor);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Features of one token.
    pub fn extract_token(&self, tokens: &[Token], index: usize) -> Vec<Feature> {
        let mut features = Vec::new();
        for stage in &self.stages {
            let produced = stage.extract(&TokenContext {
                tokens,
                index,
                built: &features,
            });
            features.extend(produced);
        }
        features
    }

    /// One feature list per token, in token order.
    pub fn extract_all(&self, tokens: &[Token]) -> Vec<Vec<Feature>> {
        (0..tokens.len())
            .map(|index| self.extract_token(tokens, index))
            .collect()
    }
}
