//! Error types for the answer tagger.
//!
//! Feature construction itself never fails; errors come from the
//! annotation views the tagger reads and writes, from the external sequence
//! model, and from configuration loading.

use thiserror::Error;

/// Errors that can occur while tagging passages.
#[derive(Debug, Error)]
pub enum TaggerError {
    /// A required annotation view is not available.
    #[error("missing annotation view: {0}")]
    MissingView(&'static str),

    /// A passage or mention span does not fit the view's token list.
    #[error("span {start}..={end} lies outside a view of {len} tokens")]
    SpanOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },

    /// A span whose end lies before its start.
    #[error("span {start}..={end} is inverted")]
    InvertedSpan { start: usize, end: usize },

    /// The classifier returned a label sequence of the wrong length.
    #[error("classifier returned {found} labels for {expected} tokens")]
    LabelCountMismatch { expected: usize, found: usize },

    /// The external sequence model failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Configuration could not be read or parsed.
    #[error("failed to load config: {path}: {message}")]
    Config { path: String, message: String },
}

/// Result type for tagger operations.
pub type TaggerResult<T> = Result<T, TaggerError>;

/// Failures reported by a sequence model implementation.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("training sink rejected instance: {0}")]
    Sink(String),

    #[error("classification failed: {0}")]
    Classify(String),
}

/// A label string that is not one of the B-I-O outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown BIO label: {0:?}")]
pub struct LabelParseError(pub String);
