#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Answer span tagging for question answering.
//!
//! Given a question and the passages retrieved for it, the tagger labels
//! every passage token as Begin / Inside / Outside of an answer, using
//! features that depend on the question.
//!
//! ## Annotation Views
//!
//! - [`QuestionView`] - Question tokens and lexical answer types (LATs)
//! - [`PassagesView`] - Passage tokens, passage spans and [`AnswerMention`]s
//! - [`AnnotationContext`] - Access to both views of one search result
//!
//! ## Features
//!
//! - [`TokenFeatureExtractor`] - Part-of-speech, named entity and dependency type
//! - [`NgramExtractor`] - The same attributes over context windows
//! - [`Alignment`] - Edit operations aligning the passage tree to the question tree
//! - [`LatExpansion`] - Copies of every feature specialized by LAT
//!
//! ## Tagging
//!
//! - [`BioChunking`] - Mentions to labels and back
//! - [`BioTagger`] - Runs the feature pipeline and either writes training
//!   instances to a [`TrainingSink`] or classifies with a [`SequenceClassifier`]
//!
//! ## Example
//!
//! ```
//! use layered_answer_tagger::{
//!     BioTagger, InstanceCollector, PassagesView, QuestionView, SearchResult, TaggerMode, Token,
//!     TokenRange,
//! };
//!
//! let question = QuestionView::new(vec![
//!     Token::new("When", "WRB"),
//!     Token::new("did", "VBD"),
//!     Token::new("it", "PRP"),
//!     Token::new("start", "VB"),
//! ])
//! .with_lat("date");
//! let passages = PassagesView::new(vec![
//!     Token::new("It", "PRP"),
//!     Token::new("started", "VBD"),
//!     Token::new("in", "IN"),
//!     Token::new("1962", "CD").with_ne_type("DATE"),
//! ])
//! .with_passage(TokenRange::new(0, 3))?
//! .with_mention(TokenRange::single(3))?;
//!
//! let mut result = SearchResult::new(question, passages);
//! let mut collector = InstanceCollector::new();
//! let summary = BioTagger::default().process(&mut result, &mut TaggerMode::Training(&mut collector))?;
//!
//! assert_eq!(summary.trained, 1);
//! assert_eq!(collector.instances()[0].labels.last().map(|l| l.outcome()), Some("B-ans".to_string()));
//! # Ok::<(), layered_answer_tagger::TaggerError>(())
//! ```

mod alignment;
mod chunking;
mod config;
mod display;
mod errors;
mod feature;
mod lat;
mod model;
mod ngram;
mod tagger;
mod token;
mod tree;
mod view;

pub use alignment::{align, Alignment, TokenEdit, ALIGN_PREFIX};
pub use chunking::{parse_outcomes, BioChunking, BioLabel, LabelSequence};
pub use config::TaggerConfig;
pub use display::PassageDisplay;
pub use errors::{LabelParseError, ModelError, TaggerError, TaggerResult};
pub use feature::{
    Feature, FeatureExtractor, FeaturePipeline, FeatureValue, TokenAttribute, TokenContext,
    TokenFeatureExtractor,
};
pub use lat::{LatExpansion, LatSet, DEFAULT_LAT_ALLOW_LIST, LAT_SEPARATOR};
pub use model::{InstanceCollector, SequenceClassifier, TrainingInstance, TrainingSink};
pub use ngram::{NgramExtractor, NgramWindow, NGRAM_JOINER};
pub use tagger::{BioTagger, PassageFeatures, ProcessSummary, TaggerMode};
pub use token::{Dependency, Token, TokenRange};
pub use tree::{build_sentence_tree, build_tree, ROOT_LABEL};
pub use view::{
    AnnotationContext, AnswerMention, Lat, Passage, PassagesView, QuestionView, SearchResult,
    ANSWER_MENTION_TYPE,
};

pub use layered_tree_edit::{EditKind, LabeledTree, TreeEditDistance};
