//! The answer B-I-O tagger.
//!
//! Labels passage tokens with B-I-O outcomes with respect to the answer
//! mention type, so it behaves like a custom "answer named entity"
//! recognizer that can use question-specific features. Per search result:
//!
//! 1. the question's allowed LATs and dependency tree are prepared once;
//! 2. every passage gets its own dependency tree, aligned to the question;
//! 3. every token gets base, n-gram and alignment features, all of them
//!    also specialized by each LAT;
//! 4. the per-token feature lists either become a training instance (with
//!    labels encoded from the gold mentions) or are classified and decoded
//!    into new answer mentions.

use layered_tree_edit::{LabeledTree, TreeEditDistance};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    align, build_sentence_tree, build_tree, Alignment, AnnotationContext, BioChunking, Feature,
    FeaturePipeline, LatExpansion, LatSet, NgramExtractor, Passage, PassagesView, QuestionView,
    SequenceClassifier, TaggerConfig, TaggerError, TaggerResult, Token, TokenAttribute,
    TokenFeatureExtractor, TrainingInstance, TrainingSink,
};

/// Selects what the tagger does with the features it builds.
pub enum TaggerMode<'m> {
    /// Encode gold mentions and write training instances.
    Training(&'m mut dyn TrainingSink),
    /// Classify tokens and add the decoded mentions to the passages view.
    Inference(&'m dyn SequenceClassifier),
}

/// Counters describing one [`BioTagger::process`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Passages seen
    pub passages: usize,
    /// Passages that received alignment features
    pub aligned: usize,
    /// Passages skipped: no tokens, or no gold mentions while training
    pub skipped: usize,
    /// Training instances written
    pub trained: usize,
    /// Passages sent to the classifier
    pub classified: usize,
    /// Answer mentions added to the passages view
    pub mentions: usize,
}

/// Feature lists of one passage.
#[derive(Debug, Clone)]
pub struct PassageFeatures {
    pub passage: Passage,
    /// One list per token
    pub features: Vec<Vec<Feature>>,
    pub aligned: bool,
}

/// B-I-O answer tagger.
pub struct BioTagger {
    config: TaggerConfig,
    token_features: TokenFeatureExtractor,
    ngram_features: Vec<NgramExtractor>,
    chunking: BioChunking,
    distance: TreeEditDistance,
}

impl Default for BioTagger {
    fn default() -> Self {
        Self::new(TaggerConfig::default())
    }
}

impl BioTagger {
    pub fn new(config: TaggerConfig) -> Self {
        let ngram_features = TokenAttribute::ALL
            .iter()
            .flat_map(|attr| NgramExtractor::family(*attr))
            .collect();

        Self {
            distance: TreeEditDistance::new(config.normalized_distance),
            config,
            token_features: TokenFeatureExtractor::default(),
            ngram_features,
            chunking: BioChunking::new(),
        }
    }

    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }

    /// Allowed, deduplicated LATs of the question.
    pub fn specializing_lats(&self, question: &QuestionView) -> LatSet {
        LatSet::from_lats(question.lats(), &self.config.lat_allow_list)
    }

    /// Tag every passage of the search result.
    pub fn process<C>(&self, ctx: &mut C, mode: &mut TaggerMode<'_>) -> TaggerResult<ProcessSummary>
    where
        C: AnnotationContext + ?Sized,
    {
        let question = ctx.question_view()?;
        let lats = self.specializing_lats(question);
        let question_tree = if self.config.alignment {
            build_sentence_tree(question.tokens(), self.config.max_tree_tokens)
        } else {
            None
        };
        debug!(
            lats = ?lats.iter().collect::<Vec<_>>(),
            question_tree = question_tree.is_some(),
            "prepared question"
        );

        let view = ctx.passages_view()?;
        let featurized = self.featurize_passages(view, &lats, question_tree.as_ref())?;

        let mut summary = ProcessSummary::default();
        let mut predicted = Vec::new();
        for passage_features in featurized {
            summary.passages += 1;
            if passage_features.aligned {
                summary.aligned += 1;
            }

            let PassageFeatures {
                passage, features, ..
            } = passage_features;
            if features.is_empty() {
                trace!(?passage.range, "skipping passage without tokens");
                summary.skipped += 1;
                continue;
            }

            match mode {
                TaggerMode::Training(sink) => {
                    // only answer-bearing passages are trained on
                    let gold = view.mentions_covered(&passage);
                    if gold.is_empty() {
                        trace!(?passage.range, "skipping passage without gold mentions");
                        summary.skipped += 1;
                        continue;
                    }
                    let labels = self.chunking.encode(&passage, &gold);
                    sink.write(TrainingInstance { features, labels })?;
                    summary.trained += 1;
                }
                TaggerMode::Inference(classifier) => {
                    let labels = classifier.classify(&features)?;
                    if labels.len() != features.len() {
                        return Err(TaggerError::LabelCountMismatch {
                            expected: features.len(),
                            found: labels.len(),
                        });
                    }
                    let mentions = self.chunking.decode(&passage, &labels);
                    debug!(
                        ?passage.range,
                        mentions = mentions.len(),
                        "classified passage"
                    );
                    predicted.extend(mentions);
                    summary.classified += 1;
                }
            }
        }

        if !predicted.is_empty() {
            let view = ctx.passages_view_mut()?;
            for mention in predicted {
                view.add_mention(mention)?;
                summary.mentions += 1;
            }
        }

        debug!(?summary, "tagged search result");
        Ok(summary)
    }

    /// Feature lists for every passage of the view, in passage order.
    pub fn featurize_passages(
        &self,
        view: &PassagesView,
        lats: &LatSet,
        question_tree: Option<&LabeledTree>,
    ) -> TaggerResult<Vec<PassageFeatures>> {
        if self.config.parallel {
            view.passages()
                .par_iter()
                .map(|passage| self.featurize_passage(view, passage, lats, question_tree))
                .collect()
        } else {
            view.passages()
                .iter()
                .map(|passage| self.featurize_passage(view, passage, lats, question_tree))
                .collect()
        }
    }

    /// Feature lists of one passage, aligned against the question tree
    /// when both trees can be built.
    pub fn featurize_passage(
        &self,
        view: &PassagesView,
        passage: &Passage,
        lats: &LatSet,
        question_tree: Option<&LabeledTree>,
    ) -> TaggerResult<PassageFeatures> {
        let tokens = view.tokens_covered(passage)?;

        let alignment = if self.config.alignment {
            // the tree may be missing, e.g. when the parser hit its token limit
            let passage_tree = build_tree(view.tokens(), passage.range, self.config.max_tree_tokens);
            align(question_tree, passage_tree.as_ref(), tokens.len(), &self.distance)
        } else {
            None
        };
        if let Some(alignment) = &alignment {
            trace!(?passage.range, distance = alignment.distance, "aligned passage");
        }

        Ok(PassageFeatures {
            passage: *passage,
            features: self.featurize_tokens(tokens, alignment.as_ref(), lats),
            aligned: alignment.is_some(),
        })
    }

    /// Base, n-gram and (optional) alignment features of every token, plus
    /// their LAT-specialized copies.
    pub fn featurize_tokens(
        &self,
        tokens: &[Token],
        alignment: Option<&Alignment>,
        lats: &LatSet,
    ) -> Vec<Vec<Feature>> {
        let lat_expansion = LatExpansion::new(lats);

        let mut pipeline = FeaturePipeline::new().stage(&self.token_features);
        for ngram in &self.ngram_features {
            pipeline.push(ngram);
        }
        if let Some(alignment) = alignment {
            pipeline.push(alignment);
        }
        pipeline.push(&lat_expansion);

        pipeline.extract_all(tokens)
    }
}
