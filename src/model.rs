//! Seams to the external sequence model.
//!
//! The tagger never looks inside the model: at training time it writes
//! instances to a [`TrainingSink`], at inference time it asks a
//! [`SequenceClassifier`] for one label per token.

use crate::{BioLabel, Feature, LabelSequence, ModelError};

/// Features and gold labels of one passage, aligned per token.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingInstance {
    pub features: Vec<Vec<Feature>>,
    pub labels: LabelSequence,
}

impl TrainingInstance {
    /// Per-token `(features, outcome)` pairs.
    pub fn tokens(&self) -> impl Iterator<Item = (&[Feature], &BioLabel)> {
        self.features
            .iter()
            .map(Vec::as_slice)
            .zip(self.labels.iter())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Receives training instances.
pub trait TrainingSink {
    fn write(&mut self, instance: TrainingInstance) -> Result<(), ModelError>;
}

/// Predicts one label per token from per-token feature lists.
pub trait SequenceClassifier: Send + Sync {
    fn classify(&self, features: &[Vec<Feature>]) -> Result<LabelSequence, ModelError>;
}

/// In-memory sink collecting instances for a later batch `train` call.
#[derive(Debug, Clone, Default)]
pub struct InstanceCollector {
    instances: Vec<TrainingInstance>,
}

impl InstanceCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instances(&self) -> &[TrainingInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn into_instances(self) -> Vec<TrainingInstance> {
        self.instances
    }
}

impl TrainingSink for InstanceCollector {
    fn write(&mut self, instance: TrainingInstance) -> Result<(), ModelError> {
        self.instances.push(instance);
        Ok(())
    }
}
