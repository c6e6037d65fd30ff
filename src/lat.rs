//! Question-specific feature specialization by lexical answer type (LAT).
//!
//! Each base feature is crossed with every allowed LAT of the question so
//! the model can learn weights per class of questions. The base features
//! stay in place, giving a baseline for LATs the model never saw.

use std::collections::BTreeSet;

use crate::{Feature, FeatureExtractor, Lat, TokenContext};

/// The most frequent focus LATs of the training questions. Other LATs are
/// dropped to keep the feature space small.
pub const DEFAULT_LAT_ALLOW_LIST: &[&str] = &[
    "color", "number", "state", "year", "location", "die", "country", "person", "city", "amount",
    "date", "time",
];

/// Separates the LAT from the base feature name.
pub const LAT_SEPARATOR: char = '|';

/// Deduplicated, allowed LAT texts of one question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatSet {
    lats: BTreeSet<String>,
}

impl LatSet {
    pub fn from_lats<S: AsRef<str>>(lats: &[Lat], allow_list: &[S]) -> Self {
        let lats = lats
            .iter()
            .filter(|lat| allow_list.iter().any(|allowed| allowed.as_ref() == lat.text))
            .map(|lat| lat.text.clone())
            .collect();
        Self { lats }
    }

    pub fn len(&self) -> usize {
        self.lats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lats.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.lats.contains(text)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lats.iter().map(String::as_str)
    }

    /// Cross every feature with every LAT, `<lat>|<name>`. Only the new
    /// features are returned.
    pub fn expand(&self, features: &[Feature]) -> Vec<Feature> {
        let mut expanded = Vec::with_capacity(features.len() * self.lats.len());
        for feature in features {
            for lat in &self.lats {
                expanded.push(Feature {
                    name: format!("{}{}{}", lat, LAT_SEPARATOR, feature.name),
                    value: feature.value.clone(),
                });
            }
        }
        expanded
    }
}

/// Pipeline stage applying [`LatSet::expand`] to everything built so far.
#[derive(Debug, Clone, Copy)]
pub struct LatExpansion<'a> {
    lats: &'a LatSet,
}

impl<'a> LatExpansion<'a> {
    pub fn new(lats: &'a LatSet) -> Self {
        Self { lats }
    }
}

impl<'a> FeatureExtractor for LatExpansion<'a> {
    fn extract(&self, ctx: &TokenContext<'_>) -> Vec<Feature> {
        self.lats.expand(ctx.built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lats(texts: &[&str]) -> Vec<Lat> {
        texts.iter().map(|t| Lat::new(*t)).collect()
    }

    #[test]
    fn test_only_allowed_lats_are_kept() {
        let set = LatSet::from_lats(&lats(&["date", "rock"]), DEFAULT_LAT_ALLOW_LIST);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["date"]);

        let expanded = set.expand(&[Feature::new("pos", "NNP"), Feature::new("ne", "DATE")]);
        assert_eq!(
            expanded,
            vec![
                Feature::new("date|pos", "NNP"),
                Feature::new("date|ne", "DATE"),
            ]
        );
        assert!(expanded.iter().all(|f| !f.name.starts_with("rock|")));
    }

    #[test]
    fn test_duplicate_lats_expand_once() {
        let set = LatSet::from_lats(&lats(&["person", "person", "city"]), DEFAULT_LAT_ALLOW_LIST);
        assert_eq!(set.len(), 2);

        let expanded = set.expand(&[Feature::new("pos", "NNP")]);
        assert_eq!(
            expanded,
            vec![
                Feature::new("city|pos", "NNP"),
                Feature::new("person|pos", "NNP"),
            ]
        );
    }

    #[test]
    fn test_no_allowed_lats_expand_nothing() {
        let set = LatSet::from_lats(&lats(&["rock", "band"]), DEFAULT_LAT_ALLOW_LIST);
        assert!(set.is_empty());
        assert!(set.expand(&[Feature::new("pos", "NN")]).is_empty());
    }

    #[test]
    fn test_custom_allow_list() {
        let allow = vec!["rock".to_string()];
        let set = LatSet::from_lats(&lats(&["date", "rock"]), &allow);
        assert!(set.contains("rock"));
        assert!(!set.contains("date"));
    }

    #[test]
    fn test_numeric_values_are_kept() {
        let set = LatSet::from_lats(&lats(&["year"]), DEFAULT_LAT_ALLOW_LIST);
        let expanded = set.expand(&[Feature::new("align:distance", 0.25)]);
        assert_eq!(expanded, vec![Feature::new("year|align:distance", 0.25)]);
    }
}
