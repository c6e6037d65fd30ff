//! Context n-grams over token attributes.
//!
//! Each [`NgramWindow`] picks a fixed set of offsets around the focus token
//! and joins the attribute values found there into one feature named
//! `<attr>[<offsets>]`, e.g. `pos[-1,0]` = `DT_NN`.

use crate::{Feature, FeatureExtractor, TokenAttribute, TokenContext};

/// Joins token-level values inside one n-gram.
pub const NGRAM_JOINER: &str = "_";

/// The window shapes, relative to the focus token at offset 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NgramWindow {
    Focus,
    // Shifted unigrams
    Next,
    SecondNext,
    Prev,
    SecondPrev,
    // Bigrams
    FocusNext,
    NextPair,
    PrevFocus,
    PrevPair,
    // Trigrams
    FocusNextPair,
    PrevPairFocus,
}

impl NgramWindow {
    pub const ALL: [NgramWindow; 11] = [
        NgramWindow::Focus,
        NgramWindow::Next,
        NgramWindow::SecondNext,
        NgramWindow::Prev,
        NgramWindow::SecondPrev,
        NgramWindow::FocusNext,
        NgramWindow::NextPair,
        NgramWindow::PrevFocus,
        NgramWindow::PrevPair,
        NgramWindow::FocusNextPair,
        NgramWindow::PrevPairFocus,
    ];

    pub fn offsets(&self) -> &'static [isize] {
        match self {
            NgramWindow::Focus => &[0],
            NgramWindow::Next => &[1],
            NgramWindow::SecondNext => &[2],
            NgramWindow::Prev => &[-1],
            NgramWindow::SecondPrev => &[-2],
            NgramWindow::FocusNext => &[0, 1],
            NgramWindow::NextPair => &[1, 2],
            NgramWindow::PrevFocus => &[-1, 0],
            NgramWindow::PrevPair => &[-2, -1],
            NgramWindow::FocusNextPair => &[0, 1, 2],
            NgramWindow::PrevPairFocus => &[-2, -1, 0],
        }
    }

    /// Offsets rendered for the feature name, e.g. `-2,-1`.
    pub fn shape(&self) -> String {
        self.offsets()
            .iter()
            .map(|o| if *o > 0 { format!("+{}", o) } else { o.to_string() })
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// One attribute over one window.
#[derive(Debug, Clone)]
pub struct NgramExtractor {
    attribute: TokenAttribute,
    window: NgramWindow,
    name: String,
}

impl NgramExtractor {
    pub fn new(attribute: TokenAttribute, window: NgramWindow) -> Self {
        Self {
            attribute,
            window,
            name: format!("{}[{}]", attribute.name(), window.shape()),
        }
    }

    /// All window shapes for one attribute.
    pub fn family(attribute: TokenAttribute) -> Vec<NgramExtractor> {
        NgramWindow::ALL
            .iter()
            .map(|window| NgramExtractor::new(attribute, *window))
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FeatureExtractor for NgramExtractor {
    fn extract(&self, ctx: &TokenContext<'_>) -> Vec<Feature> {
        let offsets = self.window.offsets();

        // Context positions that all fall outside the passage leave only
        // the focus (or nothing); such a window is not an n-gram.
        let has_context = offsets.iter().any(|o| *o != 0);
        if has_context
            && offsets
                .iter()
                .filter(|o| **o != 0)
                .all(|o| ctx.at_offset(*o).is_none())
        {
            return Vec::new();
        }

        let values: Vec<&str> = offsets
            .iter()
            .filter_map(|o| ctx.at_offset(*o))
            .filter_map(|token| self.attribute.value(token))
            .collect();
        if values.is_empty() {
            return Vec::new();
        }

        vec![Feature::new(self.name.as_str(), values.join(NGRAM_JOINER))]
    }
}
