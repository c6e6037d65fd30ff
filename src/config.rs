//! Tagger configuration, loadable from TOML.
//!
//! ```toml
//! lat_allow_list = ["date", "person", "location"]
//! alignment = true
//! max_tree_tokens = 200
//! normalized_distance = true
//! parallel = false
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::{TaggerError, TaggerResult, DEFAULT_LAT_ALLOW_LIST};

/// Configuration for [`crate::BioTagger`]. Every field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaggerConfig {
    /// LATs allowed to specialize features.
    pub lat_allow_list: Vec<String>,
    /// Compute tree alignment features.
    pub alignment: bool,
    /// Spans longer than this get no dependency tree (mirrors parser limits).
    pub max_tree_tokens: Option<usize>,
    /// Normalize the tree edit distance into `[0, 1]`.
    pub normalized_distance: bool,
    /// Featurize the passages of a question in parallel.
    pub parallel: bool,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            lat_allow_list: DEFAULT_LAT_ALLOW_LIST.iter().map(|s| s.to_string()).collect(),
            alignment: true,
            max_tree_tokens: None,
            normalized_distance: true,
            parallel: false,
        }
    }
}

impl TaggerConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> TaggerResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| TaggerError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| TaggerError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Parse from TOML text.
    pub fn from_toml_str(content: &str) -> TaggerResult<Self> {
        toml::from_str(content).map_err(|e| TaggerError::Config {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn with_alignment(mut self, alignment: bool) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_tree_tokens(mut self, max_tree_tokens: Option<usize>) -> Self {
        self.max_tree_tokens = max_tree_tokens;
        self
    }
}
