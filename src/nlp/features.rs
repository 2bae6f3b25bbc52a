//! Feature extraction
//!
//! A text's features are the basic forms of its content words: tokens whose
//! POS is in the configured set and whose basic form is known.

use super::tokenizer::MorphAnalyzer;
use crate::errors::Result;
use crate::registry::TextRegistry;
use crate::types::{FeatureSet, GraphConfig, PosTag, Word, UNKNOWN_BASIC_FORM};

/// Converts analyzer output into feature sets
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    include_pos: Vec<PosTag>,
    unknown_basic_form: String,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureExtractor {
    /// Create an extractor with the default content-word filter
    pub fn new() -> Self {
        Self {
            include_pos: vec![
                PosTag::Noun,
                PosTag::Verb,
                PosTag::Adjective,
                PosTag::AdjectivalNoun,
            ],
            unknown_basic_form: UNKNOWN_BASIC_FORM.to_string(),
        }
    }

    /// Create an extractor from a graph config
    pub fn from_config(config: &GraphConfig) -> Self {
        Self {
            include_pos: config.include_pos.clone(),
            unknown_basic_form: config.unknown_basic_form.clone(),
        }
    }

    /// Check if a word contributes a feature
    pub fn is_feature(&self, word: &Word) -> bool {
        self.include_pos.contains(&word.pos) && word.basic_form != self.unknown_basic_form
    }

    /// Collect features from already tokenized words
    pub fn features_of(&self, words: &[Word]) -> FeatureSet {
        words
            .iter()
            .filter(|w| self.is_feature(w))
            .map(|w| w.basic_form.clone())
            .collect()
    }

    /// Tokenize `text` and collect its features.
    ///
    /// Analyzer errors propagate unchanged.
    pub fn extract<A: MorphAnalyzer + ?Sized>(&self, analyzer: &A, text: &str) -> Result<FeatureSet> {
        if text.is_empty() {
            return Ok(FeatureSet::default());
        }
        let words = analyzer.tokenize(text)?;
        Ok(self.features_of(&words))
    }

    /// Extract features for every registered text, in registry order.
    pub fn extract_all<A: MorphAnalyzer + ?Sized>(
        &self,
        analyzer: &A,
        registry: &TextRegistry,
    ) -> Result<Vec<FeatureSet>> {
        registry
            .entries()
            .iter()
            .map(|entry| {
                let features = self.extract(analyzer, &entry.text)?;
                tracing::debug!(text = %entry.text, features = ?features, "features extracted");
                Ok(features)
            })
            .collect()
    }
}
