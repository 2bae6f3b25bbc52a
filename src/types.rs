//! Core types for reasongraph
//!
//! This module defines the fundamental data structures used throughout the library,
//! including part-of-speech tags, analyzer output, input rows, and configuration.

use crate::errors::{GraphError, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

// ============================================================================
// Part of speech
// ============================================================================

/// Top-level part-of-speech categories of the IPADIC tag set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    AdjectivalNoun,
    Adverb,
    Adnominal,
    Conjunction,
    Interjection,
    Particle,
    AuxiliaryVerb,
    Prefix,
    Symbol,
    Filler,
    Other,
}

impl PosTag {
    /// Check if this POS tag carries lexical content (the default feature filter)
    pub fn is_content_word(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::Verb | PosTag::Adjective | PosTag::AdjectivalNoun
        )
    }

    /// Parse from an IPADIC-style top-level tag.
    ///
    /// English aliases are accepted as well so hand-written dictionaries and
    /// config files can stay ASCII.
    pub fn from_ipadic(tag: &str) -> Self {
        match tag.trim() {
            "名詞" => PosTag::Noun,
            "動詞" => PosTag::Verb,
            "形容詞" => PosTag::Adjective,
            "形容動詞" => PosTag::AdjectivalNoun,
            "副詞" => PosTag::Adverb,
            "連体詞" => PosTag::Adnominal,
            "接続詞" => PosTag::Conjunction,
            "感動詞" => PosTag::Interjection,
            "助詞" => PosTag::Particle,
            "助動詞" => PosTag::AuxiliaryVerb,
            "接頭詞" => PosTag::Prefix,
            "記号" => PosTag::Symbol,
            "フィラー" => PosTag::Filler,
            other => match other.to_lowercase().as_str() {
                "noun" => PosTag::Noun,
                "verb" => PosTag::Verb,
                "adj" | "adjective" => PosTag::Adjective,
                "adjectival_noun" | "adjectivalnoun" | "na_adj" => PosTag::AdjectivalNoun,
                "adv" | "adverb" => PosTag::Adverb,
                "adnominal" => PosTag::Adnominal,
                "conj" | "conjunction" => PosTag::Conjunction,
                "intj" | "interjection" => PosTag::Interjection,
                "part" | "particle" => PosTag::Particle,
                "aux" | "auxiliary_verb" => PosTag::AuxiliaryVerb,
                "prefix" => PosTag::Prefix,
                "sym" | "symbol" | "punct" => PosTag::Symbol,
                "filler" => PosTag::Filler,
                _ => PosTag::Other,
            },
        }
    }

    /// Get the IPADIC label for this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "名詞",
            PosTag::Verb => "動詞",
            PosTag::Adjective => "形容詞",
            PosTag::AdjectivalNoun => "形容動詞",
            PosTag::Adverb => "副詞",
            PosTag::Adnominal => "連体詞",
            PosTag::Conjunction => "接続詞",
            PosTag::Interjection => "感動詞",
            PosTag::Particle => "助詞",
            PosTag::AuxiliaryVerb => "助動詞",
            PosTag::Prefix => "接頭詞",
            PosTag::Symbol => "記号",
            PosTag::Filler => "フィラー",
            PosTag::Other => "その他",
        }
    }
}

impl std::str::FromStr for PosTag {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(PosTag::from_ipadic(value))
    }
}

// ============================================================================
// Word
// ============================================================================

/// Basic form reported by analyzers for tokens they cannot lemmatize
pub const UNKNOWN_BASIC_FORM: &str = "*";

/// One morpheme as reported by a morphological analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// The surface form (as it appears in the text)
    pub surface_form: String,
    /// Part-of-speech tag
    pub pos: PosTag,
    /// Dictionary form, or [`UNKNOWN_BASIC_FORM`]
    pub basic_form: String,
}

impl Word {
    /// Create a new word
    pub fn new(surface_form: impl Into<String>, pos: PosTag, basic_form: impl Into<String>) -> Self {
        Self {
            surface_form: surface_form.into(),
            pos,
            basic_form: basic_form.into(),
        }
    }

    /// Create a word whose basic form is unknown
    pub fn unknown(surface_form: impl Into<String>, pos: PosTag) -> Self {
        Self::new(surface_form, pos, UNKNOWN_BASIC_FORM)
    }
}

/// Normalized lexical features (basic forms of content words) of one text
pub type FeatureSet = FxHashSet<String>;

// ============================================================================
// Input rows and text entries
// ============================================================================

/// One input record: a reason text that leads to a result text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Source row id
    pub index: String,
    pub reason: String,
    pub result: String,
    /// Position of the reason within the source row
    #[serde(rename = "reasonIndex")]
    pub reason_index: String,
    /// Position of the result within the source row
    #[serde(rename = "resultIndex")]
    pub result_index: String,
}

impl Row {
    /// Create a new row
    pub fn new(
        index: impl Into<String>,
        reason: impl Into<String>,
        result: impl Into<String>,
        reason_index: impl Into<String>,
        result_index: impl Into<String>,
    ) -> Self {
        Self {
            index: index.into(),
            reason: reason.into(),
            result: result.into(),
            reason_index: reason_index.into(),
            result_index: result_index.into(),
        }
    }
}

/// A distinct text string together with the row position it was taken from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntry {
    pub text: String,
    /// `index` of the row the text came from
    pub orig_index: String,
    /// `reasonIndex` or `resultIndex` of that row
    pub index: String,
}

impl TextEntry {
    /// Display label used for merged vertices: `<origIndex><index> <text>`
    pub fn label(&self) -> String {
        format!("{}{} {}", self.orig_index, self.index, self.text)
    }
}

// ============================================================================
// Policies
// ============================================================================

/// Which edges a component traversal may follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reachability {
    /// Follow edges in both directions (true weakly-connected components)
    #[default]
    Undirected,
    /// Follow out-edges only, starting from each unassigned seed vertex
    OutEdges,
}

impl std::str::FromStr for Reachability {
    type Err = GraphError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().replace('-', "_").as_str() {
            "undirected" | "weak" => Ok(Reachability::Undirected),
            "out_edges" | "out" | "directed" => Ok(Reachability::OutEdges),
            other => Err(GraphError::invalid_config(format!(
                "unknown reachability {other:?} (expected undirected or out-edges)"
            ))),
        }
    }
}

/// What to do when the same text appears in several rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later rows overwrite the row position of an existing entry
    #[default]
    LastWriteWins,
    /// The first row a text appears in is kept
    FirstWins,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = GraphError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().replace('-', "_").as_str() {
            "last" | "last_write_wins" => Ok(DuplicatePolicy::LastWriteWins),
            "first" | "first_wins" => Ok(DuplicatePolicy::FirstWins),
            other => Err(GraphError::invalid_config(format!(
                "unknown duplicate policy {other:?} (expected last or first)"
            ))),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Default Jaccard threshold for a similarity edge
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.4;

/// Configuration for graph construction and merging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Minimum Jaccard similarity (inclusive) for a similarity edge
    pub similarity_threshold: f64,
    /// POS tags whose basic forms become features
    pub include_pos: Vec<PosTag>,
    /// Basic form that marks an unknown word; such words are never features
    pub unknown_basic_form: String,
    /// Edge directions followed when finding components
    pub reachability: Reachability,
    /// Handling of texts that occur in more than one row
    pub duplicate_policy: DuplicatePolicy,
    /// Number of distinct texts from which the pairwise scan runs in parallel
    pub parallel_threshold: usize,
    /// Maximum number of distinct texts before rejecting the input
    pub max_texts: Option<usize>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            include_pos: vec![
                PosTag::Noun,
                PosTag::Verb,
                PosTag::Adjective,
                PosTag::AdjectivalNoun,
            ],
            unknown_basic_form: UNKNOWN_BASIC_FORM.to_string(),
            reachability: Reachability::default(),
            duplicate_policy: DuplicatePolicy::default(),
            parallel_threshold: 512,
            max_texts: None,
        }
    }
}

impl GraphConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(GraphError::invalid_config(format!(
                "similarity_threshold must be between 0 and 1, got {}",
                self.similarity_threshold
            )));
        }

        if self.include_pos.is_empty() {
            return Err(GraphError::invalid_config(
                "include_pos must name at least one tag",
            ));
        }

        if self.parallel_threshold == 0 {
            return Err(GraphError::invalid_config("parallel_threshold must be > 0"));
        }

        if self.max_texts == Some(0) {
            return Err(GraphError::invalid_config("max_texts must be > 0"));
        }

        Ok(())
    }

    /// Builder method: set similarity threshold
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Builder method: set the POS tags used as features
    pub fn with_include_pos(mut self, include_pos: Vec<PosTag>) -> Self {
        self.include_pos = include_pos;
        self
    }

    /// Builder method: set the unknown basic form marker
    pub fn with_unknown_basic_form(mut self, marker: impl Into<String>) -> Self {
        self.unknown_basic_form = marker.into();
        self
    }

    /// Builder method: set reachability
    pub fn with_reachability(mut self, reachability: Reachability) -> Self {
        self.reachability = reachability;
        self
    }

    /// Builder method: set duplicate policy
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Builder method: set parallel scan threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Builder method: set maximum number of distinct texts
    pub fn with_max_texts(mut self, max: usize) -> Self {
        self.max_texts = Some(max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_from_ipadic() {
        assert_eq!(PosTag::from_ipadic("名詞"), PosTag::Noun);
        assert_eq!(PosTag::from_ipadic("形容動詞"), PosTag::AdjectivalNoun);
        assert_eq!(PosTag::from_ipadic("助詞"), PosTag::Particle);
        assert_eq!(PosTag::from_ipadic("verb"), PosTag::Verb);
        assert_eq!(PosTag::from_ipadic("ADJ"), PosTag::Adjective);
        assert_eq!(PosTag::from_ipadic("???"), PosTag::Other);
    }

    #[test]
    fn test_pos_label_roundtrip() {
        for tag in [
            PosTag::Noun,
            PosTag::Verb,
            PosTag::Adjective,
            PosTag::AdjectivalNoun,
            PosTag::Particle,
            PosTag::Symbol,
        ] {
            assert_eq!(PosTag::from_ipadic(tag.as_str()), tag);
        }
    }

    #[test]
    fn test_content_words() {
        assert!(PosTag::Noun.is_content_word());
        assert!(PosTag::AdjectivalNoun.is_content_word());
        assert!(!PosTag::Particle.is_content_word());
        assert!(!PosTag::Adverb.is_content_word());
    }

    #[test]
    fn test_entry_label() {
        let entry = TextEntry {
            text: "B故障".to_string(),
            orig_index: "12".to_string(),
            index: "3".to_string(),
        };
        assert_eq!(entry.label(), "123 B故障");
    }

    #[test]
    fn test_row_serde_column_names() {
        let json = r#"{"index":"1","reason":"a","result":"b","reasonIndex":"0","resultIndex":"1"}"#;
        let row: Row = serde_json::from_str(json).unwrap();
        assert_eq!(row, Row::new("1", "a", "b", "0", "1"));
    }

    #[test]
    fn test_config_validation() {
        let config = GraphConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.similarity_threshold, 0.4);

        let bad = GraphConfig::default().with_similarity_threshold(1.5);
        assert!(bad.validate().is_err());

        let bad = GraphConfig::default().with_include_pos(Vec::new());
        assert!(bad.validate().is_err());

        let bad = GraphConfig::default().with_parallel_threshold(0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_config_serde_missing_fields_default() {
        let cfg: GraphConfig = serde_json::from_str(r#"{"similarity_threshold": 0.5}"#).unwrap();
        assert_eq!(cfg.similarity_threshold, 0.5);
        assert_eq!(cfg.reachability, Reachability::Undirected);
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::LastWriteWins);
        assert_eq!(cfg.include_pos.len(), 4);
    }

    #[test]
    fn test_policy_serde_names() {
        let json = serde_json::to_string(&Reachability::OutEdges).unwrap();
        assert_eq!(json, r#""out_edges""#);
        let json = serde_json::to_string(&DuplicatePolicy::FirstWins).unwrap();
        assert_eq!(json, r#""first_wins""#);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("out-edges".parse::<Reachability>().unwrap(), Reachability::OutEdges);
        assert_eq!("undirected".parse::<Reachability>().unwrap(), Reachability::Undirected);
        assert!("sideways".parse::<Reachability>().is_err());
        assert_eq!("first".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::FirstWins);
        assert!("middle".parse::<DuplicatePolicy>().is_err());
    }
}
