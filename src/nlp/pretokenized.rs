//! Analyzer backed by pre-tokenized JSON
//!
//! For accurate morphology, run a full analyzer (kuromoji, MeCab, ...)
//! outside this crate and pass its output in. The expected shape is an
//! object keyed by text, each value being the analyzer's word list:
//!
//! ```json
//! {
//!   "B故障": [
//!     {"surface_form": "B", "pos": "名詞", "basic_form": "*"},
//!     {"surface_form": "故障", "pos": "名詞", "basic_form": "故障"}
//!   ]
//! }
//! ```
//!
//! Asking for a text that is not in the table is a tokenizer failure.

use super::tokenizer::MorphAnalyzer;
use crate::errors::{GraphError, Result};
use crate::types::{PosTag, Word, UNKNOWN_BASIC_FORM};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;

/// Input word from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct JsonWord {
    pub surface_form: String,
    pub pos: String,
    #[serde(default = "default_basic_form")]
    pub basic_form: String,
}

fn default_basic_form() -> String {
    UNKNOWN_BASIC_FORM.to_string()
}

impl From<JsonWord> for Word {
    fn from(jw: JsonWord) -> Self {
        Word {
            surface_form: jw.surface_form,
            pos: PosTag::from_ipadic(&jw.pos),
            basic_form: jw.basic_form,
        }
    }
}

/// Looks texts up in a table of externally produced analyses
#[derive(Debug, Clone, Default)]
pub struct PretokenizedAnalyzer {
    table: FxHashMap<String, Vec<Word>>,
}

impl PretokenizedAnalyzer {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON table
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: FxHashMap<String, Vec<JsonWord>> = serde_json::from_str(json)
            .map_err(|e| GraphError::tokenizer(format!("invalid token table: {e}")))?;
        let table = raw
            .into_iter()
            .map(|(text, words)| (text, words.into_iter().map(Word::from).collect()))
            .collect();
        Ok(Self { table })
    }

    /// Read a JSON table from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            GraphError::tokenizer(format!("cannot read token table {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Add or replace the analysis of one text
    pub fn insert(&mut self, text: impl Into<String>, words: Vec<Word>) {
        self.table.insert(text.into(), words);
    }

    /// Builder method: add the analysis of one text
    pub fn with_text(mut self, text: impl Into<String>, words: Vec<Word>) -> Self {
        self.insert(text, words);
        self
    }

    /// Number of texts in the table
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl MorphAnalyzer for PretokenizedAnalyzer {
    fn tokenize(&self, text: &str) -> Result<Vec<Word>> {
        self.table
            .get(text)
            .cloned()
            .ok_or_else(|| GraphError::tokenizer(format!("no analysis for text {text:?}")))
    }
}
