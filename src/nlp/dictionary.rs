//! Dictionary-driven longest-match analyzer
//!
//! The dictionary is a headerless CSV resource with one entry per line:
//! `surface,pos,basic_form`. The POS column takes IPADIC top-level labels
//! (`名詞`, `動詞`, ...) or their English aliases; an empty basic form means
//! the surface form is already the dictionary form. Lines starting with `#`
//! are comments.
//!
//! Text is segmented greedily by the longest dictionary entry at each
//! position. Spans no entry covers are handed to [`ScriptAnalyzer`].

use super::tokenizer::{MorphAnalyzer, ScriptAnalyzer};
use crate::errors::{GraphError, Result};
use crate::types::{PosTag, Word};
use rustc_hash::FxHashMap;
use std::io::Read;
use std::path::Path;

/// A dictionary entry
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    pos: PosTag,
    basic_form: String,
}

/// Longest-match analyzer over a user dictionary
#[derive(Debug, Clone, Default)]
pub struct DictionaryAnalyzer {
    entries: FxHashMap<String, Entry>,
    /// Longest surface form in characters
    max_chars: usize,
    fallback: ScriptAnalyzer,
}

impl DictionaryAnalyzer {
    /// Create an analyzer with an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the analyzer from a dictionary file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            GraphError::tokenizer(format!("cannot open dictionary {}: {e}", path.display()))
        })?;
        let analyzer = Self::from_reader(file)
            .map_err(|e| GraphError::tokenizer(format!("{}: {e}", path.display())))?;
        tracing::debug!(
            dictionary = %path.display(),
            entries = analyzer.len(),
            "dictionary loaded"
        );
        Ok(analyzer)
    }

    /// Build the analyzer from CSV dictionary content.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut analyzer = Self::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record
                .map_err(|e| GraphError::tokenizer(format!("bad dictionary entry: {e}")))?;
            let surface = record.get(0).unwrap_or_default();
            let pos = record.get(1).unwrap_or_default();
            if surface.is_empty() || pos.is_empty() {
                return Err(GraphError::tokenizer(format!(
                    "dictionary record {} needs at least surface and pos",
                    line + 1
                )));
            }
            let basic_form = record.get(2).filter(|b| !b.is_empty()).unwrap_or(surface);
            analyzer.insert(surface, PosTag::from_ipadic(pos), basic_form);
        }
        Ok(analyzer)
    }

    /// Add or replace an entry
    pub fn insert(&mut self, surface: &str, pos: PosTag, basic_form: &str) {
        self.max_chars = self.max_chars.max(surface.chars().count());
        self.entries.insert(
            surface.to_string(),
            Entry {
                pos,
                basic_form: basic_form.to_string(),
            },
        );
    }

    /// Set the basic form the fallback gives to out-of-vocabulary runs
    pub fn with_unknown_basic_form(mut self, marker: impl Into<String>) -> Self {
        self.fallback = self.fallback.with_unknown_basic_form(marker);
        self
    }

    /// Builder method: add an entry
    pub fn with_entry(mut self, surface: &str, pos: PosTag, basic_form: &str) -> Self {
        self.insert(surface, pos, basic_form);
        self
    }

    /// Number of dictionary entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest entry starting at byte offset `start`, as (end offset, entry)
    fn longest_match(&self, text: &str, start: usize) -> Option<(usize, &Entry)> {
        let rest = &text[start..];
        let mut ends: Vec<usize> = rest
            .char_indices()
            .skip(1)
            .map(|(i, _)| i)
            .take(self.max_chars)
            .collect();
        if rest.chars().count() <= self.max_chars {
            ends.push(rest.len());
        }

        ends.into_iter()
            .rev()
            .find_map(|end| self.entries.get(&rest[..end]).map(|e| (start + end, e)))
    }

    /// Analyze text without going through the trait (never fails).
    pub fn analyze(&self, text: &str) -> Vec<Word> {
        let mut words = Vec::new();
        let mut pending_start = 0;
        let mut pos = 0;

        while pos < text.len() {
            match self.longest_match(text, pos) {
                Some((end, entry)) => {
                    if pending_start < pos {
                        words.extend(self.fallback.analyze(&text[pending_start..pos]));
                    }
                    words.push(Word::new(&text[pos..end], entry.pos, entry.basic_form.clone()));
                    pos = end;
                    pending_start = end;
                }
                None => {
                    pos += text[pos..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        if pending_start < text.len() {
            words.extend(self.fallback.analyze(&text[pending_start..]));
        }

        words
    }
}

impl MorphAnalyzer for DictionaryAnalyzer {
    fn tokenize(&self, text: &str) -> Result<Vec<Word>> {
        Ok(self.analyze(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DICT: &str = "\
# surface,pos,basic_form
故障,名詞,
停止,名詞,
壊れ,動詞,壊れる
壊れた,動詞,壊れる
ポンプ,noun,
が,助詞,
";

    #[test]
    fn test_from_reader() {
        let analyzer = DictionaryAnalyzer::from_reader(DICT.as_bytes()).unwrap();
        assert_eq!(analyzer.len(), 6);
    }

    #[test]
    fn test_longest_match_wins() {
        let analyzer = DictionaryAnalyzer::from_reader(DICT.as_bytes()).unwrap();
        let words = analyzer.analyze("ポンプが壊れた");
        let surfaces: Vec<_> = words.iter().map(|w| w.surface_form.as_str()).collect();
        assert_eq!(surfaces, vec!["ポンプ", "が", "壊れた"]);
        assert_eq!(words[2].basic_form, "壊れる");
        assert_eq!(words[2].pos, PosTag::Verb);
    }

    #[test]
    fn test_unmatched_spans_fall_back() {
        let analyzer = DictionaryAnalyzer::new().with_entry("故障", PosTag::Noun, "故障");
        let words = analyzer.analyze("B故障");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].surface_form, "B");
        assert_eq!(words[0].basic_form, "*");
        assert_eq!(words[1].basic_form, "故障");
    }

    #[test]
    fn test_fallback_uses_unknown_marker() {
        let analyzer = DictionaryAnalyzer::new()
            .with_unknown_basic_form("UNK")
            .with_entry("故障", PosTag::Noun, "故障");
        let words = analyzer.analyze("B故障");
        assert_eq!(words[0].basic_form, "UNK");
    }

    #[test]
    fn test_empty_dictionary_is_script_analysis() {
        let analyzer = DictionaryAnalyzer::new();
        assert_eq!(
            analyzer.analyze("C停止"),
            ScriptAnalyzer::new().analyze("C停止")
        );
    }

    #[test]
    fn test_missing_pos_rejected() {
        let err = DictionaryAnalyzer::from_reader("故障\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::Tokenizer { .. }));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DICT.as_bytes()).unwrap();
        let analyzer = DictionaryAnalyzer::from_path(file.path()).unwrap();
        assert!(!analyzer.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = DictionaryAnalyzer::from_path("/nonexistent/dict.csv").unwrap_err();
        assert!(err.to_string().contains("cannot open dictionary"));
    }
}
