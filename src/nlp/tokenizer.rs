//! Morphological analyzer contract and the built-in script analyzer
//!
//! Downstream stages only see the [`MorphAnalyzer`] contract: text in, an
//! ordered sequence of [`Word`]s out. [`ScriptAnalyzer`] is the
//! dictionary-free fallback: it segments on Unicode script changes and
//! assigns heuristic POS tags. For accurate analysis, load a dictionary
//! ([`DictionaryAnalyzer`](super::dictionary::DictionaryAnalyzer)) or feed
//! the output of an external analyzer
//! ([`PretokenizedAnalyzer`](super::pretokenized::PretokenizedAnalyzer)).

use crate::errors::Result;
use crate::types::{PosTag, Word, UNKNOWN_BASIC_FORM};
use unicode_segmentation::UnicodeSegmentation;

/// Turns a text into an ordered sequence of words.
///
/// # Contract
///
/// - Words are returned in text order.
/// - Failures are fatal for the run; callers never retry or fall back.
pub trait MorphAnalyzer {
    /// Tokenize `text` into words.
    fn tokenize(&self, text: &str) -> Result<Vec<Word>>;
}

impl<A: MorphAnalyzer + ?Sized> MorphAnalyzer for &A {
    fn tokenize(&self, text: &str) -> Result<Vec<Word>> {
        (**self).tokenize(text)
    }
}

impl<A: MorphAnalyzer + ?Sized> MorphAnalyzer for Box<A> {
    fn tokenize(&self, text: &str) -> Result<Vec<Word>> {
        (**self).tokenize(text)
    }
}

/// Script class of a grapheme cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Script {
    Kanji,
    Hiragana,
    Katakana,
    Alphanumeric,
    Whitespace,
    Symbol,
}

impl Script {
    pub(crate) fn of(grapheme: &str) -> Self {
        let Some(c) = grapheme.chars().next() else {
            return Script::Whitespace;
        };
        if c.is_whitespace() {
            return Script::Whitespace;
        }
        if ScriptAnalyzer::is_kanji(c) {
            Script::Kanji
        } else if matches!(c, '\u{3041}'..='\u{309F}') {
            Script::Hiragana
        } else if matches!(c, '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}')
        {
            Script::Katakana
        } else if c.is_alphanumeric() {
            Script::Alphanumeric
        } else {
            Script::Symbol
        }
    }
}

/// Verb endings (u-row kana) accepted as okurigana of a dictionary-form verb
const VERB_ENDINGS: [char; 9] = ['う', 'く', 'ぐ', 'す', 'つ', 'ぬ', 'ぶ', 'む', 'る'];

/// Longest okurigana run still treated as part of the preceding kanji word
const MAX_OKURIGANA: usize = 3;

/// Case particles; a kana run starting with one of these is never okurigana
const CASE_PARTICLES: [char; 8] = ['を', 'が', 'の', 'に', 'へ', 'で', 'は', 'も'];

/// A dictionary-free analyzer based on script runs.
///
/// Rules, applied to maximal runs of one script:
/// - kanji followed by a short hiragana run ending in `い` → adjective,
///   ending in a u-row kana → verb (basic form = kanji + kana), unless the
///   run starts with a case particle (`故障による` is noun + particles)
/// - other kanji runs and katakana runs → nouns (basic form = surface)
/// - latin letters and digits → nouns with the unknown basic form marker,
///   the way dictionary analyzers report out-of-vocabulary words
/// - remaining hiragana runs → particles
/// - punctuation and symbols → symbols; whitespace is dropped
#[derive(Debug, Clone)]
pub struct ScriptAnalyzer {
    unknown_basic_form: String,
}

impl Default for ScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptAnalyzer {
    /// Create a new script analyzer with the `"*"` unknown marker
    pub fn new() -> Self {
        Self {
            unknown_basic_form: UNKNOWN_BASIC_FORM.to_string(),
        }
    }

    /// Set the basic form given to out-of-vocabulary runs.
    ///
    /// Must match `GraphConfig::unknown_basic_form` so those runs are not
    /// counted as features.
    pub fn with_unknown_basic_form(mut self, marker: impl Into<String>) -> Self {
        self.unknown_basic_form = marker.into();
        self
    }

    /// The marker given to out-of-vocabulary runs
    pub fn unknown_basic_form(&self) -> &str {
        &self.unknown_basic_form
    }

    /// Split text into maximal runs of one script, skipping whitespace.
    pub(crate) fn runs(text: &str) -> Vec<(Script, &str)> {
        let mut runs = Vec::new();
        let mut current: Option<(Script, usize)> = None;

        for (idx, grapheme) in text.grapheme_indices(true) {
            let script = Script::of(grapheme);
            match current {
                Some((prev, _)) if prev == script => {}
                Some((prev, start)) => {
                    if prev != Script::Whitespace {
                        runs.push((prev, &text[start..idx]));
                    }
                    current = Some((script, idx));
                }
                None => current = Some((script, idx)),
            }
        }

        if let Some((script, start)) = current {
            if script != Script::Whitespace {
                runs.push((script, &text[start..]));
            }
        }

        runs
    }

    /// Analyze text without going through the trait (never fails).
    pub fn analyze(&self, text: &str) -> Vec<Word> {
        let runs = Self::runs(text);
        let mut words = Vec::with_capacity(runs.len());
        let mut i = 0;

        while i < runs.len() {
            let (script, surface) = runs[i];
            match script {
                Script::Kanji => {
                    if let Some(&(Script::Hiragana, kana)) = runs.get(i + 1) {
                        if let Some(pos) = Self::okurigana_pos(kana) {
                            let joined = format!("{surface}{kana}");
                            words.push(Word::new(joined.clone(), pos, joined));
                            i += 2;
                            continue;
                        }
                    }
                    words.push(Word::new(surface, PosTag::Noun, surface));
                }
                Script::Katakana => words.push(Word::new(surface, PosTag::Noun, surface)),
                Script::Alphanumeric => words.push(Word::new(
                    surface,
                    PosTag::Noun,
                    self.unknown_basic_form.as_str(),
                )),
                Script::Hiragana => words.push(Word::new(surface, PosTag::Particle, surface)),
                Script::Symbol => words.push(Word::new(surface, PosTag::Symbol, surface)),
                Script::Whitespace => {}
            }
            i += 1;
        }

        words
    }

    fn okurigana_pos(kana: &str) -> Option<PosTag> {
        if kana.chars().count() > MAX_OKURIGANA {
            return None;
        }
        if kana.starts_with(CASE_PARTICLES) {
            return None;
        }
        match kana.chars().last()? {
            'い' => Some(PosTag::Adjective),
            c if VERB_ENDINGS.contains(&c) => Some(PosTag::Verb),
            _ => None,
        }
    }

    /// Check if a character is a CJK ideograph (including the iteration mark)
    pub fn is_kanji(c: char) -> bool {
        matches!(c,
            '\u{4E00}'..='\u{9FFF}' |   // CJK Unified Ideographs
            '\u{3400}'..='\u{4DBF}' |   // CJK Extension A
            '\u{20000}'..='\u{2A6DF}' | // CJK Extension B
            '\u{F900}'..='\u{FAFF}' |   // CJK Compatibility
            '\u{3005}'                  // 々
        )
    }
}

impl MorphAnalyzer for ScriptAnalyzer {
    fn tokenize(&self, text: &str) -> Result<Vec<Word>> {
        Ok(self.analyze(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surfaces(words: &[Word]) -> Vec<&str> {
        words.iter().map(|w| w.surface_form.as_str()).collect()
    }

    #[test]
    fn test_verb_okurigana() {
        let words = ScriptAnalyzer::new().analyze("A壊れる");
        assert_eq!(surfaces(&words), vec!["A", "壊れる"]);
        assert_eq!(words[0].basic_form, "*");
        assert_eq!(words[1].pos, PosTag::Verb);
        assert_eq!(words[1].basic_form, "壊れる");
    }

    #[test]
    fn test_adjective_okurigana() {
        let words = ScriptAnalyzer::new().analyze("温度が高い");
        assert_eq!(surfaces(&words), vec!["温度", "が", "高い"]);
        assert_eq!(words[0].pos, PosTag::Noun);
        assert_eq!(words[1].pos, PosTag::Particle);
        assert_eq!(words[2].pos, PosTag::Adjective);
    }

    #[test]
    fn test_case_particle_is_not_okurigana() {
        let words = ScriptAnalyzer::new().analyze("故障による停止");
        assert_eq!(surfaces(&words), vec!["故障", "による", "停止"]);
        assert_eq!(words[0].pos, PosTag::Noun);
        assert_eq!(words[0].basic_form, "故障");
        assert_eq!(words[1].pos, PosTag::Particle);

        let words = ScriptAnalyzer::new().analyze("電源をする");
        assert_eq!(surfaces(&words), vec!["電源", "をする"]);
        assert_eq!(words[0].pos, PosTag::Noun);
        assert_eq!(words[1].pos, PosTag::Particle);
    }

    #[test]
    fn test_custom_unknown_marker() {
        let words = ScriptAnalyzer::new()
            .with_unknown_basic_form("UNK")
            .analyze("ABC停止");
        assert_eq!(words[0].basic_form, "UNK");
        assert_eq!(words[1].basic_form, "停止");
    }

    #[test]
    fn test_katakana_and_symbols() {
        let words = ScriptAnalyzer::new().analyze("モーター停止。");
        assert_eq!(surfaces(&words), vec!["モーター", "停止", "。"]);
        assert_eq!(words[0].pos, PosTag::Noun);
        assert_eq!(words[2].pos, PosTag::Symbol);
    }

    #[test]
    fn test_long_hiragana_is_particle() {
        let words = ScriptAnalyzer::new().analyze("電源ではありません");
        assert_eq!(words[0].surface_form, "電源");
        assert_eq!(words[0].pos, PosTag::Noun);
        assert_eq!(words[1].pos, PosTag::Particle);
    }

    #[test]
    fn test_whitespace_dropped() {
        let words = ScriptAnalyzer::new().analyze("  pump  failure ");
        assert_eq!(surfaces(&words), vec!["pump", "failure"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(ScriptAnalyzer::new().analyze("").is_empty());
        assert!(ScriptAnalyzer::new().tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_kanji_detection() {
        assert!(ScriptAnalyzer::is_kanji('故'));
        assert!(ScriptAnalyzer::is_kanji('々'));
        assert!(!ScriptAnalyzer::is_kanji('あ'));
        assert!(!ScriptAnalyzer::is_kanji('A'));
    }
}
