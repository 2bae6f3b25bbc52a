//! Tokenization and feature extraction
//!
//! - [`tokenizer`]: the analyzer contract and the built-in script analyzer
//! - [`dictionary`]: longest-match analyzer over a CSV dictionary
//! - [`pretokenized`]: analyses produced by an external analyzer
//! - [`features`]: analyzer output to feature sets

pub mod dictionary;
pub mod features;
pub mod pretokenized;
pub mod tokenizer;

pub use dictionary::DictionaryAnalyzer;
pub use features::FeatureExtractor;
pub use pretokenized::PretokenizedAnalyzer;
pub use tokenizer::{MorphAnalyzer, ScriptAnalyzer};
