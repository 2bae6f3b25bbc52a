//! Distinct-text registry
//!
//! Every reason and result string becomes exactly one [`TextEntry`]. Entries
//! keep the position of the row in which the text first appeared; which row's
//! `index`/`reasonIndex`/`resultIndex` they carry is governed by the
//! [`DuplicatePolicy`].

use crate::types::{DuplicatePolicy, Row, TextEntry};
use rustc_hash::FxHashMap;

/// Ordered set of distinct texts with stable `u32` ids
#[derive(Debug, Clone, Default)]
pub struct TextRegistry {
    entries: Vec<TextEntry>,
    text_to_id: FxHashMap<String, u32>,
}

impl TextRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every reason and result of `rows`, reason first within a row.
    pub fn from_rows(rows: &[Row], policy: DuplicatePolicy) -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(rows.len() * 2),
            text_to_id: FxHashMap::with_capacity_and_hasher(rows.len() * 2, Default::default()),
        };
        for row in rows {
            registry.register(&row.reason, &row.index, &row.reason_index, policy);
            registry.register(&row.result, &row.index, &row.result_index, policy);
        }
        registry
    }

    /// Register one occurrence of `text`, returning its id.
    pub fn register(
        &mut self,
        text: &str,
        orig_index: &str,
        index: &str,
        policy: DuplicatePolicy,
    ) -> u32 {
        if let Some(&id) = self.text_to_id.get(text) {
            if policy == DuplicatePolicy::LastWriteWins {
                let entry = &mut self.entries[id as usize];
                entry.orig_index = orig_index.to_string();
                entry.index = index.to_string();
            }
            return id;
        }

        let id = self.entries.len() as u32;
        self.text_to_id.insert(text.to_string(), id);
        self.entries.push(TextEntry {
            text: text.to_string(),
            orig_index: orig_index.to_string(),
            index: index.to_string(),
        });
        id
    }

    /// Get the id of a text
    pub fn id_of(&self, text: &str) -> Option<u32> {
        self.text_to_id.get(text).copied()
    }

    /// Get an entry by id
    pub fn get(&self, id: u32) -> Option<&TextEntry> {
        self.entries.get(id as usize)
    }

    /// All entries in registration order
    pub fn entries(&self) -> &[TextEntry] {
        &self.entries
    }

    /// Number of distinct texts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
