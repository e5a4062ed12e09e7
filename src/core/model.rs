use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const UNKNOWN_AUTHOR: &str = "aut. inc.";
pub const UNKNOWN_REFERENCE: &str = "ref. inc.";

/// An attributed quotation illustrating a usage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Citation {
    pub author: String,
    pub reference: String,
    pub quote: String,
}

impl Citation {
    /// Build a citation, substituting placeholders for an empty author or reference.
    pub fn new(author: &str, reference: &str, quote: &str) -> Self {
        let or_placeholder = |value: &str, placeholder: &str| {
            let value = value.trim();
            if value.is_empty() {
                placeholder.to_string()
            } else {
                value.to_string()
            }
        };
        Self {
            author: or_placeholder(author, UNKNOWN_AUTHOR),
            reference: or_placeholder(reference, UNKNOWN_REFERENCE),
            quote: quote.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubItem {
    pub text: String,
    pub citations: Vec<Citation>,
}

/// One numbered meaning of a sense. `number` is `None` when the markup carries an
/// unusable number; renderers then fall back to the ordinal position.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Variant {
    pub number: Option<u32>,
    pub text: String,
    pub sub_items: Vec<SubItem>,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryItem {
    pub label: String,
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntryHeader {
    pub pronunciation: String,
    pub grammatical_nature: String,
}

/// One sense of a headword, as extracted from a single entry node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub headword: String,
    pub sense_id: u32,
    pub header: EntryHeader,
    pub variants: Vec<Variant>,
    pub synonyms: Vec<String>,
    pub history: Vec<HistoryItem>,
    pub etymology: Vec<String>,
}

/// Every sense found for a headword, keyed by sense id. The rendering input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Definition {
    pub headword: String,
    pub senses: BTreeMap<u32, Entry>,
}

impl Definition {
    /// Key each entry by its sense id. A duplicated id falls back to the entry's
    /// 1-based position, moved up to the next free key if that is taken as well.
    pub fn from_entries(headword: impl Into<String>, entries: Vec<Entry>) -> Self {
        let headword = headword.into();
        let mut senses = BTreeMap::new();

        for (i, entry) in entries.into_iter().enumerate() {
            let mut key = entry.sense_id;
            if senses.contains_key(&key) {
                key = i as u32 + 1;
                while senses.contains_key(&key) {
                    key += 1;
                }
                warn!(
                    "duplicate sense #{} for {}, keeping it as sense #{}",
                    entry.sense_id, headword, key
                );
            }
            senses.insert(key, entry);
        }

        Self { headword, senses }
    }

    pub fn is_multi_sense(&self) -> bool {
        self.senses.len() > 1
    }
}
