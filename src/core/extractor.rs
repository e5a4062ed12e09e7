use crate::core::markup::{MarkupNode, CITATION_TAG, INDENT_TAG};
use crate::core::matcher::HEADWORD_ATTR;
use crate::core::model::{Citation, Entry, EntryHeader, HistoryItem, SubItem, Variant};
use crate::error::{LittreError, Result};
use crate::utils::normalization::{collapse_breaks, headword_key};
use log::debug;

const SENSE_ATTR: &str = "sens";
const HEADER_TAG: &str = "entete";
const PRONUNCIATION_TAG: &str = "prononciation";
const NATURE_TAG: &str = "nature";
const BODY_TAG: &str = "corps";
const VARIANT_TAG: &str = "variante";
const VARIANT_NUMBER_ATTR: &str = "num";
const AUTHOR_ATTR: &str = "aut";
const REFERENCE_ATTR: &str = "ref";
const SECTION_TAG: &str = "rubrique";
const SECTION_NAME_ATTR: &str = "nom";

pub const SYNONYM_SECTION: &str = "SYNONYME";
pub const HISTORY_SECTION: &str = "HISTORIQUE";
pub const ETYMOLOGY_SECTION: &str = "ÉTYMOLOGIE";

/// Turns one `<entree>` node into an [`Entry`]. Extraction is all-or-nothing: a
/// missing header or body fails the whole entry, every other section defaults to empty.
pub struct EntryExtractor;

impl EntryExtractor {
    pub fn extract(node: &MarkupNode) -> Result<Entry> {
        let headword = node.attribute(HEADWORD_ATTR).unwrap_or_default().trim().to_string();

        let header_node = node.child(HEADER_TAG).ok_or_else(|| LittreError::MalformedEntry {
            headword: headword.clone(),
            missing: HEADER_TAG,
        })?;
        let body = node.child(BODY_TAG).ok_or_else(|| LittreError::MalformedEntry {
            headword: headword.clone(),
            missing: BODY_TAG,
        })?;

        let entry = Entry {
            sense_id: Self::sense_id(node),
            header: Self::extract_header(header_node),
            variants: Self::extract_variants(body),
            synonyms: Self::extract_plain_section(node, SYNONYM_SECTION, |leaf| leaf.clean_run_text()),
            history: Self::extract_history(node),
            etymology: Self::extract_plain_section(node, ETYMOLOGY_SECTION, |leaf| {
                collapse_breaks(&leaf.inner_text())
            }),
            headword,
        };

        debug!(
            "extracted {} sense #{}: {} variants, {} synonyms, {} history, {} etymology",
            entry.headword,
            entry.sense_id,
            entry.variants.len(),
            entry.synonyms.len(),
            entry.history.len(),
            entry.etymology.len()
        );
        Ok(entry)
    }

    /// Positive sense number, defaulting to 1 when absent or unparsable.
    pub fn sense_id(node: &MarkupNode) -> u32 {
        node.attribute(SENSE_ATTR)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&id| id > 0)
            .unwrap_or(1)
    }

    fn extract_header(header: &MarkupNode) -> EntryHeader {
        let leaf = |tag| {
            header
                .child(tag)
                .map(|n| collapse_breaks(&n.inner_text()))
                .unwrap_or_default()
        };
        EntryHeader {
            pronunciation: leaf(PRONUNCIATION_TAG),
            grammatical_nature: leaf(NATURE_TAG),
        }
    }

    fn extract_variants(body: &MarkupNode) -> Vec<Variant> {
        body.children_named(VARIANT_TAG)
            .enumerate()
            .map(|(i, variant)| {
                let number = match variant.attribute(VARIANT_NUMBER_ATTR) {
                    Some(raw) => raw.trim().parse::<u32>().ok(),
                    None => Some(i as u32 + 1),
                };
                let mut sub_items = Vec::new();
                Self::collect_sub_items(variant, &mut sub_items);
                Variant {
                    number,
                    text: variant.clean_run_text(),
                    sub_items,
                    citations: Self::extract_citations(variant),
                }
            })
            .collect()
    }

    // nested indents are flattened, in document order
    fn collect_sub_items(parent: &MarkupNode, out: &mut Vec<SubItem>) {
        for indent in parent.children_named(INDENT_TAG) {
            out.push(SubItem {
                text: indent.clean_run_text(),
                citations: Self::extract_citations(indent),
            });
            Self::collect_sub_items(indent, out);
        }
    }

    /// Direct `<cit>` children of `parent`, in document order.
    pub fn extract_citations(parent: &MarkupNode) -> Vec<Citation> {
        parent
            .children_named(CITATION_TAG)
            .map(|cit| {
                Citation::new(
                    cit.attribute(AUTHOR_ATTR).unwrap_or_default(),
                    cit.attribute(REFERENCE_ATTR).unwrap_or_default(),
                    &cit.inner_text(),
                )
            })
            .collect()
    }

    /// The `<rubrique>` child whose name folds to `name`, if the entry has one.
    pub fn find_section<'a>(entry: &'a MarkupNode, name: &str) -> Option<&'a MarkupNode> {
        let wanted = headword_key(name);
        entry.children_named(SECTION_TAG).find(|section| {
            section
                .attribute(SECTION_NAME_ATTR)
                .is_some_and(|n| headword_key(n) == wanted)
        })
    }

    fn extract_plain_section(
        entry: &MarkupNode,
        name: &str,
        item_text: impl Fn(&MarkupNode) -> String,
    ) -> Vec<String> {
        let Some(section) = Self::find_section(entry, name) else {
            return Vec::new();
        };
        let mut items: Vec<String> = section
            .children_named(INDENT_TAG)
            .map(item_text)
            .filter(|text| !text.is_empty())
            .collect();
        if items.is_empty() {
            let loose = collapse_breaks(&section.inner_text());
            if !loose.is_empty() {
                items.push(loose);
            }
        }
        items
    }

    fn extract_history(entry: &MarkupNode) -> Vec<HistoryItem> {
        let Some(section) = Self::find_section(entry, HISTORY_SECTION) else {
            return Vec::new();
        };
        let mut items = Vec::new();
        Self::collect_history(section, &mut items);
        items
    }

    fn collect_history(parent: &MarkupNode, out: &mut Vec<HistoryItem>) {
        for leaf in parent.children_named(INDENT_TAG) {
            out.push(HistoryItem {
                label: leaf.clean_run_text(),
                citations: Self::extract_citations(leaf),
            });
            Self::collect_history(leaf, out);
        }
    }
}
