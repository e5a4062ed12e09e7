use crate::core::markup::{MarkupNode, MarkupTree, ENTRY_TAG};
use crate::error::{LittreError, Result};
use crate::utils::normalization::{fold_accents, headword_key};
use log::debug;

pub const HEADWORD_ATTR: &str = "terme";

/// Split a raw headword such as `GRAND, ANDE` into its masculine and feminine forms.
///
/// The feminine suffix restates the end of the radical from the last occurrence of
/// its first letter, accents ignored (`BEAU,ELLE` gives `BELLE`, `CHER, ÈRE` gives `CHÈRE`). A one-letter suffix is a plain
/// ending appended to the radical (`GRAND,E` gives `GRANDE`). When the suffix's first
/// letter is missing from the radical the feminine form is the suffix alone. The
/// feminine form is empty when the headword has no doubled form.
pub fn build_female(raw: &str) -> (String, String) {
    let Some((radical, suffix)) = raw.split_once(',') else {
        return (raw.trim().to_string(), String::new());
    };
    let radical = radical.trim();
    let suffix = suffix.trim();

    let mut chars = suffix.chars();
    let Some(first) = chars.next() else {
        return (radical.to_string(), String::new());
    };

    let feminine = if chars.next().is_none() {
        format!("{radical}{suffix}")
    } else {
        let prefix = last_folded_match(radical, first)
            .map(|idx| &radical[..idx])
            .unwrap_or("");
        format!("{prefix}{suffix}")
    };
    (radical.to_string(), feminine)
}

// byte index of the last char of `radical` equal to `wanted` once accents are stripped
fn last_folded_match(radical: &str, wanted: char) -> Option<usize> {
    let wanted = fold_accents(&wanted.to_string()).to_uppercase();
    radical
        .char_indices()
        .rev()
        .find(|(_, c)| fold_accents(&c.to_string()).to_uppercase() == wanted)
        .map(|(idx, _)| idx)
}

/// Whether an entry's raw headword resolves to the normalized query key.
pub fn headword_matches(raw: &str, key: &str) -> bool {
    let (masculine, feminine) = build_female(raw);
    headword_key(&masculine) == key || (!feminine.is_empty() && headword_key(&feminine) == key)
}

/// Lazy iterator over the entry nodes of a letter whose headword matches a query.
/// Cloning restarts from the clone point.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    nodes: std::slice::Iter<'a, MarkupNode>,
    key: String,
}

impl<'a> Matches<'a> {
    pub fn new(tree: &'a MarkupTree, query: &str) -> Self {
        Self {
            nodes: tree.root.children.iter(),
            key: headword_key(query),
        }
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a MarkupNode;

    fn next(&mut self) -> Option<Self::Item> {
        let key = &self.key;
        self.nodes.by_ref().find(|node| {
            node.tag == ENTRY_TAG
                && node
                    .attribute(HEADWORD_ATTR)
                    .is_some_and(|raw| headword_matches(raw, key))
        })
    }
}

/// Find the entries for `query`, failing with `EntryNotFound` when there are none.
pub fn find_entries<'a>(tree: &'a MarkupTree, query: &str) -> Result<Matches<'a>> {
    let matches = Matches::new(tree, query);
    if matches.clone().next().is_none() {
        debug!("no entry for {:?} among {} nodes", query, tree.root.children.len());
        return Err(LittreError::EntryNotFound(query.trim().to_uppercase()));
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_feminine_forms() {
        assert_eq!(build_female("GRAND,E"), ("GRAND".into(), "GRANDE".into()));
        assert_eq!(build_female("BEAU"), ("BEAU".into(), "".into()));
        assert_eq!(build_female("GRAND, ANDE"), ("GRAND".into(), "GRANDE".into()));
        assert_eq!(build_female("BEAU, ELLE"), ("BEAU".into(), "BELLE".into()));
        assert_eq!(build_female("PETIT,E"), ("PETIT".into(), "PETITE".into()));
        assert_eq!(build_female("ÉCOLIER, IÈRE"), ("ÉCOLIER".into(), "ÉCOLIÈRE".into()));
        assert_eq!(build_female("CHER, ÈRE"), ("CHER".into(), "CHÈRE".into()));
        assert_eq!(build_female("LÉGER, ÈRE"), ("LÉGER".into(), "LÉGÈRE".into()));
        assert_eq!(build_female("DERNIER, ÈRE"), ("DERNIER".into(), "DERNIÈRE".into()));
        assert!(headword_matches("CHER, ÈRE", "CHERE"));

        let tree = MarkupTree::parse(r#"<xmlittre><entree terme="CHER, ÈRE"/></xmlittre>"#).unwrap();
        assert_eq!(find_entries(&tree, "chère").unwrap().count(), 1);
    }

    #[test]
    fn degenerate_forms_do_not_panic() {
        assert_eq!(build_female(""), ("".into(), "".into()));
        assert_eq!(build_female(","), ("".into(), "".into()));
        assert_eq!(build_female("ABC,"), ("ABC".into(), "".into()));
        assert_eq!(build_female(",XY"), ("".into(), "XY".into()));
        assert_eq!(build_female("ABC,XYZ"), ("ABC".into(), "XYZ".into()));
    }

    #[test]
    fn matches_either_gender_without_accents() {
        assert!(headword_matches("GRAND, ANDE", "GRANDE"));
        assert!(headword_matches("GRAND, ANDE", "GRAND"));
        assert!(headword_matches("ÉCOLE", "ECOLE"));
        assert!(!headword_matches("BEAU", ""));
        assert!(!headword_matches("GRAND, ANDE", "GRANDS"));
    }

    #[test]
    fn finds_every_sense_in_order() {
        let tree = MarkupTree::parse(
            r#"<xmlittre>
                <entree terme="GRAND, ANDE" sens="1"/>
                <entree terme="GRANDEUR"/>
                <entree terme="GRAND, ANDE" sens="2"/>
            </xmlittre>"#,
        )
        .unwrap();
        let found = find_entries(&tree, "grande").unwrap();
        let senses: Vec<_> = found.clone().filter_map(|n| n.attribute("sens")).collect();
        assert_eq!(senses, vec!["1", "2"]);
        // restartable
        assert_eq!(found.count(), 2);
    }

    #[test]
    fn missing_headword_is_not_found() {
        let tree = MarkupTree::parse(r#"<xmlittre><entree terme="GRAND"/></xmlittre>"#).unwrap();
        match find_entries(&tree, "gros") {
            Err(LittreError::EntryNotFound(word)) => assert_eq!(word, "GROS"),
            other => panic!("unexpected {:?}", other.map(|m| m.count())),
        }
    }
}
