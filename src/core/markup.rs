use crate::error::Result;
use crate::utils::normalization::collapse_breaks;
use roxmltree::{Document, Node, ParsingOptions};
use serde::Serialize;

pub const ENTRY_TAG: &str = "entree";
pub const CITATION_TAG: &str = "cit";
pub const INDENT_TAG: &str = "indent";

/// One element of a letter file, with its text split the way the markup splits it:
/// `text` runs up to the first child element, `tail` follows the closing tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkupNode {
    pub tag: String,
    pub text: String,
    pub tail: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
}

/// A fully parsed letter file. Owned by the loader, only borrowed by lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkupTree {
    pub root: MarkupNode,
}

impl MarkupTree {
    pub fn parse(xml: &str) -> Result<Self> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(xml, options)?;
        Ok(Self {
            root: MarkupNode::from_element(doc.root_element()),
        })
    }

    /// Iterate the entry nodes of the letter, in file order.
    pub fn entries(&self) -> impl Iterator<Item = &MarkupNode> + Clone {
        self.root.children_named(ENTRY_TAG)
    }
}

impl MarkupNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    fn from_element(element: Node) -> Self {
        let mut node = MarkupNode::new(element.tag_name().name());
        node.attributes = element
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect();

        for child in element.children() {
            if child.is_element() {
                node.children.push(MarkupNode::from_element(child));
            } else if child.is_text() {
                let content = child.text().unwrap_or_default();
                // text after an element belongs to that element's tail
                match node.children.last_mut() {
                    Some(previous) => previous.tail.push_str(content),
                    None => node.text.push_str(content),
                }
            }
        }
        node
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child with the given tag, if present.
    pub fn child(&self, tag: &str) -> Option<&MarkupNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    pub fn children_named<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a MarkupNode> + Clone + 'a {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// All descendant text in document order, excluding this node's own tail.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        self.push_inner_text(&mut out);
        out
    }

    fn push_inner_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.push_inner_text(out);
            out.push_str(&child.tail);
        }
    }

    /// The text run of this node: its own text, interleaved with the text of inline
    /// children and the tails of every child. Citations and indented items are
    /// structure, not part of the run, so only their tails are kept.
    pub fn run_text(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            if !child.is_structural() {
                child.push_inner_text(&mut out);
            }
            out.push_str(&child.tail);
        }
        out
    }

    /// [`run_text`](Self::run_text) with markup line breaks removed and trimmed.
    pub fn clean_run_text(&self) -> String {
        collapse_breaks(&self.run_text())
    }

    fn is_structural(&self) -> bool {
        self.tag == CITATION_TAG || self.tag == INDENT_TAG
    }
}
