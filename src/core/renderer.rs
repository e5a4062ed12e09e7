use crate::core::model::{Citation, Definition, Entry, HistoryItem, Variant};
use crate::utils::wrap::wrap_with_prefix;
use serde::{Deserialize, Serialize};

pub const WRAP_WIDTH: usize = 80;
pub const INDENT_WIDTH: usize = 4;
pub const RULE_WIDTH: usize = 60;
pub const PRIMARY_BULLET: char = '•';
pub const SECONDARY_BULLET: char = '◦';
pub const SEPARATOR: char = '\u{a0}';
pub const SENSE_RULE: char = '═';
pub const SECTION_RULE: char = '─';

/// Which sections to leave out of the report. Everything is shown by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub suppress_citations: bool,
    pub suppress_synonyms: bool,
    pub suppress_history: bool,
    pub suppress_etymology: bool,
}

/// Marker placed in front of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Top-level item of a section.
    Bullet,
    /// Item nested under another one.
    SubBullet,
    Number(u32),
}

/// Leading whitespace, marker and the single non-breaking separator of a list item.
pub fn item_prefix(level: usize, kind: ItemKind) -> String {
    let marker = match kind {
        ItemKind::Bullet => PRIMARY_BULLET.to_string(),
        ItemKind::SubBullet => SECONDARY_BULLET.to_string(),
        ItemKind::Number(n) => format!("{n}."),
    };
    format!("{}{}{}", indent(level), marker, SEPARATOR)
}

fn indent(level: usize) -> String {
    " ".repeat(level * INDENT_WIDTH)
}

/// Renders a [`Definition`] as a plaintext report.
pub struct PlaintextRenderer {
    options: RenderOptions,
}

impl PlaintextRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, definition: &Definition) -> String {
        let mut out = String::with_capacity(2048);
        out.push_str(&format!("TERME: {}\n", definition.headword));

        if definition.is_multi_sense() {
            for (sense_id, entry) in &definition.senses {
                out.push('\n');
                out.push_str(&SENSE_RULE.to_string().repeat(RULE_WIDTH));
                out.push('\n');
                out.push_str(&format!("SENS #{sense_id}\n"));
                self.render_sense(&mut out, entry, 1);
            }
        } else if let Some(entry) = definition.senses.values().next() {
            self.render_sense(&mut out, entry, 0);
        }

        out
    }

    fn render_sense(&self, out: &mut String, entry: &Entry, base: usize) {
        let blocks = [
            self.header_block(entry, base),
            self.variants_block(&entry.variants, base),
            self.section_block(
                "Synonymes",
                self.options.suppress_synonyms,
                self.plain_items(&entry.synonyms, base),
                base,
            ),
            self.section_block(
                "Historique",
                self.options.suppress_history,
                self.history_items(&entry.history, base),
                base,
            ),
            self.section_block(
                "Étymologie",
                self.options.suppress_etymology,
                self.plain_items(&entry.etymology, base),
                base,
            ),
        ];

        for block in blocks.into_iter().flatten() {
            out.push('\n');
            out.push_str(&block);
        }
    }

    fn header_block(&self, entry: &Entry, base: usize) -> Option<String> {
        let mut block = String::new();
        for (label, value) in [
            ("Prononciation", &entry.header.pronunciation),
            ("Nature", &entry.header.grammatical_nature),
        ] {
            if !value.is_empty() {
                push_wrapped(&mut block, &indent(base), &format!("{label}: {value}"));
            }
        }
        (!block.is_empty()).then_some(block)
    }

    fn variants_block(&self, variants: &[Variant], base: usize) -> Option<String> {
        if variants.is_empty() {
            return None;
        }
        let mut block = String::new();
        for (i, variant) in variants.iter().enumerate() {
            let number = variant.number.unwrap_or(i as u32 + 1);
            push_wrapped(&mut block, &item_prefix(base, ItemKind::Number(number)), &variant.text);
            self.push_citations(&mut block, &variant.citations, base + 1);
            for sub_item in &variant.sub_items {
                push_wrapped(&mut block, &item_prefix(base + 1, ItemKind::SubBullet), &sub_item.text);
                self.push_citations(&mut block, &sub_item.citations, base + 2);
            }
        }
        Some(block)
    }

    fn section_block(&self, title: &str, suppressed: bool, items: String, base: usize) -> Option<String> {
        if suppressed || items.is_empty() {
            return None;
        }
        Some(format!(
            "{pad}{rule}\n{pad}{title}\n{items}",
            pad = indent(base),
            rule = SECTION_RULE.to_string().repeat(RULE_WIDTH),
        ))
    }

    fn plain_items(&self, items: &[String], base: usize) -> String {
        let mut block = String::new();
        for item in items {
            push_wrapped(&mut block, &item_prefix(base, ItemKind::Bullet), item);
        }
        block
    }

    fn history_items(&self, history: &[HistoryItem], base: usize) -> String {
        let mut block = String::new();
        for item in history {
            push_wrapped(&mut block, &item_prefix(base, ItemKind::Bullet), &item.label);
            self.push_citations(&mut block, &item.citations, base + 1);
        }
        block
    }

    fn push_citations(&self, block: &mut String, citations: &[Citation], level: usize) {
        if self.options.suppress_citations {
            return;
        }
        for citation in citations {
            push_wrapped(block, &item_prefix(level, ItemKind::SubBullet), &format_citation(citation));
        }
    }
}

/// `author (reference): “quote”`
pub fn format_citation(citation: &Citation) -> String {
    format!(
        "{} ({}): “{}”",
        citation.author,
        citation.reference,
        citation.quote.trim()
    )
}

fn push_wrapped(block: &mut String, prefix: &str, text: &str) {
    for line in wrap_with_prefix(prefix, text, WRAP_WIDTH) {
        block.push_str(&line);
        block.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{EntryHeader, SubItem};

    fn citation(quote: &str) -> Citation {
        Citation::new("VOLT.", "Cand. 1", quote)
    }

    fn sample_entry(sense_id: u32) -> Entry {
        Entry {
            headword: "GRAND, ANDE".to_string(),
            sense_id,
            header: EntryHeader {
                pronunciation: "gran".to_string(),
                grammatical_nature: "adj.".to_string(),
            },
            variants: vec![
                Variant {
                    number: Some(1),
                    text: "Qui a de l'étendue.".to_string(),
                    sub_items: vec![SubItem {
                        text: "Grand homme.".to_string(),
                        citations: vec![citation("Un grand homme.")],
                    }],
                    citations: vec![citation("Tout est au mieux.")],
                },
                Variant {
                    number: None,
                    text: "Qui dépasse.".to_string(),
                    ..Variant::default()
                },
            ],
            synonyms: vec!["GRAND, GROS.".to_string()],
            history: vec![HistoryItem {
                label: "XIe s.".to_string(),
                citations: vec![citation("Li reis.")],
            }],
            etymology: vec!["Lat. grandis.".to_string()],
        }
    }

    fn single(entry: Entry) -> Definition {
        Definition::from_entries("GRAND", vec![entry])
    }

    #[test]
    fn renders_single_sense_layout() {
        let text = PlaintextRenderer::new(RenderOptions::default()).render(&single(sample_entry(1)));
        let section_rule = SECTION_RULE.to_string().repeat(RULE_WIDTH);
        let expected = format!(
            "TERME: GRAND\n\
             \n\
             Prononciation: gran\n\
             Nature: adj.\n\
             \n\
             1.\u{a0}Qui a de l'étendue.\n    \
             ◦\u{a0}VOLT. (Cand. 1): “Tout est au mieux.”\n    \
             ◦\u{a0}Grand homme.\n        \
             ◦\u{a0}VOLT. (Cand. 1): “Un grand homme.”\n\
             2.\u{a0}Qui dépasse.\n\
             \n\
             {rule}\n\
             Synonymes\n\
             •\u{a0}GRAND, GROS.\n\
             \n\
             {rule}\n\
             Historique\n\
             •\u{a0}XIe s.\n    \
             ◦\u{a0}VOLT. (Cand. 1): “Li reis.”\n\
             \n\
             {rule}\n\
             Étymologie\n\
             •\u{a0}Lat. grandis.\n",
            rule = section_rule
        );
        assert_eq!(text, expected);
        assert!(!text.contains("SENS #"));
        assert!(!text.contains(SENSE_RULE));
    }

    #[test]
    fn explicit_number_wins_over_position() {
        let mut entry = sample_entry(1);
        entry.variants[1].number = Some(3);
        let text = PlaintextRenderer::new(RenderOptions::default()).render(&single(entry));
        assert!(text.contains("\n3.\u{a0}Qui dépasse.\n"));
        assert!(!text.contains("\n2.\u{a0}"));
    }

    #[test]
    fn suppressing_synonyms_removes_only_that_section() {
        let def = single(sample_entry(1));
        let full = PlaintextRenderer::new(RenderOptions::default()).render(&def);
        let trimmed = PlaintextRenderer::new(RenderOptions {
            suppress_synonyms: true,
            ..RenderOptions::default()
        })
        .render(&def);

        assert!(full.contains("Synonymes"));
        assert!(!trimmed.contains("Synonymes"));
        assert!(!trimmed.contains("GRAND, GROS."));
        let section_rule = SECTION_RULE.to_string().repeat(RULE_WIDTH);
        let removed = format!("\n{section_rule}\nSynonymes\n•\u{a0}GRAND, GROS.\n");
        assert_eq!(full.replacen(&removed, "", 1), trimmed);
    }

    #[test]
    fn suppressing_citations_hides_all_of_them() {
        let text = PlaintextRenderer::new(RenderOptions {
            suppress_citations: true,
            ..RenderOptions::default()
        })
        .render(&single(sample_entry(1)));
        assert!(!text.contains('“'));
        assert!(text.contains("•\u{a0}XIe s.\n"));
        assert!(text.contains("◦\u{a0}Grand homme.\n"));
    }

    #[test]
    fn everything_suppressed_keeps_variants() {
        let text = PlaintextRenderer::new(RenderOptions {
            suppress_citations: true,
            suppress_synonyms: true,
            suppress_history: true,
            suppress_etymology: true,
        })
        .render(&single(sample_entry(1)));
        assert!(!text.contains(SECTION_RULE));
        assert!(text.ends_with("2.\u{a0}Qui dépasse.\n"));
    }

    #[test]
    fn multi_sense_has_markers_and_rules() {
        let def = Definition::from_entries("GRAND", vec![sample_entry(1), sample_entry(2)]);
        let text = PlaintextRenderer::new(RenderOptions::default()).render(&def);
        let sense_rule = SENSE_RULE.to_string().repeat(RULE_WIDTH);

        assert_eq!(text.matches("SENS #1\n").count(), 1);
        assert_eq!(text.matches("SENS #2\n").count(), 1);
        assert_eq!(text.matches(&sense_rule).count(), 2);
        assert!(text.contains(&format!("{sense_rule}\nSENS #1\n\n    Prononciation: gran\n")));
        assert!(text.contains(&format!("{sense_rule}\nSENS #2\n")));
        assert!(text.find("SENS #1").unwrap() < text.find("SENS #2").unwrap());
        assert!(text.contains("\n    1.\u{a0}Qui a de l'étendue.\n"));
        assert!(text.contains("\n        ◦\u{a0}Grand homme.\n"));
        assert!(text.contains("\n    Synonymes\n    •\u{a0}GRAND, GROS.\n"));
    }

    #[test]
    fn missing_pronunciation_omits_line() {
        let mut entry = sample_entry(1);
        entry.header.pronunciation.clear();
        let text = PlaintextRenderer::new(RenderOptions::default()).render(&single(entry));
        assert!(!text.contains("Prononciation"));
        assert!(text.starts_with("TERME: GRAND\n\nNature: adj.\n\n1."));
    }

    #[test]
    fn long_citation_wraps_under_text() {
        let mut entry = sample_entry(1);
        entry.variants[0].citations = vec![citation(&"mot ".repeat(40))];
        let text = PlaintextRenderer::new(RenderOptions::default()).render(&single(entry));
        let lines: Vec<&str> = text.lines().collect();
        let start = lines
            .iter()
            .position(|l| l.starts_with("    ◦\u{a0}VOLT."))
            .unwrap();
        assert!(lines[start].chars().count() <= WRAP_WIDTH);
        assert!(lines[start + 1].starts_with("      mot"));
        assert!(lines[start + 1].chars().count() <= WRAP_WIDTH);
    }

    #[test]
    fn rendering_is_repeatable() {
        let def = Definition::from_entries("GRAND", vec![sample_entry(1), sample_entry(2)]);
        let renderer = PlaintextRenderer::new(RenderOptions::default());
        assert_eq!(renderer.render(&def), renderer.render(&def));
    }

    #[test]
    fn prefixes() {
        assert_eq!(item_prefix(0, ItemKind::Number(12)), "12.\u{a0}");
        assert_eq!(item_prefix(1, ItemKind::Bullet), "    •\u{a0}");
        assert_eq!(item_prefix(2, ItemKind::SubBullet), "        ◦\u{a0}");
    }
}
