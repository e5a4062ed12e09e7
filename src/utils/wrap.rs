/// Word-wrap `text` behind `prefix` so no line exceeds `width` characters, unless a
/// single word is longer than the room left for it. Continuation lines are indented
/// by the printed width of the prefix. Non-breaking spaces never break.
pub fn wrap_with_prefix(prefix: &str, text: &str, width: usize) -> Vec<String> {
    let hang = prefix.chars().count();
    let mut lines = Vec::new();
    let mut line = prefix.to_string();
    let mut line_width = hang;
    let mut line_has_words = false;

    for word in text.split(is_breaking_space).filter(|w| !w.is_empty()) {
        let word_width = word.chars().count();
        if line_has_words && line_width + 1 + word_width > width {
            lines.push(line);
            line = " ".repeat(hang);
            line_width = hang;
            line_has_words = false;
        }
        if line_has_words {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
        line_has_words = true;
    }

    lines.push(line);
    lines
}

fn is_breaking_space(c: char) -> bool {
    c.is_whitespace() && c != '\u{a0}' && c != '\u{202f}'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hangs_continuation_under_text() {
        let lines = wrap_with_prefix("1.\u{a0}", "aaaa bbbb cccc", 12);
        assert_eq!(lines, vec!["1.\u{a0}aaaa bbbb", "   cccc"]);
    }

    #[test]
    fn keeps_overlong_word_whole() {
        let lines = wrap_with_prefix("• ", "abcdefghijkl xy", 6);
        assert_eq!(lines, vec!["• abcdefghijkl", "  xy"]);
    }

    #[test]
    fn empty_text_keeps_prefix() {
        assert_eq!(wrap_with_prefix("2.\u{a0}", "", 80), vec!["2.\u{a0}"]);
    }

    #[test]
    fn non_breaking_space_binds_words() {
        let lines = wrap_with_prefix("", "voir\u{a0}: aa", 7);
        assert_eq!(lines, vec!["voir\u{a0}:", "aa"]);
    }
}
