// Cross-cutting prompt fragments and prompt-building utilities.
// Task-specific templates live in career::prompts.

/// Appended to every structured-output prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond with the JSON only. \
    Do not add explanations before or after it.";

/// Keeps at most `max_chars` characters of `text`. Cuts wherever the budget
/// ends, mid-word included.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Fills `{name}` placeholders in `template` from `vars` in a single pass.
///
/// Inserted values are copied verbatim and never scanned again, so user text
/// containing `{name}` stays literal. Braces that do not form a known
/// placeholder (the JSON examples in the templates) are kept as they are.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_input_untouched() {
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 10), "");
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
    }

    #[test]
    fn test_truncate_chars_cuts_mid_sentence() {
        let text = "Built REST APIs with Flask";
        assert_eq!(truncate_chars(text, 9), "Built RES");
    }

    #[test]
    fn test_render_fills_all_placeholders() {
        let out = render("{a} then {b} then {a}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x then y then x");
    }

    #[test]
    fn test_render_does_not_rescan_inserted_values() {
        let out = render("{a} / {b}", &[("a", "see {b} here"), ("b", "BBB")]);
        assert_eq!(out, "see {b} here / BBB");
    }

    #[test]
    fn test_render_keeps_unknown_braces() {
        let out = render(
            r#"Format: [{"title": "..."}] for {who} {unknown} {"#,
            &[("who", "u1")],
        );
        assert_eq!(out, r#"Format: [{"title": "..."}] for u1 {unknown} {"#);
    }
}
