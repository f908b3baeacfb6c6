use super::rule::{Rule, Theme};
use super::span::Style;
use super::{HighlightOptions, RuleHighlighter};
use once_cell::sync::Lazy;
use std::sync::Arc;

const COLOR_CODE: u32 = 0xff009900;
const COLOR_DIRECTIVE: u32 = 0xffcc6600;
const COLOR_CODE_BLOCK: u32 = 0x2bafafaf;
const COLOR_HEADER: u32 = 0xffef6d00;
const COLOR_LIST: u32 = 0xffdaa521;

static RULES: Lazy<Arc<[Rule]>> = Lazy::new(|| {
    Arc::from(vec![
        Rule::new("literal", r"``([^`]+)``").unwrap(),
        Rule::new("bold", r"\*\*([^*]+)\*\*").unwrap(),
        Rule::new("italic", r"\*([^*]+)\*").unwrap(),
        Rule::new("directive", r"(?m)^\.\. [a-z-]+::").unwrap(),
        Rule::new("code_block", r"(?s)::\s*\n\n.*?(?=\n\n|\z)").unwrap(),
        Rule::new(
            "underline",
            r#"(?m)^(=+|-+|~+|`+|:+|\.+|'+|"+|\^+|_+|\*+)$"#,
        )
        .unwrap(),
        Rule::new("list", r"(?m)^(\*|\d+\.|#\.) ").unwrap(),
    ])
});

fn theme() -> Theme {
    Theme::new("restructuredtext")
        .with("literal", Style::fg(COLOR_CODE))
        .with("bold", Style::new().bold())
        .with("italic", Style::new().italic())
        .with("directive", Style::fg(COLOR_DIRECTIVE))
        .with("code_block", Style::bg(COLOR_CODE_BLOCK))
        .with("underline", Style::fg(COLOR_HEADER))
        .with("list", Style::fg(COLOR_LIST))
}

pub fn highlighter(options: &HighlightOptions) -> RuleHighlighter {
    RuleHighlighter::new(RULES.clone(), theme(), options.tab_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{Color, Highlighter};

    #[test]
    fn test_rst_spans() {
        let buffer = "Title\n=====\n\n.. note::\n\n* item with ``lit`` and **b**\n\nExample::\n\n    code\n\nafter";
        let ranges = highlighter(&HighlightOptions::default()).highlight(buffer);
        let find = |text: &str| ranges.iter().find(|r| &buffer[r.start..r.end] == text);

        assert_eq!(find("=====").unwrap().style.foreground, Some(Color(COLOR_HEADER)));
        assert_eq!(find(".. note::").unwrap().style.foreground, Some(Color(COLOR_DIRECTIVE)));
        assert_eq!(find("* ").unwrap().style.foreground, Some(Color(COLOR_LIST)));
        assert_eq!(find("``lit``").unwrap().style.foreground, Some(Color(COLOR_CODE)));
        assert!(find("**b**").unwrap().style.bold);
        assert_eq!(
            find("::\n\n    code").unwrap().style.background,
            Some(Color(COLOR_CODE_BLOCK))
        );
    }
}
