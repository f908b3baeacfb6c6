use super::rule::{Rule, Theme};
use super::span::Style;
use super::{HighlightOptions, RuleHighlighter};
use once_cell::sync::Lazy;
use std::sync::Arc;

const COLOR_HEADING: u32 = 0xffef6d00;
const COLOR_LINK: u32 = 0xff1ea3fe;
const COLOR_LIST: u32 = 0xffdaa521;
const COLOR_QUOTE: u32 = 0xff88b04c;
const COLOR_CODEBLOCK: u32 = 0x2bafafaf;

/// Emphasis may open at the start or after whitespace and brackets, and
/// close before whitespace, punctuation or a closing bracket.
const OPEN: &str = r"(?:^|(?<=[\s\[{(]))";
const CLOSE: &str = r"(?=$|[\s.,:;\-\]})])";

pub(super) static RULES: Lazy<Arc<[Rule]>> = Lazy::new(|| {
    let bold = format!(r"{OPEN}(([*_]){{2,3}})(?=\S)(.*?)\S\1{CLOSE}");
    let italics = format!(r"{OPEN}([*_])(?=(?!\1)|\1{{2,}})(?=\S)(.*?)\S\1{CLOSE}");

    Arc::from(vec![
        Rule::new(
            "heading",
            r"(?m)((^#{1,6}[^\S\n][^\n]+)|((\n|^)[^\s]+.*?\n(-{2,}|={2,})[^\S\n]*$))",
        )
        .unwrap(),
        Rule::new(
            "link",
            r"(?m)(!)?\[([^\]]*)\]\(([^()]*(?:\([^()]*\)[^()]*)*)\)",
        )
        .unwrap(),
        Rule::new("list", r"(?m)^[^\S\n]{0,16}([*+-])( \[[ xX]\])?(?= )").unwrap(),
        Rule::new("list", r"(?m)^[^\S\n]{0,16}(\d+)(:?\.|\))\s").unwrap(),
        Rule::new("bold", &bold).unwrap(),
        Rule::new("italic", &italics).unwrap(),
        Rule::new("quote", r"(?m)^>").unwrap(),
        Rule::new("strikethrough", r"~{2}(.*?)\S~{2}").unwrap(),
        Rule::new("code", r"(?m)(`(?!`)(.*?)`)|(^[^\S\n]{4}(?![0-9\-*+]).*$)").unwrap(),
    ])
});

pub(super) fn theme() -> Theme {
    Theme::new("markdown")
        .with("heading", Style::fg(COLOR_HEADING).bold())
        .with("link", Style::fg(COLOR_LINK))
        .with("list", Style::fg(COLOR_LIST))
        .with("bold", Style::new().bold())
        .with("italic", Style::new().italic())
        .with("quote", Style::fg(COLOR_QUOTE))
        .with("strikethrough", Style::new().strikethrough())
        .with("code", Style::bg(COLOR_CODEBLOCK).monospace())
}

pub fn highlighter(options: &HighlightOptions) -> RuleHighlighter {
    RuleHighlighter::new(RULES.clone(), theme(), options.tab_width)
}
