use super::rule::{Rule, Theme};
use super::span::Style;
use super::{HighlightOptions, RuleHighlighter};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Colours from Paul Tol's colour-blind safe schemes.
mod tol {
    pub const CYAN: u32 = 0xff66ccee;
    pub const YELLOW: u32 = 0xffccbb44;
    pub const RED: u32 = 0xffee6677;
    pub const PALE_BLUE: u32 = 0xffbbccee;
    pub const PALE_CYAN: u32 = 0xffcceeff;
    pub const PALE_GREEN: u32 = 0xffccddaa;
    pub const PALE_YELLOW: u32 = 0xffeeeebb;
    pub const PALE_RED: u32 = 0xffffcccc;
    pub const PALE_GRAY: u32 = 0xffdddddd;
    pub const DARK_BLUE: u32 = 0xff222255;
    pub const DARK_CYAN: u32 = 0xff225555;
    pub const DARK_GREEN: u32 = 0xff225522;
    pub const DARK_YELLOW: u32 = 0xff666633;
    pub const DARK_RED: u32 = 0xff663333;
    pub const DARK_GRAY: u32 = 0xff555555;
}

const COLOR_HIGHLIGHT_FG: u32 = 0xff000000;
const COLOR_HIGHLIGHT_BG: u32 = 0xffffff00;
const COLOR_COMMENT: u32 = 0xff888888;

struct Palette {
    link: u32,
    list: u32,
    quote: u32,
    example: u32,
    sidebar: u32,
    table: u32,
    attribute: u32,
    monospace: u32,
}

const LIGHT: Palette = Palette {
    link: tol::DARK_CYAN,
    list: tol::DARK_YELLOW,
    quote: tol::PALE_GREEN,
    example: tol::PALE_BLUE,
    sidebar: tol::PALE_RED,
    table: tol::PALE_YELLOW,
    attribute: tol::PALE_CYAN,
    monospace: tol::PALE_GRAY,
};

const DARK: Palette = Palette {
    link: tol::CYAN,
    list: tol::YELLOW,
    quote: tol::DARK_GREEN,
    example: tol::DARK_BLUE,
    sidebar: tol::DARK_RED,
    table: tol::DARK_YELLOW,
    attribute: tol::DARK_CYAN,
    monospace: tol::DARK_GRAY,
};

/// A delimited block: the delimiter line, the content, the same delimiter again.
fn block(token: &'static str, delimiter: &str) -> Rule {
    let pattern =
        format!(r"(?m)^{delimiter}[\r\n]([\s\S]+?(?=^{delimiter}[\r\n]))^{delimiter}[\r\n]");
    Rule::new(token, &pattern).unwrap()
}

fn inline_macro(name: &str) -> Rule {
    Rule::new("link", &format!(r"{name}:\S*?\[([^\[]*)\]")).unwrap()
}

const HASH_PAIR: &str = r"((#(?!#)(.*?)#(?!#))|(##(?!#)(.*?)##))";

static RULES: Lazy<Arc<[Rule]>> = Lazy::new(|| {
    Arc::from(vec![
        Rule::new("heading", r"(?m)(^(={1,6}|#{1,6})[^\S\n][^\n]+)").unwrap(),
        Rule::new("bold", r"(?m)(\*\S(?!\*)(.*?)\S\*(?!\*))").unwrap(),
        Rule::new("italic", r"(?m)(_\S(?!_)(.*?)\S_(?!_))").unwrap(),
        inline_macro("link"),
        inline_macro("xref"),
        inline_macro("image"),
        inline_macro("include"),
        Rule::new("list", r"(?m)^\*{1,6} {1}").unwrap(),
        Rule::new("list", r"(?m)^(\.{1,6})( {1})").unwrap(),
        Rule::new("list", r"(?m)^(.+\S(:{2,4}|;{2,2}))( {1}|[\r\n])").unwrap(),
        Rule::new(
            "admonition",
            r"(?m)^(NOTE: |TIP: |IMPORTANT: |CAUTION: |WARNING: )",
        )
        .unwrap(),
        Rule::new("square_brackets", r"\[([^\[]*)\]").unwrap(),
        Rule::new("block_title", r"(?m)^\.[^(\s|\.)].*$").unwrap(),
        Rule::new("monospace", r"(?m)(`(?!`)(.*?)`(?!`))").unwrap(),
        block("monospace", r"\-{4}"),
        block("monospace", r"\.{4}"),
        block("quote_block", r"\_{4}"),
        block("example_block", r"\={4}"),
        block("sidebar_block", r"\*{4}"),
        block("table_block", r"\|\={3}"),
        block("comment", r"\/{4}"),
        Rule::new("comment", r"(?m)^\/{2}(?!\/).*$").unwrap(),
        Rule::new("highlight", &format!(r"(?m)(?<!\]){HASH_PAIR}")).unwrap(),
        Rule::new("attribute", r"(?m)^:\S+:").unwrap(),
        Rule::new("attribute", r"(?m)\{\S+\}").unwrap(),
        Rule::new("subscript", r"(?m)(~(?!~)(.*?)~(?!~))").unwrap(),
        Rule::new("superscript", r"(?m)(\^(?!\^)(.*?)\^(?!\^))").unwrap(),
        Rule::new(
            "strikethrough",
            &format!(r"(?m)\[\.line-through\]{HASH_PAIR}"),
        )
        .unwrap(),
    ])
});

fn theme(dark_mode: bool) -> Theme {
    let palette = if dark_mode { &DARK } else { &LIGHT };
    Theme::new(if dark_mode { "asciidoc-dark" } else { "asciidoc" })
        .with("heading", Style::fg(tol::RED))
        .with("bold", Style::new().bold())
        .with("italic", Style::new().italic())
        .with("link", Style::fg(palette.link))
        .with("list", Style::fg(palette.list).monospace())
        .with("admonition", Style::fg(tol::RED).bold().monospace())
        .with("square_brackets", Style::bg(palette.monospace).monospace())
        .with("block_title", Style::bg(palette.monospace))
        .with("monospace", Style::bg(palette.monospace).monospace())
        .with("quote_block", Style::bg(palette.quote))
        .with("example_block", Style::bg(palette.example))
        .with("sidebar_block", Style::bg(palette.sidebar))
        .with("table_block", Style::bg(palette.table))
        .with("comment", Style::fg(COLOR_COMMENT))
        .with(
            "highlight",
            Style::fg(COLOR_HIGHLIGHT_FG).background(COLOR_HIGHLIGHT_BG),
        )
        .with("attribute", Style::bg(palette.attribute).monospace())
        .with("subscript", Style::new().subscript())
        .with("superscript", Style::new().superscript())
        .with("strikethrough", Style::new().strikethrough())
}

pub fn highlighter(options: &HighlightOptions) -> RuleHighlighter {
    RuleHighlighter::new(RULES.clone(), theme(options.dark_mode), options.tab_width)
}
