use super::rule::{Rule, Theme};
use super::span::Style;
use super::{HighlightOptions, RuleHighlighter};
use once_cell::sync::Lazy;
use std::sync::Arc;

const COLOR_HEADING: u32 = 0xff4e9a06;
const COLOR_HIGHLIGHT_BACKGROUND: u32 = 0xffffa062;
const COLOR_LIST: u32 = 0xffdaa521;
const COLOR_LINK: u32 = 0xff1ea3fd;
const COLOR_CHECKED: u32 = 0xff54a309;
const COLOR_CROSSED: u32 = 0xffa90000;
const COLOR_ZIM_HEADER: u32 = 0xff808080;
const COLOR_CODEBLOCK: u32 = 0xff8c8c8c;

/// `**bold**`, `//italic//`, `__highlight__` and `~~strike~~` share one shape.
fn emphasis(token: &'static str, delimiter: char) -> Rule {
    let d = regex::escape(&delimiter.to_string());
    let pattern = format!(
        r"(?:^|(?<=[\s{d}]))({d}{{2}})[^{d}\s](?=\S)(.*?)[^{d}\s]?\1(?=$|[\s{d}])"
    );
    Rule::new(token, &pattern).unwrap()
}

/// Checkbox brackets take the list colour, the symbol its state colour.
fn checkbox(token: &'static str, symbol: &str) -> [Rule; 2] {
    let pattern = format!(r"(?m)^\t*(\[)({symbol})(\])(?= )");
    [
        Rule::new("checkbox", &pattern).unwrap().groups(&[1, 3]),
        Rule::new(token, &pattern).unwrap().groups(&[2]),
    ]
}

static RULES: Lazy<Arc<[Rule]>> = Lazy::new(|| {
    let mut rules = vec![
        Rule::new("heading", r"(?:^|(?<=\s))(==+)[ \t]+(.*?)[ \t]\1(?=$|\s)").unwrap(),
        emphasis("bold", '*'),
        emphasis("italic", '/'),
        emphasis("highlight", '_'),
        emphasis("strikethrough", '~'),
        Rule::new("code", r"''(?!')(.+?)''").unwrap(),
        Rule::new("code", r"(?ms)^'''\n(.*?)\n'''$").unwrap(),
        Rule::new("list", r"(?m)^[^\S\n]{0,10}(\*)(?= )")
            .unwrap()
            .groups(&[1]),
        Rule::new("list", r"(?m)^[^\S\n]{0,10}((?:\d+|[a-zA-Z])\.)(?= )")
            .unwrap()
            .groups(&[1]),
        Rule::new("link", r"\[\[(?!\[)((.+?)(\|(.+?))?\]*)\]\]").unwrap(),
        Rule::new("superscript", r"(\^\{(?!~)(.+?)\})").unwrap(),
        Rule::new("subscript", r"(_\{(?!~)(.+?)\})").unwrap(),
    ];
    rules.extend(checkbox("checkbox_unchecked", " "));
    rules.extend(checkbox("checkbox_checked", r"\*"));
    rules.extend(checkbox("checkbox_crossed", "x"));
    rules.extend(checkbox("checkbox_arrow", "[<>]"));
    rules.push(
        Rule::new(
            "zim_header",
            r"^Content-Type: text/x-zim-wiki(\r\n|\r|\n)Wiki-Format: zim \d+\.\d+(\r\n|\r|\n)Creation-Date: \d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[.+:\d]+",
        )
        .unwrap(),
    );
    Arc::from(rules)
});

fn theme() -> Theme {
    Theme::new("wikitext")
        .with("heading", Style::fg(COLOR_HEADING).bold())
        .with("bold", Style::new().bold())
        .with("italic", Style::new().italic())
        .with("highlight", Style::bg(COLOR_HIGHLIGHT_BACKGROUND))
        .with("strikethrough", Style::new().strikethrough())
        .with("code", Style::bg(COLOR_CODEBLOCK).monospace())
        .with("list", Style::fg(COLOR_LIST))
        .with("link", Style::fg(COLOR_LINK))
        .with("superscript", Style::new().superscript())
        .with("subscript", Style::new().subscript())
        .with("checkbox", Style::fg(COLOR_LIST))
        .with("checkbox_unchecked", Style::fg(0xffffffff))
        .with("checkbox_checked", Style::fg(COLOR_CHECKED))
        .with("checkbox_crossed", Style::fg(COLOR_CROSSED))
        .with("checkbox_arrow", Style::fg(COLOR_LIST))
        .with("zim_header", Style::fg(COLOR_ZIM_HEADER))
}

pub fn highlighter(options: &HighlightOptions) -> RuleHighlighter {
    RuleHighlighter::new(RULES.clone(), theme(), options.tab_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{Color, Highlighter};

    fn find(buffer: &str, text: &str) -> Vec<crate::highlight::StyledRange> {
        highlighter(&HighlightOptions::default())
            .highlight(buffer)
            .into_iter()
            .filter(|r| &buffer[r.start..r.end] == text)
            .collect()
    }

    #[test]
    fn test_heading_and_emphasis() {
        let buffer = "====== Page ======\n**bold** //it// __hi__ ~~no~~";
        assert_eq!(
            find(buffer, "====== Page ======")[0].style.foreground,
            Some(Color(COLOR_HEADING))
        );
        assert!(find(buffer, "**bold**")[0].style.bold);
        assert!(find(buffer, "//it//")[0].style.italic);
        assert_eq!(
            find(buffer, "__hi__")[0].style.background,
            Some(Color(COLOR_HIGHLIGHT_BACKGROUND))
        );
        assert!(find(buffer, "~~no~~")[0].style.strikethrough);
    }

    #[test]
    fn test_checkbox_states() {
        let buffer = "[*] done\n[x] dropped\n[ ] open";
        assert_eq!(find(buffer, "*")[0].style.foreground, Some(Color(COLOR_CHECKED)));
        assert_eq!(find(buffer, "x")[0].style.foreground, Some(Color(COLOR_CROSSED)));
        assert_eq!(find(buffer, "[").len(), 3);
    }

    #[test]
    fn test_zim_header_and_link() {
        let buffer = "Content-Type: text/x-zim-wiki\nWiki-Format: zim 0.6\n\
                      Creation-Date: 2024-01-02T10:11:12+01:00\n\n[[Page:Sub|desc]]";
        let ranges = highlighter(&HighlightOptions::default()).highlight(buffer);
        assert!(ranges
            .iter()
            .any(|r| r.start == 0 && r.style.foreground == Some(Color(COLOR_ZIM_HEADER))));
        assert_eq!(
            find(buffer, "[[Page:Sub|desc]]")[0].style.foreground,
            Some(Color(COLOR_LINK))
        );
    }

    #[test]
    fn test_url_is_not_italic() {
        assert!(find("see http://example.com now", "//example.com")
            .iter()
            .all(|r| !r.style.italic));
    }
}
