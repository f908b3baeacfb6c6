use super::rule::{Rule, Theme};
use super::span::{Color, Style};
use super::{HighlightOptions, RuleHighlighter};
use once_cell::sync::Lazy;
use std::sync::Arc;

const COLOR_HEADING: u32 = 0xffef6d00;
const COLOR_LINK: u32 = 0xff1ea3fe;
const COLOR_LIST: u32 = 0xffdaa521;
const COLOR_DIM: u32 = 0xff8c8c8c;
const COLOR_BLOCK: u32 = 0xdddddddd;

/// Org emphasis: a single marker char around non-blank text.
fn emphasis(token: &'static str, markers: &str) -> Rule {
    let pattern = format!(
        r"(?:^|(?<=[\s{{(]))([{markers}])(?=\S)(?!\1+\1)(.*?)\S\1(?=$|[\s.,:;\-}})])"
    );
    Rule::new(token, &pattern).unwrap()
}

static RULES: Lazy<Arc<[Rule]>> = Lazy::new(|| {
    Arc::from(vec![
        Rule::new("heading", r"(?m)^(\*+) (.*?)$").unwrap(),
        Rule::new(
            "link",
            r"\[\[.*?\]\]|<.*?>|https?://\S+|\[.*?\]\[.*?\]|\[.*?\]\n",
        )
        .unwrap(),
        Rule::new("list", r"(?m)^[^\S\n]{0,16}([+-])( \[[ X]\])?(?= )").unwrap(),
        Rule::new("list", r"(?m)^[^\S\n]{0,16}(\d+)(:?\.|\))\s").unwrap(),
        Rule::new("meta", r"(?m)^(#\+)(.*?)$").unwrap(),
        Rule::new("meta", r"(?m)^(#+) (.*?)$").unwrap(),
        Rule::new("block", r"(?m)#\+BEGIN_.{1,15}$\s([\s\S]*?)(?=#\+END)")
            .unwrap()
            .groups(&[1]),
        emphasis("bold", r"*"),
        emphasis("italic", "/"),
        emphasis("strikethrough", r"+"),
        emphasis("underline", "_"),
        emphasis("code", "=~"),
    ])
});

fn theme() -> Theme {
    Theme::new("orgmode")
        .with("heading", Style::fg(COLOR_HEADING))
        .with("link", Style::fg(COLOR_LINK))
        .with("list", Style::fg(COLOR_LIST))
        .with("meta", Style::fg(COLOR_DIM))
        .with("block", Style::bg(COLOR_BLOCK))
        .with("bold", Style::new().bold())
        .with("italic", Style::new().italic())
        .with("strikethrough", Style::new().strikethrough())
        .with("underline", Style::new().underline(Color(0xff000000)))
        .with("code", Style::new().monospace())
}

pub fn highlighter(options: &HighlightOptions) -> RuleHighlighter {
    RuleHighlighter::new(RULES.clone(), theme(), options.tab_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{Highlighter, StyledRange};

    fn ranges(buffer: &str) -> Vec<(String, StyledRange)> {
        highlighter(&HighlightOptions::default())
            .highlight(buffer)
            .into_iter()
            .map(|r| (buffer[r.start..r.end].to_string(), r))
            .collect()
    }

    #[test]
    fn test_headings_and_emphasis() {
        let ranges = ranges("* Top\n** Sub\n*bold* /it/ +gone+ _under_ =code=");
        let style = |text: &str| {
            ranges
                .iter()
                .find(|(t, _)| t == text)
                .map(|(_, r)| r.style.clone())
                .unwrap()
        };
        assert_eq!(style("* Top").foreground, Some(Color(COLOR_HEADING)));
        assert_eq!(style("** Sub").foreground, Some(Color(COLOR_HEADING)));
        assert!(style("*bold*").bold);
        assert!(style("/it/").italic);
        assert!(style("+gone+").strikethrough);
        assert!(style("_under_").underline.is_some());
        assert!(style("=code=").monospace);
    }

    #[test]
    fn test_emphasis_rule() {
        let matched = |markers: &str, text: &str| {
            let rule = emphasis("emphasis", markers);
            fancy_regex::Regex::new(rule.pattern())
                .unwrap()
                .find(text)
                .unwrap()
                .map(|m| m.as_str().to_string())
        };
        assert_eq!(matched("*", "a *bold* b").as_deref(), Some("*bold*"));
        assert_eq!(matched("/", "(/it/)").as_deref(), Some("/it/"));
        assert_eq!(matched("=~", "use =code=, then").as_deref(), Some("=code="));
        assert_eq!(matched("*", "{*b*}").as_deref(), Some("*b*"));
        assert_eq!(matched("*", "a ** b"), None);
        assert_eq!(matched("*", "2*3*4"), None);
    }

    #[test]
    fn test_block_and_meta() {
        let ranges = ranges("#+TITLE: Notes\n#+BEGIN_SRC rust\nlet x = 1;\n#+END_SRC");
        assert!(ranges
            .iter()
            .any(|(t, r)| t == "#+TITLE: Notes" && r.style.foreground == Some(Color(COLOR_DIM))));
        assert!(ranges
            .iter()
            .any(|(t, r)| t == "let x = 1;\n" && r.style.background == Some(Color(COLOR_BLOCK))));
    }

    #[test]
    fn test_links() {
        let ranges = ranges("see [[https://orgmode.org][Org]]");
        assert!(ranges
            .iter()
            .any(|(t, r)| t == "[[https://orgmode.org][Org]]"
                && r.style.foreground == Some(Color(COLOR_LINK))));
    }
}
