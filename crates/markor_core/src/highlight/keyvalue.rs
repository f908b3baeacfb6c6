use super::rule::{Rule, Theme};
use super::span::Style;
use super::{HighlightOptions, RuleHighlighter};
use once_cell::sync::Lazy;
use std::sync::Arc;

const COLOR_ACCENT: u32 = 0xffef6d00;
const COLOR_COMMENT: u32 = 0xff88b04b;

static RULES: Lazy<Arc<[Rule]>> = Lazy::new(|| {
    Arc::from(vec![
        Rule::new("key", r"(?im)^([a-z_0-9]+)[-:=]").unwrap(),
        Rule::new("key", r#"(?i)(["'][a-z_0-9\- ]+["']\s*[-:=])"#).unwrap(),
        Rule::new("list", r"(?m)^[^\S\n]{0,16}([*+-])( \[[ xX]\])?(?= )").unwrap(),
        Rule::new("key", r#"(?im)^([^\s:;]+)(;([^=:;]+)="?([^:;]+)"?)*:"#).unwrap(),
        Rule::new("key", r"(?im)^([a-z_0-9]+)\s*[=]").unwrap(),
        Rule::new("section", r"(?im)^(\[.*\])$").unwrap(),
        Rule::new("comment", r"(?im)^(;.*)$").unwrap(),
        Rule::new("comment", r"(?im)^((#|//)\s+.*)$").unwrap(),
    ])
});

fn theme() -> Theme {
    Theme::new("keyvalue")
        .with("key", Style::new().bold())
        .with("list", Style::fg(COLOR_ACCENT))
        .with("section", Style::fg(COLOR_ACCENT).relative_size(1.25))
        .with("comment", Style::fg(COLOR_COMMENT))
}

pub fn highlighter(options: &HighlightOptions) -> RuleHighlighter {
    RuleHighlighter::new(RULES.clone(), theme(), options.tab_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{Color, Highlighter};

    #[test]
    fn test_ini() {
        let buffer = "[server]\nport = 8080\n; legacy\n# note here";
        let ranges = highlighter(&HighlightOptions::default()).highlight(buffer);
        let text = |r: &crate::highlight::StyledRange| &buffer[r.start..r.end];

        let section = ranges.iter().find(|r| text(r) == "[server]").unwrap();
        assert_eq!(section.style.relative_size, Some(1.25));
        assert_eq!(section.style.foreground, Some(Color(COLOR_ACCENT)));
        assert!(ranges.iter().any(|r| text(r) == "port =" && r.style.bold));
        assert!(ranges
            .iter()
            .any(|r| text(r) == "; legacy" && r.style.foreground == Some(Color(COLOR_COMMENT))));
        assert!(ranges.iter().any(|r| text(r) == "# note here"));
    }

    #[test]
    fn test_yaml_and_vcard_keys() {
        let buffer = "name: markor\nTEL;TYPE=cell:+123";
        let ranges = highlighter(&HighlightOptions::default()).highlight(buffer);
        let keys: Vec<_> = ranges
            .iter()
            .filter(|r| r.style.bold)
            .map(|r| &buffer[r.start..r.end])
            .collect();
        assert!(keys.contains(&"name:"));
        assert!(keys.contains(&"TEL;TYPE=cell:"));
    }
}
