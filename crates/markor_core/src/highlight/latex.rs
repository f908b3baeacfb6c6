use super::rule::{Rule, Theme};
use super::span::Style;
use super::{HighlightOptions, RuleHighlighter};
use once_cell::sync::Lazy;
use std::sync::Arc;

const COLOR_COMMAND: u32 = 0xff0066cc;
const COLOR_MATH: u32 = 0xff009900;
const COLOR_COMMENT: u32 = 0xff666666;
const COLOR_ENVIRONMENT: u32 = 0xffcc6600;

static RULES: Lazy<Arc<[Rule]>> = Lazy::new(|| {
    Arc::from(vec![
        Rule::new("command", r"\\[a-zA-Z]+(\{[^}]*\})*").unwrap(),
        Rule::new("math", r"\$[^$]+\$").unwrap(),
        Rule::new("math", r"\$\$.*?\$\$").unwrap(),
        Rule::new("comment", r"(?m)(?<!\\)%.*$").unwrap(),
        Rule::new("environment", r"\\(begin|end)\{[^}]+\}").unwrap(),
    ])
});

fn theme() -> Theme {
    Theme::new("latex")
        .with("command", Style::fg(COLOR_COMMAND))
        .with("math", Style::fg(COLOR_MATH))
        .with("comment", Style::fg(COLOR_COMMENT))
        .with("environment", Style::fg(COLOR_ENVIRONMENT))
}

pub fn highlighter(options: &HighlightOptions) -> RuleHighlighter {
    RuleHighlighter::new(RULES.clone(), theme(), options.tab_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{Color, Highlighter};

    #[test]
    fn test_latex_spans() {
        let buffer = "\\begin{document}\n\\textbf{Hi} $x^2$ % note\n50\\% done\n\\end{document}";
        let ranges = highlighter(&HighlightOptions::default()).highlight(buffer);
        let color_of = |text: &str| {
            ranges
                .iter()
                .find(|r| &buffer[r.start..r.end] == text)
                .and_then(|r| r.style.foreground)
        };

        assert_eq!(color_of("\\begin{document}"), Some(Color(COLOR_ENVIRONMENT)));
        assert_eq!(color_of("\\textbf{Hi}"), Some(Color(COLOR_COMMAND)));
        assert_eq!(color_of("$x^2$"), Some(Color(COLOR_MATH)));
        assert_eq!(color_of("% note"), Some(Color(COLOR_COMMENT)));
        assert_eq!(color_of("% done"), None);
    }
}
