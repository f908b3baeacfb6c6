use super::rule::{Rule, Theme};
use super::span::Style;
use super::{HighlightOptions, RuleHighlighter};
use once_cell::sync::Lazy;
use std::sync::Arc;

const COLOR_PROJECT: u32 = 0xffef6c00;
const COLOR_CONTEXT: u32 = 0xff88b04b;
const COLOR_PRIORITIES: [(char, u32); 6] = [
    ('A', 0xffef2929),
    ('B', 0xffd16900),
    ('C', 0xff59a112),
    ('D', 0xff0091c2),
    ('E', 0xffa952cb),
    ('F', 0xff878986),
];
const COLOR_DONE_DARK: u32 = 0x999d9d9d;
const COLOR_DONE_LIGHT: u32 = 0x993d3d3d;
const COLOR_DATE_DARK: u32 = COLOR_DONE_DARK;
const COLOR_DATE_LIGHT: u32 = 0xcc6d6d6d;

const DATE: &str = r"\d{4}-\d{2}-\d{2}";

static RULES: Lazy<Arc<[Rule]>> = Lazy::new(|| {
    let mut rules = vec![
        Rule::new("context", r"(?:^|\s)(?:@+)(\S+)").unwrap(),
        Rule::new("project", r"(?:^|\s)(?:\++)(\S+)").unwrap(),
        Rule::new("key_value", r"(?i)((?:[a-z]+):(?:[a-z0-9_-]+))").unwrap(),
    ];
    for (letter, _) in COLOR_PRIORITIES {
        let lower = letter.to_ascii_lowercase();
        rules.push(
            Rule::new(
                format!("priority_{lower}"),
                &format!(r"(?m)^\(([{letter}{lower}])\)\s"),
            )
            .unwrap(),
        );
    }
    rules.extend([
        Rule::new("priority", r"(?m)^\(([g-zG-Z])\)\s").unwrap(),
        Rule::new(
            "date",
            &format!(r"(?m)^(?:\([A-Za-z]\)\s)?(?:[Xx] {DATE} )?({DATE})"),
        )
        .unwrap()
        .groups(&[1]),
        Rule::new("due_date", &format!(r"(?m)(^|\s)(due:)({DATE})(\s|$)"))
            .unwrap()
            .groups(&[2, 3]),
        Rule::new("done", r"(?m)(^[Xx]) (.*)$").unwrap(),
    ]);
    Arc::from(rules)
});

fn theme(dark_mode: bool) -> Theme {
    let mut theme = Theme::new(if dark_mode { "todotxt-dark" } else { "todotxt" })
        .with("context", Style::fg(COLOR_CONTEXT))
        .with("project", Style::fg(COLOR_PROJECT))
        .with("key_value", Style::new().italic())
        .with("priority", Style::new().bold())
        .with("due_date", Style::fg(COLOR_PRIORITIES[0].1));
    for (letter, color) in COLOR_PRIORITIES {
        theme.insert(
            format!("priority_{}", letter.to_ascii_lowercase()),
            Style::fg(color).bold(),
        );
    }
    if dark_mode {
        theme
            .with("date", Style::fg(COLOR_DATE_DARK))
            .with("done", Style::fg(COLOR_DONE_DARK).strikethrough())
    } else {
        theme
            .with("date", Style::fg(COLOR_DATE_LIGHT))
            .with("done", Style::fg(COLOR_DONE_LIGHT).strikethrough())
    }
}

pub fn highlighter(options: &HighlightOptions) -> RuleHighlighter {
    RuleHighlighter::new(RULES.clone(), theme(options.dark_mode), options.tab_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{Color, Highlighter, StyledRange};

    fn find(buffer: &str, text: &str, dark_mode: bool) -> Vec<StyledRange> {
        let options = HighlightOptions {
            dark_mode,
            ..Default::default()
        };
        highlighter(&options)
            .highlight(buffer)
            .into_iter()
            .filter(|r| &buffer[r.start..r.end] == text)
            .collect()
    }

    #[test]
    fn test_priority_context_project() {
        let buffer = "(A) 2024-01-05 call mom @phone +family";
        let priority = find(buffer, "(A) ", false);
        assert_eq!(priority[0].style.foreground, Some(Color(0xffef2929)));
        assert!(priority[0].style.bold);
        assert_eq!(
            find(buffer, "2024-01-05", false)[0].style.foreground,
            Some(Color(COLOR_DATE_LIGHT))
        );
        assert_eq!(
            find(buffer, " @phone", false)[0].style.foreground,
            Some(Color(COLOR_CONTEXT))
        );
        assert_eq!(
            find(buffer, " +family", false)[0].style.foreground,
            Some(Color(COLOR_PROJECT))
        );
    }

    #[test]
    fn test_due_date_groups() {
        let buffer = "pay rent due:2024-02-01";
        assert_eq!(find(buffer, "due:", false).len(), 1);
        assert_eq!(
            find(buffer, "2024-02-01", false)[0].style.foreground,
            Some(Color(0xffef2929))
        );
    }

    #[test]
    fn test_done_dark_mode() {
        let buffer = "x 2024-01-06 2024-01-01 file taxes";
        let light = &find(buffer, buffer, false)[0];
        let dark = &find(buffer, buffer, true)[0];
        assert!(light.style.strikethrough);
        assert_eq!(light.style.foreground, Some(Color(COLOR_DONE_LIGHT)));
        assert_eq!(dark.style.foreground, Some(Color(COLOR_DONE_DARK)));
        // Creation date follows the completion date.
        assert_eq!(find(buffer, "2024-01-01", true).len(), 1);
    }
}
