//! Spans shared by every format: tabs, URLs and hex colour literals.

use super::span::{Color, SpanSet, Style};
use once_cell::sync::Lazy;
use regex::Regex;

pub const URL_COLOR: u32 = 0xff1ea3fe;
pub const URL_RELATIVE_SIZE: f32 = 0.85;

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\b(?:(?:https?|ftp|file)://|mailto:)[^\s<>"'`]+"#).unwrap()
});

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#(?:[a-fA-F0-9]{8}|[a-fA-F0-9]{6}|[a-fA-F0-9]{3})\b").unwrap()
});

/// Runs the base pass, painted before any format rule.
pub fn paint(spans: &mut SpanSet<'_>, tab_width: u8) {
    paint_tabs(spans, tab_width);
    paint_urls(spans);
    paint_hex_colors(spans);
}

pub fn paint_tabs(spans: &mut SpanSet<'_>, tab_width: u8) {
    let style = Style::new().tab_width(tab_width);
    let buffer = spans.buffer();
    for (idx, _) in buffer.match_indices('\t') {
        spans.add(idx, idx + 1, &style);
    }
}

pub fn paint_urls(spans: &mut SpanSet<'_>) {
    let style = Style::fg(URL_COLOR).relative_size(URL_RELATIVE_SIZE);
    let buffer = spans.buffer();
    for m in URL.find_iter(buffer) {
        let url = m
            .as_str()
            .trim_end_matches(['.', ',', ';', ':', '!', '?', ')', ']', '}']);
        spans.add(m.start(), m.start() + url.len(), &style);
    }
}

pub fn paint_hex_colors(spans: &mut SpanSet<'_>) {
    let buffer = spans.buffer();
    for m in HEX_COLOR.find_iter(buffer) {
        if let Some(color) = Color::parse(m.as_str()) {
            spans.add(m.start(), m.end(), &Style::new().underline(color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_ranges(buffer: &str) -> Vec<(usize, usize)> {
        let mut spans = SpanSet::new(buffer);
        paint(&mut spans, 4);
        spans
            .into_ranges()
            .into_iter()
            .map(|r| (r.start, r.end))
            .collect()
    }

    #[test]
    fn test_url_span() {
        let buffer = "Visit http://example.com now";
        assert_eq!(base_ranges(buffer), vec![(6, 24)]);
    }

    #[test]
    fn test_url_trailing_punctuation() {
        let buffer = "See (https://example.com/a?b=1).";
        let ranges = base_ranges(buffer);
        assert_eq!(ranges.len(), 1);
        assert_eq!(&buffer[ranges[0].0..ranges[0].1], "https://example.com/a?b=1");
    }

    #[test]
    fn test_tab_spans() {
        let mut spans = SpanSet::new("a\tb\t");
        paint_tabs(&mut spans, 8);
        let ranges = spans.into_ranges();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[1].start, 3);
        assert_eq!(ranges[1].style.tab_width, Some(8));
    }

    #[test]
    fn test_hex_color_spans() {
        let buffer = "color: #ff0000; alpha #80ff0000, short #abc, not #abcd";
        let mut spans = SpanSet::new(buffer);
        paint_hex_colors(&mut spans);
        let ranges = spans.into_ranges();
        assert_eq!(ranges.len(), 3);
        assert_eq!(ranges[0].style.underline, Some(Color(0xffff0000)));
        assert_eq!(ranges[1].style.underline, Some(Color(0x80ff0000)));
        assert_eq!(ranges[2].style.underline, Some(Color(0xffaabbcc)));
    }
}
