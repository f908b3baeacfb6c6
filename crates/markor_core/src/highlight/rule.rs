//! Declarative pattern-to-style mappings.

use super::span::{SpanSet, Style};
use fancy_regex::Regex;
use std::borrow::Cow;
use std::collections::HashMap;

/// A token type, a compiled pattern and the capture groups it styles.
#[derive(Debug, Clone)]
pub struct Rule {
    token: Cow<'static, str>,
    pattern: Regex,
    groups: Vec<usize>,
}

impl Rule {
    /// Compiles a rule styling the whole match.
    pub fn new(
        token: impl Into<Cow<'static, str>>,
        pattern: &str,
    ) -> Result<Self, fancy_regex::Error> {
        Ok(Self {
            token: token.into(),
            pattern: Regex::new(pattern)?,
            groups: vec![0],
        })
    }

    /// Styles only the given capture groups instead of the whole match.
    pub fn groups(mut self, groups: &[usize]) -> Self {
        self.groups = groups.to_vec();
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Adds one range per matched group to `spans`.
    ///
    /// A match failure (e.g. the backtrack limit) ends this rule for the
    /// pass, the ranges found so far are kept.
    pub(crate) fn paint(&self, spans: &mut SpanSet<'_>, style: &Style) {
        let buffer = spans.buffer();

        if self.groups == [0] {
            for m in self.pattern.find_iter(buffer) {
                match m {
                    Ok(m) => spans.add(m.start(), m.end(), style),
                    Err(err) => {
                        tracing::trace!(token = %self.token, ?err, "Skipping rule for this pass");
                        return;
                    }
                }
            }
            return;
        }

        for caps in self.pattern.captures_iter(buffer) {
            match caps {
                Ok(caps) => {
                    for &group in &self.groups {
                        if let Some(m) = caps.get(group) {
                            spans.add(m.start(), m.end(), style);
                        }
                    }
                }
                Err(err) => {
                    tracing::trace!(token = %self.token, ?err, "Skipping rule for this pass");
                    return;
                }
            }
        }
    }
}

/// Maps token types to styles.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    name: String,
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            styles: HashMap::new(),
        }
    }

    pub fn with(mut self, token: impl Into<String>, style: Style) -> Self {
        self.styles.insert(token.into(), style);
        self
    }

    pub fn insert(&mut self, token: impl Into<String>, style: Style) {
        self.styles.insert(token.into(), style);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self, token: &str) -> Option<&Style> {
        self.styles.get(token)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_paints_selected_groups() {
        let rule = Rule::new("due", r"(due:)(\d{4}-\d{2}-\d{2})")
            .unwrap()
            .groups(&[2]);
        let buffer = "task due:2024-01-31";
        let mut spans = SpanSet::new(buffer);
        rule.paint(&mut spans, &Style::new().bold());

        let ranges = spans.into_ranges();
        assert_eq!(ranges.len(), 1);
        assert_eq!(&buffer[ranges[0].start..ranges[0].end], "2024-01-31");
    }

    #[test]
    fn test_rule_supports_lookaround() {
        let rule = Rule::new("list", r"(?m)^[^\S\n]{0,16}([*+-])(?= )")
            .unwrap()
            .groups(&[1]);
        let buffer = "- one\n  * two\n-three";
        let mut spans = SpanSet::new(buffer);
        rule.paint(&mut spans, &Style::fg(0xffdaa521));

        let starts: Vec<_> = spans.into_ranges().iter().map(|r| r.start).collect();
        assert_eq!(starts, vec![0, 8]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(Rule::new("broken", r"(unclosed").is_err());
    }

    #[test]
    fn test_theme_lookup() {
        let theme = Theme::new("default").with("heading", Style::fg(0xffef6d00));
        assert_eq!(theme.name(), "default");
        assert!(theme.style("heading").is_some());
        assert!(theme.style("link").is_none());
    }
}
